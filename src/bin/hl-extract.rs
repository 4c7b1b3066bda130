//! Extract clothing mentions from a directory of post dumps
//!
//! Every `.json` file in the post directory is one post with its top-level comments. Each
//! comment is cleaned, split into sentences and tagged; vocabulary terms are picked out along
//! with the adjective right in front of them, then reconciled against the vocabulary.
//!
//! The output is a CSV with one row per mention. Posts that fail, and mentions the vocabulary
//! can't place, are listed at the end and don't stop the others.

// argument parsing
#[macro_use] extern crate clap;
// logging
#[macro_use] extern crate log;
extern crate env_logger;
// lastly, this library
extern crate hemline;

use std::process;

use hemline::errors::*;
use hemline::pipeline::{Pipeline, PipelineConfig};
use hemline::source::DirectorySource;
use hemline::tagger::LexiconTagger;
use hemline::vocab::Vocabulary;

pub fn main() {
    // Main can't return a Result, and the ? operator needs the enclosing function to return Result
    if let Err(err) = inner_main() {
        eprintln!("Could not recover: {}", err);
        process::exit(1);
    }
}
pub fn inner_main() -> Result<()> {
    env_logger::init();
    let args = app_from_crate!()
        .arg_from_usage("<vocab> 'CSV file with parent_item, item and item_singular columns'")
        .arg_from_usage("<posts> 'directory of post dumps, one JSON file per post'")
        .arg_from_usage("<output> 'file in which to store the mention table (CSV)'")
        .arg_from_usage("--lexicon [FILE] 'extra word<TAB>TAG entries for the tagger'")
        .arg_from_usage("--parallel 'extract posts on all cores'")
        .arg_from_usage("--strict 'refuse to run if any vocabulary term is ambiguous'")
        .get_matches();
    // clap enforces the positional arguments
    let vocab_path = args.value_of("vocab").unwrap_or_default();
    let posts_path = args.value_of("posts").unwrap_or_default();
    let output_path = args.value_of("output").unwrap_or_default();

    let vocab = Vocabulary::from_path(vocab_path)?;
    let ambiguities = vocab.ambiguities();
    for err in &ambiguities {
        warn!("{}", err);
    }
    if args.is_present("strict") && !ambiguities.is_empty() {
        return Err(Error::Other(format!(
            "{} ambiguous vocabulary terms in {}; fix the table or drop --strict",
            ambiguities.len(), vocab_path)));
    }

    let mut tagger = LexiconTagger::new();
    if let Some(lexicon) = args.value_of("lexicon") {
        tagger.extend_from_path(lexicon)?;
    }

    let config = PipelineConfig { parallel: args.is_present("parallel") };
    let pipeline = Pipeline::new(&vocab, tagger, config)?;
    let report = pipeline.run(&mut DirectorySource::new(posts_path))?;
    report.dataset.to_path(output_path)?;

    println!("{} rows from {} of {} posts ({} comments, {} sentences, {} sentences skipped, \
        {} mentions rejected)",
        report.stats.rows,
        report.stats.posts - report.stats.failed_posts,
        report.stats.posts,
        report.stats.comments,
        report.stats.sentences,
        report.stats.degraded_sentences,
        report.stats.rejected_mentions);
    for failure in &report.failures {
        println!("Failed post {}: {}", failure.post_id, failure.error);
    }
    for rejected in &report.rejected {
        println!("Rejected {:?} in comment {} of post {}: {}", rejected.mention.item,
            rejected.mention.comment_id, rejected.mention.post_id, rejected.error);
    }
    Ok(())
}
