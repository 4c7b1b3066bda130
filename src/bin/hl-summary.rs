//! Print the headline numbers of a mention table
//!
//! Most mentioned items, most mentioned specific (non-parent) items, their favourite adjectives
//! and the mean comment score per item.

// argument parsing
#[macro_use] extern crate clap;
extern crate env_logger;
// lastly, this library
extern crate hemline;

use std::process;

use hemline::analysis;
use hemline::dataset::Dataset;
use hemline::errors::*;

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
        .arg_from_usage("<dataset> 'mention table written by hl-extract'")
        .arg_from_usage("--top [N] 'how many items to list (default 20)'")
        .arg_from_usage("--adjectives [K] 'how many adjectives per item (default 5)'")
        .get_matches();
    let top = if args.is_present("top") {
        value_t!(args, "top", usize).unwrap_or_else(|e| e.exit())
    } else { 20 };
    let per_item = if args.is_present("adjectives") {
        value_t!(args, "adjectives", usize).unwrap_or_else(|e| e.exit())
    } else { 5 };

    let dataset = Dataset::from_path(args.value_of("dataset").unwrap_or_default())?;
    let rows = dataset.rows();
    println!("{} mentions", rows.len());

    println!("\nMost mentioned items");
    let frequent = analysis::item_frequencies(rows);
    for &(ref item, count) in frequent.iter().take(top) {
        println!("{:>6}  {}", count, item);
    }

    println!("\nMost mentioned specific items");
    for (item, count) in analysis::specific_item_frequencies(rows).into_iter().take(top) {
        println!("{:>6}  {}", count, item);
    }

    println!("\nTop adjectives");
    for &(ref item, _) in frequent.iter().take(top) {
        let adjectives: Vec<String> = analysis::top_adjectives(rows, item, per_item).into_iter()
            .map(|(adjective, count)| format!("{} ({})", adjective, count))
            .collect();
        println!("{:>20}  {}", item, adjectives.join(", "));
    }

    println!("\nMean comment score");
    for (item, mean) in analysis::mean_score_by_item(rows).into_iter().take(top) {
        println!("{:>8.1}  {}", mean, item);
    }
    Ok(())
}
