//! One extraction run, from post source to dataset
//!
//! Every post is handled by a pure function of its comments, and the results are only combined
//! at the very end. A post that can't be fetched is reported and skipped, and so is a single
//! mention the vocabulary can't place; the rest of the run carries on.
use rayon::prelude::*;
use crate::dataset::Dataset;
use crate::errors::*;
use crate::extract::{Extractor, TermIndex};
use crate::reconcile::{reconcile, ReconciledMention, Rejected};
use crate::source::{PostSource, RawComment, RawPost};
use crate::tagger::PosTagger;
use crate::vocab::Vocabulary;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Extract posts on the rayon pool instead of one after another
    pub parallel: bool,
}

/// Reconciled rows of one post, with counts
#[derive(Debug)]
pub struct PostBatch {
    pub post_id: String,
    pub rows: Vec<ReconciledMention>,
    /// Mentions the vocabulary couldn't place, with the post and comment they came from
    pub rejected: Vec<Rejected>,
    pub comments: usize,
    pub sentences: usize,
    pub degraded: usize,
}

/// A post that contributed nothing, and why
#[derive(Debug)]
pub struct PostFailure {
    pub post_id: String,
    pub error: Error,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub posts: usize,
    pub failed_posts: usize,
    pub comments: usize,
    pub sentences: usize,
    pub degraded_sentences: usize,
    pub rejected_mentions: usize,
    pub rows: usize,
}

#[derive(Debug)]
pub struct RunReport {
    pub dataset: Dataset,
    pub failures: Vec<PostFailure>,
    pub rejected: Vec<Rejected>,
    pub stats: RunStats,
}

pub struct Pipeline<'v, T: PosTagger> {
    vocab: &'v Vocabulary,
    extractor: Extractor<T>,
    config: PipelineConfig,
}

impl<'v, T: PosTagger> Pipeline<'v, T> {
    pub fn new(vocab: &'v Vocabulary, tagger: T, config: PipelineConfig) -> Result<Self> {
        let index = TermIndex::from_vocabulary(vocab);
        info!("Searching for {} vocabulary terms", index.len());
        Ok(Pipeline { vocab, extractor: Extractor::new(index, tagger)?, config })
    }

    /// Extract and reconcile every comment of one post
    pub fn process_post(&self, post_id: &str, comments: &[RawComment]) -> PostBatch {
        let mut mentions = vec![];
        let mut sentences = 0;
        let mut degraded = 0;
        for comment in comments {
            let found = self.extractor.comment(post_id, comment);
            sentences += found.sentences;
            degraded += found.degraded;
            mentions.extend(found.mentions);
        }
        let done = reconcile(&mentions, self.vocab);
        for rejected in &done.rejected {
            warn!("Rejecting {:?} in comment {} of post {}: {}",
                rejected.mention.item, rejected.mention.comment_id, post_id, rejected.error);
        }
        debug!("Post {}: {} comments, {} mentions, {} rejected",
            post_id, comments.len(), done.rows.len(), done.rejected.len());
        PostBatch {
            post_id: post_id.to_string(),
            rows: done.rows,
            rejected: done.rejected,
            comments: comments.len(),
            sentences,
            degraded,
        }
    }

    /// Pull every post from the source and build the dataset
    ///
    /// Only a failure to list the posts at all ends the run early.
    pub fn run<S: PostSource>(&self, source: &mut S) -> Result<RunReport> {
        let posts = source.posts()?;
        let listed = posts.len();
        let mut failures = vec![];
        let mut fetched: Vec<(RawPost, Vec<RawComment>)> = vec![];
        for post in posts {
            info!("now parsing post {}", post.id);
            match source.comments(&post) {
                Ok(comments) => fetched.push((post, comments)),
                Err(error) => {
                    warn!("Skipping post {}: {}", post.id, error);
                    failures.push(PostFailure { post_id: post.id, error });
                }
            }
        }

        let process = |&(ref post, ref comments): &(RawPost, Vec<RawComment>)| {
            self.process_post(&post.id, comments)
        };
        let results: Vec<PostBatch> = if self.config.parallel {
            fetched.par_iter().map(process).collect()
        } else {
            fetched.iter().map(process).collect()
        };

        let mut stats = RunStats::default();
        let mut batches = vec![];
        let mut rejected = vec![];
        for batch in results {
            stats.comments += batch.comments;
            stats.sentences += batch.sentences;
            stats.degraded_sentences += batch.degraded;
            rejected.extend(batch.rejected);
            batches.push(batch.rows);
        }
        let dataset = Dataset::assemble(batches);
        stats.posts = listed;
        stats.failed_posts = failures.len();
        stats.rejected_mentions = rejected.len();
        stats.rows = dataset.len();
        info!("Processed {} posts ({} failed), {} comments, {} sentences ({} skipped), \
            {} rows ({} mentions rejected)",
            stats.posts, stats.failed_posts, stats.comments, stats.sentences,
            stats.degraded_sentences, stats.rows, stats.rejected_mentions);
        Ok(RunReport { dataset, failures, rejected, stats })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use crate::tagger::{LexiconTagger, PosTag};
    use crate::vocab::VocabEntry;

    fn vocab() -> Vocabulary {
        Vocabulary::new(vec![
            VocabEntry::new("jackets", "blazers", Some("blazer")),
            VocabEntry::new("dresses", "dresses", Some("dress")),
            VocabEntry::new("dresses", "sheath dresses", Some("sheath")),
        ])
    }

    fn tagger() -> LexiconTagger {
        let mut tagger = LexiconTagger::new();
        tagger.insert("sheath", PosTag::Adjective);
        tagger
    }

    fn comment(id: &str, body: &str, score: i64) -> RawComment {
        RawComment { id: id.into(), body: body.into(), score }
    }

    fn source() -> MemorySource {
        MemorySource::new()
            .with_post("p1", vec![
                comment("c1", "I love my new Black Blazer.", 10),
                comment("c2", "A sheath dress is perfect.", 3),
            ])
            .with_failure("p2", "HTTP 503")
            .with_post("p3", vec![comment("c3", "https://example.com/blazer", 1)])
    }

    #[test]
    fn failed_post_does_not_stop_the_run() {
        let vocab = vocab();
        let pipeline = Pipeline::new(&vocab, tagger(), PipelineConfig::default()).unwrap();
        let report = pipeline.run(&mut source()).unwrap();
        let rows: Vec<(&str, &str, Option<&str>)> = report.dataset.rows().iter()
            .map(|r| (r.comment_id.as_str(), r.item.as_str(), r.adjective.as_deref()))
            .collect();
        assert_eq!(rows, vec![
            ("c1", "blazers", Some("black")),
            ("c2", "sheath dresses", None),
        ]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].post_id, "p2");
        assert_eq!(report.stats, RunStats {
            posts: 3,
            failed_posts: 1,
            comments: 3,
            sentences: 3,
            degraded_sentences: 0,
            rejected_mentions: 0,
            rows: 2,
        });
    }

    #[test]
    fn parallel_run_finds_the_same_rows() {
        let vocab = vocab();
        let serial = Pipeline::new(&vocab, tagger(), PipelineConfig::default()).unwrap()
            .run(&mut source()).unwrap();
        let parallel = Pipeline::new(&vocab, tagger(), PipelineConfig { parallel: true }).unwrap()
            .run(&mut source()).unwrap();
        let mut a = serial.dataset.into_rows();
        let mut b = parallel.dataset.into_rows();
        a.sort_by(|x, y| x.comment_id.cmp(&y.comment_id));
        b.sort_by(|x, y| x.comment_id.cmp(&y.comment_id));
        assert_eq!(a, b);
    }

    #[test]
    fn ambiguity_rejects_only_its_mention() {
        let vocab = Vocabulary::new(vec![
            VocabEntry::new("tops", "tanks", Some("tank")),
            VocabEntry::new("tops", "tank tops", Some("tank")),
            VocabEntry::new("jackets", "blazers", Some("blazer")),
        ]);
        let pipeline = Pipeline::new(&vocab, LexiconTagger::new(), PipelineConfig::default())
            .unwrap();
        let mut source = MemorySource::new()
            .with_post("p1", vec![
                comment("c1", "A white tank.", 2),
                comment("c2", "I love my black blazer.", 5),
            ])
            .with_post("p2", vec![comment("c3", "Two tanks.", 2)]);
        let report = pipeline.run(&mut source).unwrap();
        assert!(report.failures.is_empty());
        let rows: Vec<(&str, &str, Option<&str>)> = report.dataset.rows().iter()
            .map(|r| (r.comment_id.as_str(), r.item.as_str(), r.adjective.as_deref()))
            .collect();
        assert_eq!(rows, vec![("c2", "blazers", Some("black")), ("c3", "tanks", None)]);
        assert_eq!(report.rejected.len(), 1);
        let rejected = &report.rejected[0];
        assert_eq!((rejected.mention.post_id.as_str(), rejected.mention.comment_id.as_str()),
            ("p1", "c1"));
        match rejected.error {
            Error::AmbiguousVocabulary { ref term, .. } => assert_eq!(term, "tank"),
            ref other => panic!("expected ambiguity, got {:?}", other),
        }
        assert_eq!(report.stats.rejected_mentions, 1);
    }
}
