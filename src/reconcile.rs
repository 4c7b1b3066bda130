//! Vocabulary reconciliation
//!
//! Extracted mentions carry whatever surface form matched: "blazer" as often as "blazers". Here
//! every mention is joined back to the table so the item is always a value of the `item` column
//! and the parent category comes along with it.
//!
//! Then modifier promotion: people write "sheath dress" far more than "sheath", so the extractor
//! sees item "dress" with adjective "sheath". When the adjective is itself a specific item of
//! the same parent, it becomes the item and the adjective goes away.
use serde::{Deserialize, Serialize};
use crate::errors::*;
use crate::extract::ExtractedMention;
use crate::vocab::Vocabulary;

/// A mention after reconciliation; one row of the final dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledMention {
    pub post_id: String,
    pub comment_id: String,
    pub comment_score: i64,
    pub item: String,
    pub parent_item: String,
    pub adjective: Option<String>,
}

/// Plural join or singular join, whichever applies
///
/// A term that hits both joins, or a singular shared by two items, is an error.
pub fn join(mention: &ExtractedMention, vocab: &Vocabulary) -> Result<ReconciledMention> {
    let resolution = vocab.resolve(&mention.item)?;
    Ok(ReconciledMention {
        post_id: mention.post_id.clone(),
        comment_id: mention.comment_id.clone(),
        comment_score: mention.comment_score,
        item: resolution.entry.item.clone(),
        parent_item: resolution.entry.parent_item.clone(),
        adjective: mention.adjective.clone(),
    })
}

/// Turn a specific-item adjective into the item itself
pub fn promote(mut row: ReconciledMention, vocab: &Vocabulary) -> Result<ReconciledMention> {
    let target = match row.adjective {
        Some(ref adjective) => vocab.modifier_target(&row.parent_item, adjective)?,
        None => None,
    };
    if let Some(entry) = target {
        trace!("Promoting {:?} over {:?} in comment {}",
            entry.item, row.item, row.comment_id);
        row.item = entry.item.clone();
        row.adjective = None;
    }
    Ok(row)
}

/// Join and promote one mention
pub fn reconcile_one(mention: &ExtractedMention, vocab: &Vocabulary) -> Result<ReconciledMention> {
    let row = promote(join(mention, vocab)?, vocab)?;
    debug_assert!(vocab.is_item(&row.item));
    Ok(row)
}

/// A mention the table couldn't place, and why
#[derive(Debug)]
pub struct Rejected {
    pub mention: ExtractedMention,
    pub error: Error,
}

/// Rows that reconciled, and the mentions that didn't
#[derive(Debug, Default)]
pub struct Reconciliation {
    pub rows: Vec<ReconciledMention>,
    pub rejected: Vec<Rejected>,
}

/// Join and promote a batch, keeping its order
///
/// Each mention stands alone: an ambiguous term rejects its own mention and nothing else.
pub fn reconcile(mentions: &[ExtractedMention], vocab: &Vocabulary) -> Reconciliation {
    let mut out = Reconciliation::default();
    for mention in mentions {
        match reconcile_one(mention, vocab) {
            Ok(row) => out.rows.push(row),
            Err(error) => out.rejected.push(Rejected { mention: mention.clone(), error }),
        }
    }
    out
}
