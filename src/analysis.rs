//! Exploratory statistics over the dataset
//!
//! Counts, means and a cooccurrence table. Nothing here feeds back into extraction.
use ndarray::prelude::*;
use crate::farm::{new_term_map, TermMap};
use crate::reconcile::ReconciledMention;

/// Count per key, most frequent first, ties by name
fn ranked<'a, I: Iterator<Item=&'a str>>(keys: I) -> Vec<(String, usize)> {
    let mut counts: TermMap<usize> = new_term_map();
    for key in keys {
        *counts.entry(key.to_string()).or_insert(0) += 1;
    }
    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

/// How many mentions each item has
pub fn item_frequencies(rows: &[ReconciledMention]) -> Vec<(String, usize)> {
    ranked(rows.iter().map(|r| r.item.as_str()))
}

/// Like `item_frequencies`, but leaving out the generic parent items
pub fn specific_item_frequencies(rows: &[ReconciledMention]) -> Vec<(String, usize)> {
    ranked(rows.iter()
        .filter(|r| r.item != r.parent_item)
        .map(|r| r.item.as_str()))
}

/// The `k` most common adjectives used on `item`
pub fn top_adjectives(rows: &[ReconciledMention], item: &str, k: usize) -> Vec<(String, usize)> {
    let mut adjectives = ranked(rows.iter()
        .filter(|r| r.item == item)
        .filter_map(|r| r.adjective.as_deref()));
    adjectives.truncate(k);
    adjectives
}

/// Mean comment score of the comments mentioning each item, highest first
pub fn mean_score_by_item(rows: &[ReconciledMention]) -> Vec<(String, f64)> {
    let mut sums: TermMap<(i64, usize)> = new_term_map();
    for row in rows {
        let entry = sums.entry(row.item.clone()).or_insert((0, 0));
        entry.0 += row.comment_score;
        entry.1 += 1;
    }
    let mut means: Vec<(String, f64)> = sums.into_iter()
        .map(|(item, (sum, n))| (item, sum as f64 / n as f64))
        .collect();
    means.sort_by(|a, b| b.1.partial_cmp(&a.1)
        .unwrap_or(::std::cmp::Ordering::Equal)
        .then_with(|| a.0.cmp(&b.0)));
    means
}

/// Items against adjectives
///
/// Rows are `items`, columns are `adjectives`, both sorted. Column 0 is the empty adjective:
/// mentions with nothing in front of them.
#[derive(Debug, Clone, PartialEq)]
pub struct Cooccurrence {
    pub items: Vec<String>,
    pub adjectives: Vec<String>,
    pub counts: Array2<usize>,
}

impl Cooccurrence {
    pub fn new(rows: &[ReconciledMention]) -> Self {
        let mut items: Vec<String> = rows.iter().map(|r| r.item.clone()).collect();
        items.sort();
        items.dedup();
        let mut adjectives: Vec<String> = rows.iter()
            .filter_map(|r| r.adjective.clone())
            .filter(|a| !a.is_empty())
            .collect();
        adjectives.sort();
        adjectives.dedup();
        adjectives.insert(0, String::new());

        let item_ids: TermMap<usize> = items.iter().cloned()
            .enumerate()
            .map(|(id, item)| (item, id))
            .collect();
        let adjective_ids: TermMap<usize> = adjectives.iter().cloned()
            .enumerate()
            .map(|(id, adjective)| (adjective, id))
            .collect();

        let mut counts = Array2::zeros((items.len(), adjectives.len()));
        for row in rows {
            let adjective = row.adjective.as_deref().unwrap_or("");
            counts[[item_ids[&row.item], adjective_ids[adjective]]] += 1;
        }
        Cooccurrence { items, adjectives, counts }
    }

    /// How often `adjective` ("" for none) was used on `item`
    pub fn count(&self, item: &str, adjective: &str) -> usize {
        let row = self.items.iter().position(|i| i == item);
        let col = self.adjectives.iter().position(|a| a == adjective);
        match (row, col) {
            (Some(r), Some(c)) => self.counts[[r, c]],
            _ => 0,
        }
    }

    /// As floats, ready for `numpy::write_matrix`
    pub fn as_f64(&self) -> Array2<f64> {
        self.counts.mapv(|c| c as f64)
    }
}
