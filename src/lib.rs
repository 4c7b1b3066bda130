//! Clothing mentions in discussion threads
//!
//! Finds clothing items and the adjectives in front of them in comment text, normalizes them
//! against a fixed vocabulary, and produces one flat table of (post, comment, score, item,
//! parent item, adjective) rows for later counting.
//!
//! The stages, leaves first: `vocab`, `normalize`, `tagger`, `extract`, `reconcile`, `dataset`.
//! `pipeline` strings them together over a `source`, and `analysis` reads the result.


#[macro_use] extern crate log;
pub mod errors;
pub mod farm;
pub mod vocab;
pub mod normalize;
pub mod tagger;
pub mod extract;
pub mod reconcile;
pub mod dataset;
pub mod source;
pub mod pipeline;
pub mod analysis;
pub mod numpy;
