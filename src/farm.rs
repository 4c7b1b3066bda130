//! Faster (but not DoS-resistant) term sets and maps
//!
//! The vocabulary is fixed and comes from a trusted file, so there is no point paying for SipHash
//! on every n-gram lookup during extraction.
use std::collections::{HashMap, HashSet};
use std::hash::{BuildHasherDefault, Hasher};

/// Streaming farmhash
///
/// farmhash isn't a streaming hash, so every write is chained through the seed of the next one.
/// `str` hashes as its bytes plus a terminator byte, and both have to count.
pub struct FarmChain(u64);

impl Default for FarmChain {
    #[inline]
    fn default() -> FarmChain { FarmChain(0) }
}

impl Hasher for FarmChain {
    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.0 = farmhash::hash64_with_seed(bytes, self.0);
    }
}

pub type Farm = BuildHasherDefault<FarmChain>;
pub type TermMap<V> = HashMap<String, V, Farm>;
pub type TermSet = HashSet<String, Farm>;

pub fn new_term_map<V>() -> TermMap<V> {
    Default::default()
}

pub fn new_term_set() -> TermSet {
    Default::default()
}
