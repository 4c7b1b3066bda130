//! The controlled clothing vocabulary
//!
//! Each row of the table ties a specific item ("blazers") to a generic parent category
//! ("jackets") and optionally to a singular surface form ("blazer"). The table is loaded once and
//! never changes afterwards; everything downstream only borrows it.
//!
//! Loading is permissive: an ambiguous table still loads, and the ambiguity is reported when a
//! mention actually runs into it (see `resolve`), or up front through `ambiguities`.
use std::fs::File;
use std::io::Read;
use std::path::Path;
use serde::Deserialize;
use crate::errors::*;
use crate::farm::{new_term_map, new_term_set, TermMap, TermSet};

/// One row of the vocabulary table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabEntry {
    pub parent_item: String,
    pub item: String,
    pub item_singular: Option<String>,
}

impl VocabEntry {
    /// Build an entry, trimming everything and treating a blank singular as absent
    pub fn new<S: Into<String>>(parent_item: S, item: S, item_singular: Option<S>) -> Self {
        let clean = |s: S| s.into().trim().to_string();
        VocabEntry {
            parent_item: clean(parent_item),
            item: clean(item),
            item_singular: item_singular.map(clean).filter(|s| !s.is_empty()),
        }
    }
}

/// As it appears in the CSV file
#[derive(Debug, Deserialize)]
struct VocabRow {
    parent_item: String,
    item: String,
    #[serde(default)]
    item_singular: Option<String>,
}

/// What a term turned out to mean
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'v> {
    pub entry: &'v VocabEntry,
    /// The term was the singular form, so the item had to be rewritten
    pub via_singular: bool,
}

#[derive(Debug)]
pub struct Vocabulary {
    entries: Vec<VocabEntry>,
    by_item: TermMap<Vec<usize>>,
    by_singular: TermMap<Vec<usize>>,
    by_parent: TermMap<Vec<usize>>,
}

impl Vocabulary {
    pub fn new(entries: Vec<VocabEntry>) -> Self {
        let mut by_item = new_term_map::<Vec<usize>>();
        let mut by_singular = new_term_map::<Vec<usize>>();
        let mut by_parent = new_term_map::<Vec<usize>>();
        for (idx, entry) in entries.iter().enumerate() {
            if entry.item.is_empty() {
                warn!("Skipping vocabulary row {} with no item", idx + 1);
                continue;
            }
            by_item.entry(entry.item.clone()).or_insert_with(Vec::new).push(idx);
            if let Some(ref singular) = entry.item_singular {
                by_singular.entry(singular.clone()).or_insert_with(Vec::new).push(idx);
            }
            by_parent.entry(entry.parent_item.clone()).or_insert_with(Vec::new).push(idx);
        }
        Vocabulary { entries, by_item, by_singular, by_parent }
    }

    /// Read a CSV table with a `parent_item,item,item_singular` header
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let mut entries = vec![];
        for row in rdr.deserialize() {
            let row: VocabRow = row?;
            entries.push(VocabEntry::new(row.parent_item, row.item, row.item_singular));
        }
        Ok(Vocabulary::new(entries))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())
            .map_err(|e| Error::MissingFile("vocabulary table", Some(e)))?;
        let vocab = Vocabulary::from_reader(file)?;
        info!("Loaded {} vocabulary entries under {} parent items from {}",
            vocab.entries.len(), vocab.by_parent.len(), path.as_ref().display());
        Ok(vocab)
    }

    pub fn entries(&self) -> &[VocabEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every surface form worth searching for: all items and all singulars
    pub fn terms(&self) -> TermSet {
        let mut terms = new_term_set();
        terms.extend(self.by_item.keys().cloned());
        terms.extend(self.by_singular.keys().cloned());
        terms
    }

    /// Whether `term` is in the item column
    pub fn is_item(&self, term: &str) -> bool {
        self.by_item.contains_key(term)
    }

    /// Rows whose `item` is exactly `term`
    ///
    /// Listing the same item twice is harmless as long as it keeps its parent.
    pub fn plural_join(&self, term: &str) -> Result<Option<&VocabEntry>> {
        let idxs = match self.by_item.get(term) {
            Some(idxs) => idxs,
            None => return Ok(None),
        };
        let first = &self.entries[idxs[0]];
        let mut parents: Vec<&str> = idxs.iter()
            .map(|&i| self.entries[i].parent_item.as_str())
            .collect();
        parents.sort();
        parents.dedup();
        if parents.len() > 1 {
            return Err(Error::ambiguous(term,
                format!("item is listed under several parents: {}", parents.join(", "))));
        }
        Ok(Some(first))
    }

    /// Rows whose `item_singular` is exactly `term`
    pub fn singular_join(&self, term: &str) -> Result<Option<&VocabEntry>> {
        let idxs = match self.by_singular.get(term) {
            Some(idxs) => idxs,
            None => return Ok(None),
        };
        self.unique_target(term, idxs, "singular form")
    }

    /// Resolve a surface form to exactly one vocabulary row
    ///
    /// A term found both as an item and as a singular is an error: the table doesn't say which
    /// one was meant.
    pub fn resolve(&self, term: &str) -> Result<Resolution<'_>> {
        match (self.plural_join(term)?, self.singular_join(term)?) {
            (Some(plural), Some(singular)) => Err(Error::ambiguous(term, format!(
                "matches item {:?} ({}) and is also the singular of {:?} ({})",
                plural.item, plural.parent_item, singular.item, singular.parent_item))),
            (Some(entry), None) => Ok(Resolution { entry, via_singular: false }),
            (None, Some(entry)) => Ok(Resolution { entry, via_singular: true }),
            (None, None) => Err(Error::UnknownItem(term.to_string())),
        }
    }

    /// The surface forms that count as specific items of `parent`
    ///
    /// The parent's own name never counts, it is the generic item itself.
    pub fn modifier_terms(&self, parent: &str) -> Vec<&str> {
        let mut terms: Vec<&str> = self.by_parent.get(parent)
            .into_iter()
            .flat_map(|idxs| idxs.iter())
            .flat_map(|&i| {
                let entry = &self.entries[i];
                Some(entry.item.as_str()).into_iter().chain(entry.item_singular.as_deref())
            })
            .filter(|&term| term != parent)
            .collect();
        terms.sort();
        terms.dedup();
        terms
    }

    /// The item of `parent` that `term` names, if `term` is one of its modifier terms
    pub fn modifier_target(&self, parent: &str, term: &str) -> Result<Option<&VocabEntry>> {
        if term.is_empty() || term == parent {
            return Ok(None);
        }
        let idxs: Vec<usize> = match self.by_parent.get(parent) {
            Some(idxs) => idxs.iter()
                .cloned()
                .filter(|&i| {
                    let entry = &self.entries[i];
                    entry.item == term || entry.item_singular.as_deref() == Some(term)
                })
                .collect(),
            None => return Ok(None),
        };
        if idxs.is_empty() {
            return Ok(None);
        }
        self.unique_target(term, &idxs, "modifier")
    }

    /// Every term the table can't resolve on its own
    pub fn ambiguities(&self) -> Vec<Error> {
        let mut terms: Vec<&String> = self.by_item.keys().chain(self.by_singular.keys()).collect();
        terms.sort();
        terms.dedup();
        terms.into_iter()
            .filter_map(|term| self.resolve(term).err())
            .collect()
    }

    /// Several rows are fine only if they all agree on the (item, parent) pair
    fn unique_target(&self, term: &str, idxs: &[usize], role: &str) -> Result<Option<&VocabEntry>> {
        let mut targets: Vec<(&str, &str)> = idxs.iter()
            .map(|&i| (self.entries[i].item.as_str(), self.entries[i].parent_item.as_str()))
            .collect();
        targets.sort();
        targets.dedup();
        if targets.len() > 1 {
            let listed: Vec<String> = targets.iter()
                .map(|&(item, parent)| format!("{} ({})", item, parent))
                .collect();
            return Err(Error::ambiguous(term,
                format!("{} of several items: {}", role, listed.join(", "))));
        }
        Ok(idxs.first().map(|&i| &self.entries[i]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
parent_item,item,item_singular
jackets,jackets,jacket
jackets,blazers,blazer
dresses,dresses,dress
dresses,sheath dresses,sheath
pants,pants,
pants,leggings,
";

    fn table() -> Vocabulary {
        Vocabulary::from_reader(TABLE.as_bytes()).unwrap()
    }

    #[test]
    fn blank_singular_is_absent() {
        let vocab = table();
        assert_eq!(vocab.len(), 6);
        assert_eq!(vocab.entries()[4], VocabEntry::new("pants", "pants", None));
        assert_eq!(vocab.entries()[1].item_singular.as_deref(), Some("blazer"));
    }

    #[test]
    fn terms_cover_items_and_singulars() {
        let terms = table().terms();
        for term in &["blazers", "blazer", "sheath", "sheath dresses", "leggings"] {
            assert!(terms.contains(*term), "missing {}", term);
        }
        assert!(!terms.contains(""));
        assert_eq!(terms.len(), 10);
    }

    #[test]
    fn resolve_singular_and_plural() {
        let vocab = table();
        let plural = vocab.resolve("blazers").unwrap();
        assert_eq!(plural.entry.item, "blazers");
        assert!(!plural.via_singular);
        let singular = vocab.resolve("blazer").unwrap();
        assert_eq!(singular.entry.item, "blazers");
        assert_eq!(singular.entry.parent_item, "jackets");
        assert!(singular.via_singular);
        match vocab.resolve("scarf") {
            Err(Error::UnknownItem(ref t)) if t == "scarf" => {}
            other => panic!("expected unknown item, got {:?}", other),
        }
    }

    #[test]
    fn singular_with_two_items_is_ambiguous() {
        let vocab = Vocabulary::new(vec![
            VocabEntry::new("tops", "tanks", Some("tank")),
            VocabEntry::new("tops", "tank tops", Some("tank")),
        ]);
        match vocab.resolve("tank") {
            Err(Error::AmbiguousVocabulary { ref term, ref reason }) => {
                assert_eq!(term, "tank");
                assert!(reason.contains("tank tops"));
                assert!(reason.contains("tanks"));
            }
            other => panic!("expected ambiguity, got {:?}", other),
        }
        assert_eq!(vocab.ambiguities().len(), 1);
    }

    #[test]
    fn plural_and_singular_double_match_is_ambiguous() {
        let vocab = Vocabulary::new(vec![
            VocabEntry::new("pants", "shorts", None),
            VocabEntry::new("tops", "short sleeves", Some("shorts")),
        ]);
        assert!(vocab.resolve("shorts").is_err());
        assert!(vocab.resolve("short sleeves").is_ok());
    }

    #[test]
    fn repeated_row_is_not_ambiguous() {
        let vocab = Vocabulary::new(vec![
            VocabEntry::new("shoes", "flats", Some("flat")),
            VocabEntry::new("shoes", "flats", Some("flat")),
        ]);
        assert!(vocab.ambiguities().is_empty());
        assert_eq!(vocab.resolve("flat").unwrap().entry.item, "flats");
    }

    #[test]
    fn modifier_terms_skip_the_parent() {
        let vocab = table();
        assert_eq!(vocab.modifier_terms("dresses"), vec!["dress", "sheath", "sheath dresses"]);
        assert_eq!(vocab.modifier_target("dresses", "sheath").unwrap().unwrap().item,
            "sheath dresses");
        assert!(vocab.modifier_target("dresses", "dresses").unwrap().is_none());
        assert!(vocab.modifier_target("jackets", "sheath").unwrap().is_none());
    }

    #[test]
    fn missing_file_is_reported() {
        match Vocabulary::from_path("/definitely/not/here.csv") {
            Err(Error::MissingFile(what, Some(_))) => assert_eq!(what, "vocabulary table"),
            other => panic!("expected missing file, got {:?}", other),
        }
    }
}
