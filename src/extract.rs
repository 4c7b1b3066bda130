//! Item and adjective extraction
//!
//! A mention is a vocabulary term found as a whole word (or whole run of words) in a cleaned
//! sentence. Its adjective is the word right before it, and only if the tagger calls that word a
//! plain adjective. Nothing further away is considered.
//!
//! That one word in front is the *carrier*: its successor starts the match. A term at the very
//! start of a sentence has no carrier and so no adjective, but it is still a mention.
//!
//! One written phrase gives one mention. A term nested inside a longer matched term ("pants" in
//! "pencil pants") is not a mention of its own. Neither is an adjective-tagged term in front of
//! another term of the same parent ("sheath" in "sheath dress"): it rides along as the adjective
//! and reconciliation promotes it.
use crate::errors::*;
use crate::farm::{new_term_map, TermMap};
use crate::normalize::{clean_sentence, Normalizer};
use crate::source::RawComment;
use crate::tagger::PosTagger;
use crate::vocab::Vocabulary;

/// One vocabulary term seen in one comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedMention {
    pub post_id: String,
    pub comment_id: String,
    pub comment_score: i64,
    pub item: String,
    pub adjective: Option<String>,
}

/// The part of a mention a single sentence can tell us
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub item: String,
    pub adjective: Option<String>,
}

/// Where a term sits in a sentence, counted in tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence<'t> {
    pub term: &'t str,
    pub start: usize,
    /// Number of tokens the term spans
    pub len: usize,
}

impl<'t> Occurrence<'t> {
    fn end(&self) -> usize {
        self.start + self.len
    }

    /// Whether `other` spans all of this occurrence and more
    fn is_inside(&self, other: &Occurrence<'_>) -> bool {
        other.len > self.len && other.start <= self.start && self.end() <= other.end()
    }
}

/// Whole-word lookup of vocabulary terms
///
/// Terms are indexed by their cleaned form (the same cleaning sentences get), so a term with a
/// hyphen or a capital still matches. Lookups are n-grams of up to `max_words` tokens.
#[derive(Debug)]
pub struct TermIndex {
    forms: TermMap<String>,
    /// Parent item of each term that resolves unambiguously
    parents: TermMap<String>,
    max_words: usize,
}

impl TermIndex {
    pub fn new<I, S>(terms: I) -> Self
        where I: IntoIterator<Item=S>, S: AsRef<str> {
        let mut forms = new_term_map::<String>();
        let mut max_words = 0;
        for term in terms {
            let term = term.as_ref();
            let words: Vec<String> = clean_sentence(term)
                .split_whitespace()
                .map(String::from)
                .collect();
            if words.is_empty() {
                continue;
            }
            max_words = max_words.max(words.len());
            let form = words.join(" ");
            match forms.get(&form).cloned() {
                Some(ref existing) if existing.as_str() <= term => {
                    warn!("Terms {:?} and {:?} look the same once cleaned; keeping {:?}",
                        existing, term, existing);
                }
                Some(existing) => {
                    warn!("Terms {:?} and {:?} look the same once cleaned; keeping {:?}",
                        existing, term, term);
                    forms.insert(form, term.to_string());
                }
                None => { forms.insert(form, term.to_string()); }
            }
        }
        TermIndex { forms, parents: new_term_map(), max_words }
    }

    pub fn from_vocabulary(vocab: &Vocabulary) -> Self {
        let terms = vocab.terms();
        let mut index = TermIndex::new(&terms);
        for term in &terms {
            if let Ok(resolution) = vocab.resolve(term) {
                index.parents.insert(term.clone(), resolution.entry.parent_item.clone());
            }
        }
        index
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// The vocabulary term spelled `form` in a cleaned sentence
    pub fn term(&self, form: &str) -> Option<&str> {
        self.forms.get(form).map(String::as_str)
    }

    /// Parent item of `term`, when the vocabulary gives exactly one
    pub fn parent(&self, term: &str) -> Option<&str> {
        self.parents.get(term).map(String::as_str)
    }

    /// Whether `modifier` written in front of `head` names a specific item of the same parent
    pub fn is_modifier_of(&self, modifier: &str, head: &str) -> bool {
        match (self.parent(modifier), self.parent(head)) {
            (Some(a), Some(b)) => a == b && modifier != a,
            _ => false,
        }
    }

    /// Every whole-word occurrence, by start position and then by length
    ///
    /// An occurrence lying inside a longer one is dropped: "a sheath dress" only has "sheath
    /// dress" when that is a term. Partial overlaps are all kept.
    pub fn occurrences(&self, tokens: &[&str]) -> Vec<Occurrence<'_>> {
        let mut found = vec![];
        for start in 0..tokens.len() {
            let longest = self.max_words.min(tokens.len() - start);
            for len in 1..=longest {
                let form = tokens[start..start + len].join(" ");
                if let Some(term) = self.term(&form) {
                    found.push(Occurrence { term, start, len });
                }
            }
        }
        let nested: Vec<bool> = found.iter()
            .map(|occ| found.iter().any(|other| occ.is_inside(other)))
            .collect();
        found.into_iter()
            .zip(nested)
            .filter(|&(_, inside)| !inside)
            .map(|(occ, _)| occ)
            .collect()
    }
}

/// The token after each token, or "" for the last one
///
/// With fewer than two tokens nothing has a successor.
pub fn successors<'a>(tokens: &[&'a str]) -> Vec<&'a str> {
    if tokens.len() < 2 {
        return vec![""; tokens.len()];
    }
    tokens[1..].iter().cloned().chain(Some("")).collect()
}

/// What came out of one comment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentMentions {
    pub mentions: Vec<ExtractedMention>,
    pub sentences: usize,
    /// Sentences the tagger failed on, which contribute nothing
    pub degraded: usize,
}

/// Sentence cleanup, term lookup and tagging in one place
pub struct Extractor<T: PosTagger> {
    normalizer: Normalizer,
    index: TermIndex,
    tagger: T,
}

impl<T: PosTagger> Extractor<T> {
    pub fn new(index: TermIndex, tagger: T) -> Result<Self> {
        Ok(Extractor { normalizer: Normalizer::new()?, index, tagger })
    }

    pub fn index(&self) -> &TermIndex {
        &self.index
    }

    /// Fragments for one cleaned sentence
    ///
    /// Each distinct term gets its own fragments, in order of first appearance; carriers are
    /// never shared between terms.
    pub fn sentence(&self, sentence: &str) -> Result<Vec<Fragment>> {
        let tokens: Vec<&str> = sentence.split_whitespace().collect();
        if tokens.is_empty() {
            return Ok(vec![]);
        }
        let occurrences = self.index.occurrences(&tokens);
        if occurrences.is_empty() {
            return Ok(vec![]);
        }
        let tagged = self.tagger.tag(&tokens)?;
        if tagged.len() != tokens.len() {
            return Err(Error::Tagger(format!("{} tags for {} tokens in {:?}",
                tagged.len(), tokens.len(), sentence)));
        }
        let next = successors(&tokens);

        // A one-word term tagged as an adjective right before a term of the same parent is that
        // term's modifier, not a mention of its own
        let modifiers: Vec<usize> = occurrences.iter()
            .filter(|occ| occ.len == 1
                && tokens[occ.start] == occ.term
                && tagged[occ.start].tag.is_adjective()
                && occurrences.iter().any(|head| head.start == occ.end()
                    && self.index.is_modifier_of(occ.term, head.term)))
            .map(|occ| occ.start)
            .collect();

        // Starts of each term, grouped by term in order of first appearance
        let mut by_term: Vec<(&str, Vec<usize>)> = vec![];
        for occ in occurrences.iter().filter(|occ| !modifiers.contains(&occ.start)) {
            match by_term.iter_mut().find(|entry| entry.0 == occ.term) {
                Some(entry) => entry.1.push(occ.start),
                None => by_term.push((occ.term, vec![occ.start])),
            }
        }

        let mut fragments = vec![];
        for (term, starts) in by_term {
            if starts.contains(&0) {
                fragments.push(Fragment { item: term.to_string(), adjective: None });
            }
            for (carrier, next_word) in next.iter().enumerate() {
                if next_word.is_empty() || !starts.contains(&(carrier + 1)) {
                    continue;
                }
                let adjective = if tagged[carrier].tag.is_adjective() {
                    Some(tokens[carrier].to_string())
                } else {
                    None
                };
                fragments.push(Fragment { item: term.to_string(), adjective });
            }
        }
        Ok(fragments)
    }

    /// Mentions for one comment, in sentence order
    ///
    /// A sentence the tagger chokes on is logged and skipped.
    pub fn comment(&self, post_id: &str, comment: &RawComment) -> CommentMentions {
        let mut out = CommentMentions::default();
        for sentence in self.normalizer.sentences(&comment.body) {
            out.sentences += 1;
            match self.sentence(&sentence) {
                Ok(fragments) => {
                    out.mentions.extend(fragments.into_iter().map(|f| ExtractedMention {
                        post_id: post_id.to_string(),
                        comment_id: comment.id.clone(),
                        comment_score: comment.score,
                        item: f.item,
                        adjective: f.adjective,
                    }));
                }
                Err(err) => {
                    warn!("Skipping a sentence of comment {} in post {}: {}",
                        comment.id, post_id, err);
                    out.degraded += 1;
                }
            }
        }
        out
    }
}
