//! Part of speech tagging
//!
//! The extractor only needs to know whether a word is a plain adjective, so tags are kept
//! coarse. Anything that speaks Penn Treebank tags can sit behind `PosTagger`.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use crate::errors::*;
use crate::farm::{new_term_map, TermMap};

/// Coarse part of speech
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosTag {
    /// Plain adjective (JJ)
    Adjective,
    /// Comparative or superlative adjective (JJR, JJS)
    GradedAdjective,
    Noun,
    Verb,
    Adverb,
    Determiner,
    Preposition,
    Pronoun,
    Conjunction,
    Number,
    Other,
}

impl PosTag {
    /// Read a Penn Treebank tag
    pub fn from_penn(tag: &str) -> PosTag {
        match tag {
            "JJ" => PosTag::Adjective,
            "JJR" | "JJS" => PosTag::GradedAdjective,
            "NN" | "NNS" | "NNP" | "NNPS" => PosTag::Noun,
            "VB" | "VBD" | "VBG" | "VBN" | "VBP" | "VBZ" | "MD" => PosTag::Verb,
            "RB" | "RBR" | "RBS" | "WRB" => PosTag::Adverb,
            "DT" | "PDT" | "WDT" | "PRP$" | "WP$" => PosTag::Determiner,
            "IN" | "TO" => PosTag::Preposition,
            "PRP" | "WP" => PosTag::Pronoun,
            "CC" => PosTag::Conjunction,
            "CD" => PosTag::Number,
            _ => PosTag::Other,
        }
    }

    pub fn as_penn(&self) -> &'static str {
        match *self {
            PosTag::Adjective => "JJ",
            PosTag::GradedAdjective => "JJR",
            PosTag::Noun => "NN",
            PosTag::Verb => "VB",
            PosTag::Adverb => "RB",
            PosTag::Determiner => "DT",
            PosTag::Preposition => "IN",
            PosTag::Pronoun => "PRP",
            PosTag::Conjunction => "CC",
            PosTag::Number => "CD",
            PosTag::Other => "FW",
        }
    }

    /// Only plain adjectives count as modifiers of an item
    pub fn is_adjective(&self) -> bool {
        *self == PosTag::Adjective
    }
}

/// A word and its tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tagged {
    pub word: String,
    pub tag: PosTag,
}

/// Anything that can tag a tokenized sentence
///
/// One output per input token, in order. An error means the sentence can't be used; callers
/// skip it rather than giving up on the comment.
pub trait PosTagger: Sync {
    fn tag(&self, tokens: &[&str]) -> Result<Vec<Tagged>>;
}

/// Dictionary tagger with suffix rules for unknown words
///
/// No model weights, completely deterministic. Good enough to spot colours, fits and the usual
/// "-ful/-ous/-ive" adjectives in front of a clothing word.
#[derive(Debug, Clone)]
pub struct LexiconTagger {
    lexicon: TermMap<PosTag>,
}

impl Default for LexiconTagger {
    fn default() -> Self {
        let mut tagger = LexiconTagger { lexicon: new_term_map() };
        tagger.load_default_lexicon();
        tagger
    }
}

impl LexiconTagger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override (or add) the tag of one word
    pub fn insert<S: Into<String>>(&mut self, word: S, tag: PosTag) {
        self.lexicon.insert(word.into().to_lowercase(), tag);
    }

    /// Add `word<TAB>PENN_TAG` lines from a file. Blank lines and `#` comments are skipped.
    pub fn extend_from_path<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let file = File::open(path.as_ref())
            .map_err(|e| Error::MissingFile("tagger lexicon", Some(e)))?;
        let mut added = 0;
        for (line_no, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split('\t');
            match (fields.next(), fields.next()) {
                (Some(word), Some(tag)) => {
                    self.insert(word.trim(), PosTag::from_penn(tag.trim()));
                    added += 1;
                }
                _ => warn!("Lexicon line {} has no tag, skipping: {:?}", line_no + 1, line),
            }
        }
        info!("Added {} words from lexicon {}", added, path.as_ref().display());
        Ok(added)
    }

    pub fn lookup(&self, word: &str) -> PosTag {
        let lower = word.to_lowercase();
        match self.lexicon.get(&lower) {
            Some(tag) => *tag,
            None => infer_tag(&lower),
        }
    }

    fn load_default_lexicon(&mut self) {
        for word in ["the", "a", "an", "this", "that", "these", "those", "my", "your", "his",
                     "her", "its", "our", "their", "some", "any", "no", "every", "each", "all",
                     "both", "another"].iter() {
            self.insert(*word, PosTag::Determiner);
        }
        for word in ["in", "on", "at", "to", "for", "with", "by", "from", "of", "about", "into",
                     "over", "under", "like", "without", "than", "as", "if", "because"].iter() {
            self.insert(*word, PosTag::Preposition);
        }
        for word in ["i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them",
                     "mine", "yours", "myself", "yourself", "who", "what"].iter() {
            self.insert(*word, PosTag::Pronoun);
        }
        for word in ["and", "or", "but", "nor", "yet", "so"].iter() {
            self.insert(*word, PosTag::Conjunction);
        }
        for word in ["is", "are", "was", "were", "be", "been", "am", "have", "has", "had", "do",
                     "does", "did", "can", "could", "will", "would", "should", "may", "might",
                     "must", "wear", "wears", "wore", "worn", "love", "get", "got", "buy",
                     "bought", "go", "think", "look", "looks"].iter() {
            self.insert(*word, PosTag::Verb);
        }
        for word in ["very", "really", "too", "just", "only", "also", "always", "never",
                     "usually", "often", "sometimes", "still", "even", "probably", "definitely",
                     "not", "here", "there", "now", "then"].iter() {
            self.insert(*word, PosTag::Adverb);
        }
        for word in ["better", "nicer", "darker", "lighter", "looser", "tighter", "longer",
                     "shorter", "more", "less"].iter() {
            self.insert(*word, PosTag::GradedAdjective);
        }
        for word in ["best", "nicest", "most", "least"].iter() {
            self.insert(*word, PosTag::GradedAdjective);
        }
        // Colours, fits and the usual dress-code words
        for word in ["new", "old", "good", "bad", "nice", "great", "cute", "pretty", "plain",
                     "simple", "classic", "casual", "formal", "professional", "appropriate",
                     "neutral", "black", "white", "grey", "gray", "navy", "blue", "red", "green",
                     "brown", "beige", "tan", "pink", "cream", "dark", "light", "bright", "long",
                     "short", "tall", "flat", "high", "low", "loose", "tight", "slim", "wide",
                     "straight", "oversized", "fitted", "cropped", "sleeveless", "knit", "silk",
                     "wool", "cotton", "linen", "leather", "denim", "sexy", "sensible",
                     "conservative", "normal", "regular", "basic", "nude", "patterned",
                     "striped", "floral", "solid", "warm", "cold", "cheap", "expensive",
                     "little", "big", "small", "full", "modest", "open", "closed"].iter() {
            self.insert(*word, PosTag::Adjective);
        }
    }
}

impl PosTagger for LexiconTagger {
    fn tag(&self, tokens: &[&str]) -> Result<Vec<Tagged>> {
        Ok(tokens.iter()
            .map(|&word| Tagged { word: word.to_string(), tag: self.lookup(word) })
            .collect())
    }
}

/// Guess the tag of a word the lexicon doesn't know
fn infer_tag(word: &str) -> PosTag {
    if !word.is_empty() && word.chars().all(|c| c.is_numeric()) {
        return PosTag::Number;
    }
    if word.ends_with("ly") {
        return PosTag::Adverb;
    }
    if word.ends_with("ing") || word.ends_with("ed") {
        return PosTag::Verb;
    }
    if word.ends_with("ness") || word.ends_with("tion") || word.ends_with("ment")
        || word.ends_with("ity") {
        return PosTag::Noun;
    }
    if word.ends_with("ful") || word.ends_with("less") || word.ends_with("ous")
        || word.ends_with("ive") || word.ends_with("able") || word.ends_with("ible")
        || word.ends_with("ish") || word.ends_with("al") || word.ends_with("ic") {
        return PosTag::Adjective;
    }
    PosTag::Noun
}
