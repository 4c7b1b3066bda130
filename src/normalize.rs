//! Comment body cleanup
//!
//! Turns a raw comment body into lowercase sentences with no links, punctuation or digits. The
//! sentence split is deliberately crude: a period followed by a line break. Anything else stays
//! in one piece.
use regex::Regex;
use crate::errors::*;

/// Scheme, host and path; everything a link can be made of
const URL_PATTERN: &str =
    r"https?://(?:[a-zA-Z]|[0-9]|[$-_@.&+]|[!*\(\),]|(?:%[0-9a-fA-F][0-9a-fA-F]))+";
const SENTENCE_BREAK: &str = r"\.\r?\n";

/// Precompiled patterns for cleaning comment bodies
#[derive(Debug, Clone)]
pub struct Normalizer {
    url: Regex,
    sentence_break: Regex,
}

impl Normalizer {
    pub fn new() -> Result<Self> {
        Ok(Normalizer {
            url: Regex::new(URL_PATTERN)?,
            sentence_break: Regex::new(SENTENCE_BREAK)?,
        })
    }

    /// Remove every link from the body
    pub fn strip_urls(&self, body: &str) -> String {
        self.url.replace_all(body, "").into_owned()
    }

    /// Clean sentences, in order
    ///
    /// An empty body still gives one (empty) sentence.
    pub fn sentences(&self, body: &str) -> Vec<String> {
        let body = self.strip_urls(body);
        self.sentence_break.split(&body)
            .map(clean_sentence)
            .collect()
    }
}

/// Drop ASCII punctuation and digits, then lowercase
///
/// Applying this twice changes nothing.
pub fn clean_sentence(sentence: &str) -> String {
    sentence.chars()
        .filter(|c| !c.is_ascii_punctuation() && !c.is_ascii_digit())
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> Normalizer {
        Normalizer::new().unwrap()
    }

    #[test]
    fn cleans_one_sentence() {
        assert_eq!(normalizer().sentences("I love my new Black Blazer."),
            vec!["i love my new black blazer"]);
    }

    #[test]
    fn splits_on_period_then_newline() {
        let body = "Wear a Blazer.\nOr 2 cardigans.\r\nNo split. here\nor here";
        assert_eq!(normalizer().sentences(body),
            vec!["wear a blazer", "or  cardigans", "no split here\nor here"]);
    }

    #[test]
    fn links_disappear_before_matching() {
        let body = "Try these https://shop.example.com/black-blazers?id=42 pants";
        assert_eq!(normalizer().sentences(body), vec!["try these  pants"]);
        assert_eq!(normalizer().strip_urls("http://a.io/x"), "");
    }

    #[test]
    fn empty_and_url_only_bodies_give_one_empty_sentence() {
        assert_eq!(normalizer().sentences(""), vec![""]);
        assert_eq!(normalizer().sentences("https://imgur.com/a/XyZ12"), vec![""]);
    }

    #[test]
    fn cleaning_is_idempotent() {
        for raw in &["Don't wear 3 T-shirts!", "a plain sentence", "Ünïcode STAYS, mostly."] {
            let once = clean_sentence(raw);
            assert_eq!(clean_sentence(&once), once);
        }
        assert_eq!(clean_sentence("dont wear  tshirts"), "dont wear  tshirts");
    }

    #[test]
    fn normalizing_twice_changes_nothing() {
        let normalizer = normalizer();
        let body = "My Black Blazer.\nSee https://example.com/a?b=1 for 2 more.\r\nDone";
        let once = normalizer.sentences(body);
        assert_eq!(once.len(), 3);
        for sentence in &once {
            assert_eq!(normalizer.sentences(sentence), vec![sentence.clone()]);
        }
        let rejoined = once.join(".\n");
        assert_eq!(normalizer.sentences(&rejoined), once);
    }
}
