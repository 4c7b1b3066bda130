//
// Errors
//
use std::io;
use std::result;
use std::error;
use std::fmt;

/// Type alias for hemline errors
pub type Result<X> = result::Result<X, Error>;

/// Wrapper for many kinds of errors occuring as part of extraction
#[derive(Debug)]
pub enum Error {
    /// The vocabulary table can't decide what a term means
    AmbiguousVocabulary { term: String, reason: String },
    /// A mention names a term the vocabulary table doesn't contain
    UnknownItem(String),
    /// The part of speech tagger gave up on a sentence
    Tagger(String),
    /// One post could not be fetched or parsed
    Source { post_id: String, msg: String },
    IOError(io::Error),
    CsvError(csv::Error),
    JsonError(serde_json::Error),
    RegexError(regex::Error),
    MissingFile(&'static str, Option<io::Error>),
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::AmbiguousVocabulary { ref term, ref reason } =>
                write!(f, "Ambiguous vocabulary term {:?}: {}", term, reason),
            Error::UnknownItem(ref term) =>
                write!(f, "Term {:?} is not in the vocabulary table", term),
            Error::Tagger(ref info) => write!(f, "Tagger error: {}", info),
            Error::Source { ref post_id, ref msg } =>
                write!(f, "Could not read post {}: {}", post_id, msg),
            Error::IOError(ref err) => write!(f, "IO error: {}", err),
            Error::CsvError(ref err) => write!(f, "CSV error: {}", err),
            Error::JsonError(ref err) => write!(f, "JSON error: {}", err),
            Error::RegexError(ref err) => write!(f, "Regex error: {}", err),
            Error::MissingFile(ref info, ref opt_err) => {
                write!(f,
                    "The {} must already exist at this point but there was a problem opening it. \
                    Wrong directory? Maybe missed a step? The OS error was: ",
                    info)?;
                if let Some(ref err) = *opt_err { write!(f, "{}", err) }
                else { write!(f, "Unknown") }
            },
            Error::Other(ref info) => write!(f, "{}", info),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::IOError(ref err) => Some(err),
            Error::CsvError(ref err) => Some(err),
            Error::JsonError(ref err) => Some(err),
            Error::RegexError(ref err) => Some(err),
            Error::MissingFile(_, Some(ref err)) => Some(err),
            _ => None,
        }
    }
}

impl Error {
    /// Shorthand for the vocabulary ambiguity variant
    pub fn ambiguous<T: Into<String>, R: Into<String>>(term: T, reason: R) -> Self {
        Error::AmbiguousVocabulary { term: term.into(), reason: reason.into() }
    }
}

//
// Convert everything else into Error
//
impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::IOError(err)
    }
}
impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::CsvError(err)
    }
}
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::JsonError(err)
    }
}
impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::RegexError(err)
    }
}

//
// Convert Error into a general io Error
//
impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        io::Error::new(io::ErrorKind::Other, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn ambiguity_names_the_term() {
        let err = Error::ambiguous("blazer", "singular of blazers and jackets");
        let msg = format!("{}", err);
        assert!(msg.contains("\"blazer\""));
        assert!(msg.contains("blazers and jackets"));
    }

    #[test]
    fn io_errors_keep_their_source() {
        let err: Error = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(err.source().is_some());
        let back: io::Error = Error::Other("nope".into()).into();
        assert_eq!(back.kind(), io::ErrorKind::Other);
    }
}
