use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// No documents, or no terms left after stop-word removal.
    #[error("empty corpus{}", category_suffix(.category))]
    EmptyCorpus { category: Option<String> },

    #[error("unknown category {category:?}: not present in the document table")]
    UnknownCategory { category: String },

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("document table is missing required column {column:?}")]
    MissingColumn { column: String },

    #[error("malformed document table at line {line}: {reason}")]
    MalformedTable { line: usize, reason: String },

    #[error("similarity threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f64),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

fn category_suffix(category: &Option<String>) -> String {
    match category {
        Some(c) => format!(" for category {c:?}"),
        None => String::new(),
    }
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }

    /// Attach a category label to an `EmptyCorpus` that has none.
    pub fn in_category(self, label: &str) -> Self {
        match self {
            Error::EmptyCorpus { category: None } => Error::EmptyCorpus {
                category: Some(label.to_string()),
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_corpus_message_names_category() {
        let err = Error::EmptyCorpus { category: None }.in_category("sport");
        assert_eq!(err.to_string(), "empty corpus for category \"sport\"");
        assert_eq!(Error::EmptyCorpus { category: None }.to_string(), "empty corpus");
    }

    #[test]
    fn io_error_carries_path() {
        let err = Error::io("/nope/out.csv", std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(err.to_string().contains("/nope/out.csv"));
    }
}
