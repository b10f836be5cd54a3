use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::vectorizer::term::TermFrequency;

/// keep document count and per-term document frequency for one category
///
/// Terms are stored in first-seen order and their position is their
/// dimension in the feature space.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Corpus {
    /// number of documents added, degenerate ones included
    doc_num: u64,
    /// term -> number of documents containing it
    #[serde(with = "indexmap::map::serde_seq")]
    term_counts: IndexMap<Box<str>, u64>,
}

impl Corpus {
    /// Create a new instance
    pub fn new() -> Self {
        Self {
            doc_num: 0,
            term_counts: IndexMap::new(),
        }
    }

    /// Add a document's distinct terms to the corpus
    pub fn add_set<T>(&mut self, terms: &[T])
    where
        T: AsRef<str>,
    {
        self.doc_num += 1;
        for term in terms {
            let term = term.as_ref();
            if let Some(count) = self.term_counts.get_mut(term) {
                *count += 1;
            } else {
                self.term_counts.insert(term.into(), 1);
            }
        }
    }

    /// Add one document given its term frequency
    pub fn add_doc(&mut self, freq: &TermFrequency) {
        let terms: Vec<&str> = freq.term_set_iter().collect();
        self.add_set(&terms);
    }

    /// Get the number of documents in the corpus
    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Number of documents containing `term`
    #[inline]
    pub fn term_count(&self, term: &str) -> u64 {
        self.term_counts.get(term).copied().unwrap_or(0)
    }

    /// Dimension assigned to `term`
    #[inline]
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.term_counts.get_index_of(term)
    }

    /// Get the current vocabulary size (number of unique terms)
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.term_counts.len()
    }

    /// Terms with their document frequency, in dimension order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.term_counts.iter().map(|(t, &c)| (t.as_ref(), c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_documents_not_occurrences() {
        let mut corpus = Corpus::new();
        corpus.add_doc(&TermFrequency::from(&["cat", "cat", "dog"][..]));
        corpus.add_doc(&TermFrequency::from(&["dog", "bank"][..]));
        corpus.add_doc(&TermFrequency::new());

        assert_eq!(corpus.doc_num(), 3);
        assert_eq!(corpus.term_count("cat"), 1);
        assert_eq!(corpus.term_count("dog"), 2);
        assert_eq!(corpus.term_count("fish"), 0);
        assert_eq!(corpus.vocab_size(), 3);
        assert_eq!(corpus.term_index("bank"), Some(2));
        assert_eq!(corpus.term_index("fish"), None);
    }
}
