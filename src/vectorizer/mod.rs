pub mod analyzer;
pub mod compare;
pub mod corpus;
pub mod term;
pub mod tfidf;

use std::marker::PhantomData;

use num::Num;

use crate::{error::{Error, Result}, utils::math::vector::ZeroSpVec, vectorizer::{analyzer::Analyzer, corpus::Corpus, term::TermFrequency, tfidf::{DefaultTFIDFEngine, TFIDFEngine}}};

/// TF-IDF feature space over one category's documents.
///
/// The vocabulary is induced from the documents passed to [`FeatureSpace::fit`]
/// and nothing else: two feature spaces never share term dimensions.
/// Vector `i` belongs to the `i`-th input document.
///
/// `FeatureSpace<N, E>` has the following generic parameters:
/// - `N`: weight type (`f32` or `f64` with the default engine)
/// - `E`: TF-IDF calculation engine
#[derive(Debug, Clone)]
pub struct FeatureSpace<N = f64, E = DefaultTFIDFEngine>
where
    N: Num + Copy,
    E: TFIDFEngine<N>,
{
    corpus: Corpus,
    idf: Vec<N>,
    vectors: Vec<ZeroSpVec<N>>,
    _marker: PhantomData<E>,
}

impl<N, E> FeatureSpace<N, E>
where
    N: Num + Copy,
    E: TFIDFEngine<N>,
{
    /// Build the vocabulary and one TF-IDF vector per document.
    ///
    /// # Errors
    /// `EmptyCorpus` when `docs` is empty or every document is empty after
    /// stop-word removal.
    pub fn fit<S>(docs: &[S], analyzer: &Analyzer) -> Result<Self>
    where
        S: AsRef<str>,
    {
        if docs.is_empty() {
            return Err(Error::EmptyCorpus { category: None });
        }

        let freqs: Vec<TermFrequency> = docs.iter().map(|d| analyzer.analyze(d.as_ref())).collect();
        let mut corpus = Corpus::new();
        for freq in &freqs {
            corpus.add_doc(freq);
        }
        if corpus.vocab_size() == 0 {
            return Err(Error::EmptyCorpus { category: None });
        }

        let idf = E::idf_vec(&corpus);
        let vectors = freqs
            .iter()
            .map(|freq| {
                let mut v = E::tf_idf_vec(freq, &corpus, &idf);
                v.shrink_to_fit();
                v
            })
            .collect();

        Ok(Self {
            corpus,
            idf,
            vectors,
            _marker: PhantomData,
        })
    }

    /// number of documents
    #[inline]
    pub fn doc_num(&self) -> usize {
        self.vectors.len()
    }

    /// vocabulary size
    #[inline]
    pub fn dim(&self) -> usize {
        self.corpus.vocab_size()
    }

    /// (documents, vocabulary)
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.doc_num(), self.dim())
    }

    /// Terms in dimension order
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.corpus.iter().map(|(term, _)| term)
    }

    #[inline]
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.corpus.term_index(term)
    }

    #[inline]
    pub fn idf(&self) -> &[N] {
        &self.idf
    }

    #[inline]
    pub fn vector(&self, doc: usize) -> Option<&ZeroSpVec<N>> {
        self.vectors.get(doc)
    }

    #[inline]
    pub fn vectors(&self) -> &[ZeroSpVec<N>] {
        &self.vectors
    }

    /// true when document `doc` has no weighted term (empty or only stop words)
    #[inline]
    pub fn is_degenerate(&self, doc: usize) -> bool {
        self.vectors.get(doc).map_or(true, ZeroSpVec::is_all_zero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_is_first_seen_order_without_stop_words() {
        let space: FeatureSpace = FeatureSpace::fit(&["the cat and dog", "finance of bank", "cat"], &Analyzer::default()).unwrap();
        assert_eq!(space.vocabulary().collect::<Vec<_>>(), vec!["cat", "dog", "finance", "bank"]);
        assert_eq!(space.shape(), (3, 4));
        assert_eq!(space.term_index("bank"), Some(3));
        assert_eq!(space.term_index("the"), None);
    }

    #[test]
    fn weights_are_non_negative_and_category_scoped() {
        let space: FeatureSpace = FeatureSpace::fit(&["cat dog", "cat dog", "finance bank"], &Analyzer::default()).unwrap();
        for v in space.vectors() {
            assert_eq!(v.len(), 4);
            assert!(v.raw_iter().all(|(_, w)| *w > 0.0));
        }
        // cat appears in 2 of 3 documents, finance in 1 of 3
        let cat = space.idf()[0];
        let finance = space.idf()[2];
        assert!(finance > cat);
    }

    #[test]
    fn stop_word_only_document_is_degenerate() {
        let space: FeatureSpace<f32> = FeatureSpace::fit(&["", "robot ai", "the of and"], &Analyzer::default()).unwrap();
        assert!(space.is_degenerate(0));
        assert!(!space.is_degenerate(1));
        assert!(space.is_degenerate(2));
        assert_eq!(space.vector(0).map(|v| v.len()), Some(2));
    }

    #[test]
    fn empty_input_is_an_error() {
        let docs: [&str; 0] = [];
        let res: Result<FeatureSpace> = FeatureSpace::fit(&docs, &Analyzer::default());
        assert!(matches!(res, Err(Error::EmptyCorpus { category: None })));
    }

    #[test]
    fn empty_vocabulary_is_an_error() {
        let res: Result<FeatureSpace> = FeatureSpace::fit(&["", "the and", "  "], &Analyzer::default());
        assert!(matches!(res, Err(Error::EmptyCorpus { .. })));
    }
}
