use num::Num;

use crate::{utils::math::vector::ZeroSpVec, vectorizer::{corpus::Corpus, term::TermFrequency}};

pub trait TFIDFEngine<N>
where
    N: Num + Copy,
{
    /// Build the IDF vector
    /// # Arguments
    /// * `corpus` - the category's corpus
    /// # Returns
    /// * `Vec<N>` - one weight per vocabulary dimension, in dimension order
    fn idf_vec(corpus: &Corpus) -> Vec<N>;

    /// Build the TF vector of one document
    /// Terms unknown to `corpus` are ignored
    fn tf_vec(freq: &TermFrequency, corpus: &Corpus) -> ZeroSpVec<N>;

    /// TF * IDF, element-wise over the stored TF entries
    fn tf_idf_vec(freq: &TermFrequency, corpus: &Corpus, idf: &[N]) -> ZeroSpVec<N> {
        let tf = Self::tf_vec(freq, corpus);
        let weighted = tf
            .raw_iter()
            .map(|(idx, &val)| (idx, val * idf[idx]))
            .collect();
        ZeroSpVec::from_pairs(tf.len(), weighted)
    }
}

/// Default TF-IDF engine
/// TF is the raw term count, IDF is smoothed:
/// `idf(t) = ln((1 + n) / (1 + df(t))) + 1`
/// Supports `f32` and `f64`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl DefaultTFIDFEngine {
    pub fn new() -> Self {
        DefaultTFIDFEngine
    }

    #[inline]
    fn smooth_idf(doc_num: u64, doc_freq: u64) -> f64 {
        ((1.0 + doc_num as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
    }

    #[inline]
    fn count_pairs(freq: &TermFrequency, corpus: &Corpus) -> Vec<(usize, u64)> {
        freq.iter()
            .filter_map(|(term, count)| corpus.term_index(term).map(|idx| (idx, count)))
            .collect()
    }
}

impl TFIDFEngine<f64> for DefaultTFIDFEngine {
    fn idf_vec(corpus: &Corpus) -> Vec<f64> {
        let doc_num = corpus.doc_num();
        corpus
            .iter()
            .map(|(_, doc_freq)| Self::smooth_idf(doc_num, doc_freq))
            .collect()
    }

    fn tf_vec(freq: &TermFrequency, corpus: &Corpus) -> ZeroSpVec<f64> {
        let pairs = Self::count_pairs(freq, corpus)
            .into_iter()
            .map(|(idx, count)| (idx, count as f64))
            .collect();
        ZeroSpVec::from_pairs(corpus.vocab_size(), pairs)
    }
}

impl TFIDFEngine<f32> for DefaultTFIDFEngine {
    fn idf_vec(corpus: &Corpus) -> Vec<f32> {
        let doc_num = corpus.doc_num();
        corpus
            .iter()
            .map(|(_, doc_freq)| Self::smooth_idf(doc_num, doc_freq) as f32)
            .collect()
    }

    fn tf_vec(freq: &TermFrequency, corpus: &Corpus) -> ZeroSpVec<f32> {
        let pairs = Self::count_pairs(freq, corpus)
            .into_iter()
            .map(|(idx, count)| (idx, count as f32))
            .collect();
        ZeroSpVec::from_pairs(corpus.vocab_size(), pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus_of(docs: &[&[&str]]) -> Corpus {
        let mut corpus = Corpus::new();
        for doc in docs {
            corpus.add_doc(&TermFrequency::from(*doc));
        }
        corpus
    }

    #[test]
    fn smoothed_idf_matches_formula() {
        let corpus = corpus_of(&[&["cat", "dog"][..], &["cat"][..], &["bank"][..]]);
        let idf: Vec<f64> = <DefaultTFIDFEngine as TFIDFEngine<f64>>::idf_vec(&corpus);
        // n = 3; cat df = 2, dog df = 1, bank df = 1
        assert!((idf[0] - ((4.0f64 / 3.0).ln() + 1.0)).abs() < 1e-12);
        assert!((idf[1] - ((4.0f64 / 2.0).ln() + 1.0)).abs() < 1e-12);
        assert_eq!(idf[1], idf[2]);
    }

    #[test]
    fn term_in_every_document_keeps_weight_one() {
        let corpus = corpus_of(&[&["x"][..], &["x"][..]]);
        let idf: Vec<f32> = <DefaultTFIDFEngine as TFIDFEngine<f32>>::idf_vec(&corpus);
        assert_eq!(idf, vec![1.0f32]);
    }

    #[test]
    fn tf_idf_uses_raw_counts() {
        let corpus = corpus_of(&[&["cat", "dog"][..], &["bank"][..]]);
        let idf: Vec<f64> = <DefaultTFIDFEngine as TFIDFEngine<f64>>::idf_vec(&corpus);
        let freq = TermFrequency::from(&["dog", "dog", "unknown"][..]);
        let v = <DefaultTFIDFEngine as TFIDFEngine<f64>>::tf_idf_vec(&freq, &corpus, &idf);
        assert_eq!(v.len(), 3);
        assert_eq!(v.nnz(), 1);
        assert!((v[1] - 2.0 * idf[1]).abs() < 1e-12);
    }
}
