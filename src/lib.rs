//! This crate finds near-duplicate documents inside each category of a
//! labeled corpus, using per-category TF-IDF vectors and cosine similarity.
pub mod config;
pub mod dedup;
pub mod error;
pub mod table;
pub mod utils;
pub mod vectorizer;

/// Duplicate Scanner
/// The top-level struct of this crate.
/// For every category of a `DocumentTable` it builds a `FeatureSpace`,
/// compares every document pair of the category with cosine similarity and
/// keeps the pairs at or above the threshold (inclusive).
///
/// Documents whose vector is all-zero (empty text, or nothing but stop
/// words) are never compared and never reported.
///
/// `detect_duplicates` writes `duplicatePairs.csv` once, after every
/// category has been scanned; `scan` returns the same result without writing.
pub use dedup::DuplicateScanner;

/// Category failure policy
/// `Abort` stops the run on the first failing category, `Skip` records it
/// and continues.
pub use dedup::CategoryErrorPolicy;

/// Scan results
/// - `DuplicateReport`: ordered pairs of every scanned category, plus skipped categories
/// - `SimilarityPair`: category, two category-local document ids and their similarity
/// - `CategoryScan`: the result of a single category
pub use dedup::report::{CategoryScan, DuplicateReport, SimilarityPair};

/// TF-IDF Feature Space
/// Converts the documents of one category into sparse TF-IDF vectors.
/// The vocabulary is built from those documents only, so dimensions are
/// never comparable across categories.
///
/// `FeatureSpace<N, E>` has the following generic parameters:
/// - `N`: weight type (`f32`, `f64`)
/// - `E`: TF-IDF calculation engine (e.g., `DefaultTFIDFEngine`)
pub use vectorizer::FeatureSpace;

/// TF IDF Calculation Engine Trait
/// By implementing this trait, you can plug different weighting strategies
/// into `FeatureSpace<N, E>`.
/// `DefaultTFIDFEngine` uses the raw term count as TF and a smoothed IDF,
/// `ln((1 + n) / (1 + df)) + 1`.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// Vector comparison
/// `DefaultCompare` provides dot product and cosine similarity over sparse vectors.
pub use vectorizer::compare::{Compare, DefaultCompare};

/// Text analysis
/// `Analyzer` lowercases, splits on non-alphanumeric characters and drops
/// stop words. `StopWords::english()` is the built-in list.
pub use vectorizer::analyzer::{Analyzer, StopWords};

/// Term Frequency structure
/// Counts term occurrences of one document.
pub use vectorizer::term::TermFrequency;

/// Corpus
/// Document count and per-term document frequency of one category.
pub use vectorizer::corpus::Corpus;

/// Document table
/// Tab-separated `Category` / `Content` table, partitioned by category with
/// category-local row indices.
pub use table::{Document, DocumentTable};

/// Sparse vector with implicit zeros.
pub use utils::math::vector::ZeroSpVec;

pub use config::DedupConfig;
pub use error::{Error, Result};
