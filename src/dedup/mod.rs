pub mod report;

use std::{fs, path::{Path, PathBuf}};

use indexmap::IndexSet;
use num::Num;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::{
    dedup::report::{CategoryScan, DuplicateReport, SimilarityPair, REPORT_FILE_NAME},
    error::{Error, Result},
    table::DocumentTable,
    vectorizer::{analyzer::Analyzer, compare::{Compare, DefaultCompare}, tfidf::TFIDFEngine, FeatureSpace},
};

/// What a failing category does to the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryErrorPolicy {
    /// the first failure aborts the run and no report is written
    #[default]
    Abort,
    /// the category is logged, recorded in `DuplicateReport::skipped` and left out
    Skip,
}

/// All pairs `(i, j, similarity)` with `i < j` and `similarity >= threshold`,
/// in ascending `(i, j)` order.
///
/// All-zero vectors are skipped before any arithmetic.
pub fn find_pairs<N, E, C>(space: &FeatureSpace<N, E>, threshold: f64) -> Vec<(usize, usize, f64)>
where
    N: Num + Copy,
    E: TFIDFEngine<N>,
    C: Compare<N>,
{
    let vectors = space.vectors();
    let mut pairs = Vec::new();
    for (i, vec_i) in vectors.iter().enumerate() {
        if vec_i.is_all_zero() {
            trace!(doc = i, "degenerate document excluded");
            continue;
        }
        for (j, vec_j) in vectors.iter().enumerate().skip(i + 1) {
            if vec_j.is_all_zero() {
                continue;
            }
            let similarity = C::cosine_similarity(vec_i, vec_j);
            if similarity >= threshold {
                pairs.push((i, j, similarity));
            }
        }
    }
    pairs
}

/// Finds near-duplicate documents inside every category of a document table.
///
/// Each category gets its own [`FeatureSpace`]; documents are only compared
/// with documents of the same category.
#[derive(Debug, Clone)]
pub struct DuplicateScanner<'a> {
    table: &'a DocumentTable,
    output_dir: PathBuf,
    threshold: f64,
    categories: Option<Vec<String>>,
    analyzer: Analyzer,
    include_category: bool,
    parallel: bool,
    on_category_error: CategoryErrorPolicy,
}

impl<'a> DuplicateScanner<'a> {
    /// # Errors
    /// `InvalidThreshold` when `threshold` is NaN or outside `[0, 1]`.
    pub fn new(table: &'a DocumentTable, output_dir: impl Into<PathBuf>, threshold: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(Error::InvalidThreshold(threshold));
        }
        Ok(Self {
            table,
            output_dir: output_dir.into(),
            threshold,
            categories: None,
            analyzer: Analyzer::default(),
            include_category: false,
            parallel: false,
            on_category_error: CategoryErrorPolicy::default(),
        })
    }

    /// Scan only these labels, in this order.
    /// Without it every category of the table is scanned in first-appearance order.
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_analyzer(mut self, analyzer: Analyzer) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Add a leading `Category` column to the written report.
    pub fn include_category(mut self, include: bool) -> Self {
        self.include_category = include;
        self
    }

    /// Scan categories on the rayon pool. Output order is unchanged.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn on_category_error(mut self, policy: CategoryErrorPolicy) -> Self {
        self.on_category_error = policy;
        self
    }

    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    #[inline]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(REPORT_FILE_NAME)
    }

    /// Scan every category and write the report once.
    ///
    /// Nothing is written when the scan fails.
    pub fn detect_duplicates(&self) -> Result<DuplicateReport> {
        let report = self.scan()?;
        fs::create_dir_all(&self.output_dir).map_err(|e| Error::io(&self.output_dir, e))?;
        let path = self.report_path();
        report.write_atomic(&path, self.include_category)?;
        info!(
            path = %path.display(),
            pairs = report.len(),
            categories = report.scanned().len(),
            skipped = report.skipped().len(),
            "duplicate report written"
        );
        Ok(report)
    }

    /// Scan every category without writing anything.
    pub fn scan(&self) -> Result<DuplicateReport> {
        let categories = self.resolve_categories()?;
        debug!(threshold = self.threshold, categories = categories.len(), parallel = self.parallel, "scan started");

        let scans: Vec<Result<CategoryScan>> = if self.parallel {
            categories.par_iter().map(|c| self.scan_category(c)).collect()
        } else {
            let mut scans = Vec::with_capacity(categories.len());
            for category in &categories {
                let scan = self.scan_category(category);
                let abort = scan.is_err() && self.on_category_error == CategoryErrorPolicy::Abort;
                scans.push(scan);
                if abort {
                    break;
                }
            }
            scans
        };

        let mut report = DuplicateReport::new();
        for (category, scan) in categories.iter().zip(scans) {
            match scan {
                Ok(scan) => {
                    report.merge(scan);
                }
                Err(err) => match self.on_category_error {
                    CategoryErrorPolicy::Abort => return Err(err),
                    CategoryErrorPolicy::Skip => {
                        warn!(category = %category, error = %err, "category skipped");
                        report.skip(category.as_str(), err.to_string());
                    }
                },
            }
        }
        Ok(report)
    }

    /// Scan one category of the table.
    ///
    /// # Errors
    /// `UnknownCategory` when the label is not in the table,
    /// `EmptyCorpus` when its documents yield no vocabulary.
    pub fn scan_category(&self, label: &str) -> Result<CategoryScan> {
        let docs = self.table.partition(label).ok_or_else(|| Error::UnknownCategory {
            category: label.to_string(),
        })?;
        let contents: Vec<&str> = docs.iter().map(|d| d.content.as_str()).collect();
        let space: FeatureSpace = FeatureSpace::fit(&contents, &self.analyzer).map_err(|e| e.in_category(label))?;
        let (doc_num, dim) = space.shape();
        let degenerate = (0..doc_num).filter(|&i| space.is_degenerate(i)).count();
        info!(category = %label, documents = doc_num, vocabulary = dim, degenerate, "feature space built");

        let pairs: Vec<SimilarityPair> = find_pairs::<_, _, DefaultCompare>(&space, self.threshold)
            .into_iter()
            .map(|(i, j, similarity)| SimilarityPair {
                category: label.to_string(),
                doc_id1: docs[i].index,
                doc_id2: docs[j].index,
                similarity,
            })
            .collect();
        info!(category = %label, pairs = pairs.len(), "category scanned");

        Ok(CategoryScan {
            category: label.to_string(),
            doc_num,
            dim,
            degenerate,
            pairs,
        })
    }

    /// Requested labels are checked up front: an empty table has nothing to
    /// scan for them, and a label missing from a non-empty table is unknown.
    /// A label requested twice is scanned once, at its first position.
    fn resolve_categories(&self) -> Result<Vec<String>> {
        match &self.categories {
            None => Ok(self.table.categories().map(str::to_string).collect()),
            Some(requested) => {
                let requested: IndexSet<&String> = requested.iter().collect();
                for &label in &requested {
                    if self.table.is_empty() {
                        return Err(Error::EmptyCorpus {
                            category: Some(label.clone()),
                        });
                    }
                    if !self.table.contains_category(label) {
                        return Err(Error::UnknownCategory {
                            category: label.clone(),
                        });
                    }
                }
                Ok(requested.into_iter().cloned().collect())
            }
        }
    }
}
