use std::{fs, io::{self, BufWriter, Write}, path::Path};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Error, Result};

/// file name of the report inside the output directory
pub const REPORT_FILE_NAME: &str = "duplicatePairs.csv";

const HEADER: [&str; 3] = ["Document_ID1", "Document_ID2", "Similarity"];

/// One near-duplicate pair, `doc_id1 < doc_id2`.
/// The ids are row positions inside `category`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityPair {
    pub category: String,
    pub doc_id1: usize,
    pub doc_id2: usize,
    pub similarity: f64,
}

/// Result of scanning one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScan {
    pub category: String,
    /// number of documents in the category
    pub doc_num: usize,
    /// vocabulary size of the category
    pub dim: usize,
    /// documents without any weighted term
    pub degenerate: usize,
    /// pairs in ascending (doc_id1, doc_id2) order
    pub pairs: Vec<SimilarityPair>,
}

/// A category left out under the skip policy.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedCategory {
    pub category: String,
    pub reason: String,
}

/// Every retained pair across all scanned categories, in discovery order:
/// category order, then `doc_id1`, then `doc_id2`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DuplicateReport {
    pairs: Vec<SimilarityPair>,
    scanned: Vec<String>,
    skipped: Vec<SkippedCategory>,
}

impl DuplicateReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one category's result after everything merged so far.
    pub fn merge(&mut self, scan: CategoryScan) -> &mut Self {
        self.scanned.push(scan.category);
        self.pairs.extend(scan.pairs);
        self
    }

    pub fn skip(&mut self, category: impl Into<String>, reason: impl Into<String>) -> &mut Self {
        self.skipped.push(SkippedCategory {
            category: category.into(),
            reason: reason.into(),
        });
        self
    }

    #[inline]
    pub fn pairs(&self) -> &[SimilarityPair] {
        &self.pairs
    }

    /// Pairs found in one category
    pub fn pairs_in<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a SimilarityPair> + 'a {
        self.pairs.iter().filter(move |p| p.category == category)
    }

    /// Categories that were scanned, in order
    #[inline]
    pub fn scanned(&self) -> &[String] {
        &self.scanned
    }

    #[inline]
    pub fn skipped(&self) -> &[SkippedCategory] {
        &self.skipped
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Write the tab-separated report.
    ///
    /// The legacy layout has three columns and no category; with
    /// `include_category` a leading `Category` column is added.
    /// Similarity is printed as the shortest string that parses back to the
    /// same `f64`, always with a fractional part.
    pub fn write_to<W: Write>(&self, writer: &mut W, include_category: bool) -> io::Result<()> {
        if include_category {
            write!(writer, "Category\t")?;
        }
        writeln!(writer, "{}", HEADER.join("\t"))?;
        for pair in &self.pairs {
            if include_category {
                write!(writer, "{}\t", pair.category)?;
            }
            writeln!(writer, "{}\t{}\t{:?}", pair.doc_id1, pair.doc_id2, pair.similarity)?;
        }
        Ok(())
    }

    pub fn to_tsv_string(&self, include_category: bool) -> String {
        let mut buf = Vec::new();
        // writing into a Vec cannot fail
        let _ = self.write_to(&mut buf, include_category);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Write the report to `path` in one step: a temporary file is filled in
    /// the same directory and then renamed over `path`.
    pub fn write_atomic(&self, path: &Path, include_category: bool) -> Result<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;

        let mut temp = NamedTempFile::new_in(parent).map_err(|e| Error::io(parent, e))?;
        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            self.write_to(&mut writer, include_category)
                .and_then(|_| writer.flush())
                .map_err(|e| Error::io(path, e))?;
        }
        temp.persist(path).map_err(|e| Error::io(path, e.error))?;
        debug!(path = %path.display(), pairs = self.len(), "report written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(category: &str, doc_id1: usize, doc_id2: usize, similarity: f64) -> SimilarityPair {
        SimilarityPair {
            category: category.to_string(),
            doc_id1,
            doc_id2,
            similarity,
        }
    }

    fn scan(category: &str, pairs: Vec<SimilarityPair>) -> CategoryScan {
        CategoryScan {
            category: category.to_string(),
            doc_num: 2,
            dim: 2,
            degenerate: 0,
            pairs,
        }
    }

    #[test]
    fn empty_report_is_header_only() {
        assert_eq!(DuplicateReport::new().to_tsv_string(false), "Document_ID1\tDocument_ID2\tSimilarity\n");
    }

    #[test]
    fn colliding_indices_from_two_categories_are_both_kept() {
        let mut report = DuplicateReport::new();
        report.merge(scan("a", vec![pair("a", 0, 1, 1.0)]));
        report.merge(scan("b", vec![pair("b", 0, 1, 1.0)]));
        assert_eq!(report.len(), 2);
        assert_eq!(
            report.to_tsv_string(false),
            "Document_ID1\tDocument_ID2\tSimilarity\n0\t1\t1.0\n0\t1\t1.0\n"
        );
        assert_eq!(
            report.to_tsv_string(true),
            "Category\tDocument_ID1\tDocument_ID2\tSimilarity\na\t0\t1\t1.0\nb\t0\t1\t1.0\n"
        );
        assert_eq!(report.pairs_in("b").count(), 1);
        assert_eq!(report.scanned(), ["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn similarity_text_parses_back_exactly() {
        let s = 0.1f64 + 0.2;
        let mut report = DuplicateReport::new();
        report.merge(scan("a", vec![pair("a", 3, 9, s)]));
        let text = report.to_tsv_string(false);
        let row = text.lines().nth(1).unwrap();
        let value: f64 = row.split('\t').nth(2).unwrap().parse().unwrap();
        assert_eq!(value, s);
    }

    #[test]
    fn write_atomic_replaces_existing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(REPORT_FILE_NAME);
        fs::write(&path, "stale").unwrap();

        DuplicateReport::new().write_atomic(&path, false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Document_ID1\tDocument_ID2\tSimilarity\n");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
