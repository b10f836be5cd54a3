//! Layered run configuration.
//!
//! Uses Figment to merge built-in defaults, an optional TOML file and
//! `DEDUP_*` environment variables, in that order.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::{dedup::{CategoryErrorPolicy, DuplicateScanner}, error::{Error, Result}, table::DocumentTable};

/// TOML file read when no explicit path is given
pub const DEFAULT_CONFIG_FILE: &str = "dedup.toml";
/// prefix of environment overrides, e.g. `DEDUP_THRESHOLD=0.8`
pub const ENV_PREFIX: &str = "DEDUP_";

const TRAIN_SET: &str = "train_set.csv";
const PROCESSED_TRAIN_SET: &str = "processed_train_set.csv";
const DUPLICATES_OUT_DIR: &str = "duplicates_out_dir";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    /// directory holding the tab-separated training set
    pub datasets: PathBuf,
    /// root of all outputs; the report goes to `<outputs>/duplicates_out_dir/`
    pub outputs: PathBuf,
    /// inclusive cosine similarity threshold in `[0, 1]`
    pub threshold: f64,
    /// labels to scan; every category of the table when absent
    pub categories: Option<Vec<String>>,
    /// read the preprocessed training set instead of the raw one
    pub cache: bool,
    /// add a `Category` column to the report
    pub include_category: bool,
    /// scan categories in parallel
    pub parallel: bool,
    pub on_category_error: CategoryErrorPolicy,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            datasets: PathBuf::from("datasets"),
            outputs: PathBuf::from("outputs"),
            threshold: 0.7,
            categories: None,
            cache: false,
            include_category: false,
            parallel: false,
            on_category_error: CategoryErrorPolicy::Abort,
        }
    }
}

impl DedupConfig {
    /// Defaults, then `path` (or `dedup.toml`) if it exists, then `DEDUP_*`.
    pub fn figment(path: Option<&Path>) -> Figment {
        let file = path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), Path::to_path_buf);
        Figment::from(Serialized::defaults(DedupConfig::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::from_figment(Self::figment(path))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Self = figment.extract().map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::InvalidThreshold(self.threshold));
        }
        if let Some(categories) = &self.categories {
            if categories.iter().any(|c| c.is_empty()) {
                return Err(Error::Config("category labels must not be empty".to_string()));
            }
        }
        Ok(())
    }

    /// `<datasets>/train_set.csv`, or `processed_train_set.csv` with `cache`
    pub fn input_file(&self) -> PathBuf {
        self.datasets.join(if self.cache { PROCESSED_TRAIN_SET } else { TRAIN_SET })
    }

    /// `<outputs>/duplicates_out_dir`
    pub fn output_dir(&self) -> PathBuf {
        self.outputs.join(DUPLICATES_OUT_DIR)
    }

    /// A scanner over `table` with every setting of this configuration applied.
    pub fn scanner<'a>(&self, table: &'a DocumentTable) -> Result<DuplicateScanner<'a>> {
        let mut scanner = DuplicateScanner::new(table, self.output_dir(), self.threshold)?
            .include_category(self.include_category)
            .parallel(self.parallel)
            .on_category_error(self.on_category_error);
        if let Some(categories) = &self.categories {
            scanner = scanner.with_categories(categories.iter().cloned());
        }
        Ok(scanner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_extract_without_any_file() {
        figment::Jail::expect_with(|_jail| {
            let config = DedupConfig::load(None).expect("defaults");
            assert_eq!(config, DedupConfig::default());
            Ok(())
        });
    }

    #[test]
    fn toml_then_env_layering() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "dedup.toml",
                r#"
                    threshold = 0.8
                    categories = ["sport", "tech"]
                    on_category_error = "skip"
                    cache = true
                "#,
            )?;
            jail.set_env("DEDUP_THRESHOLD", "0.95");

            let config = DedupConfig::load(None).expect("layered config");
            assert_eq!(config.threshold, 0.95);
            assert_eq!(config.categories, Some(vec!["sport".to_string(), "tech".to_string()]));
            assert_eq!(config.on_category_error, CategoryErrorPolicy::Skip);
            assert_eq!(config.input_file(), PathBuf::from("datasets").join("processed_train_set.csv"));
            assert_eq!(config.output_dir(), PathBuf::from("outputs").join("duplicates_out_dir"));
            Ok(())
        });
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "threshold = 1.2")?;
            let res = DedupConfig::load(Some(Path::new("custom.toml")));
            assert!(matches!(res, Err(Error::InvalidThreshold(_))));
            Ok(())
        });
    }
}
