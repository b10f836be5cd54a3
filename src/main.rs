use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use figment::providers::Serialized;
use serde::Serialize;
use tf_idf_dedup::{DedupConfig, DocumentTable};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Serialize)]
#[command(name = "dedup")]
#[command(about = "Find near-duplicate documents inside each category of a labeled corpus", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML configuration file (default: dedup.toml when present)
    #[arg(short, long)]
    #[serde(skip)]
    config: Option<PathBuf>,

    /// Directory holding train_set.csv
    #[arg(short, long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    datasets: Option<PathBuf>,

    /// Output root; the report goes to <outputs>/duplicates_out_dir/
    #[arg(short, long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    outputs: Option<PathBuf>,

    /// Inclusive cosine similarity threshold in [0, 1]
    #[arg(short, long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    threshold: Option<f64>,

    /// Category to scan; repeat for several. All categories when omitted
    #[arg(long = "category")]
    #[serde(rename = "categories", skip_serializing_if = "Option::is_none")]
    categories: Option<Vec<String>>,

    /// Read processed_train_set.csv instead of train_set.csv
    #[arg(long)]
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    cache: bool,

    /// Add a Category column to the report
    #[arg(long)]
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    include_category: bool,

    /// Scan categories in parallel
    #[arg(long)]
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    parallel: bool,

    /// What a failing category does to the run
    #[arg(long, value_enum)]
    #[serde(skip_serializing_if = "Option::is_none")]
    on_category_error: Option<OnError>,
}

/// Serialized into the `on_category_error` config key
#[derive(Clone, Copy, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum OnError {
    Abort,
    Skip,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let figment = DedupConfig::figment(cli.config.as_deref()).merge(Serialized::defaults(&cli));
    let config = DedupConfig::from_figment(figment).context("Failed to load configuration")?;
    info!(?config, "configuration loaded");

    let input = config.input_file();
    info!(path = %input.display(), "find similar documents");
    let table = DocumentTable::load(&input)
        .with_context(|| format!("Failed to load document table {}", input.display()))?;

    let scanner = config.scanner(&table).context("Invalid scanner settings")?;
    let report = scanner.detect_duplicates().context("Duplicate detection failed")?;

    println!(
        "{} duplicate pairs in {} categories ({} skipped) -> {}",
        report.len(),
        report.scanned().len(),
        report.skipped().len(),
        scanner.report_path().display()
    );
    for skipped in report.skipped() {
        println!("  skipped {}: {}", skipped.category, skipped.reason);
    }
    Ok(())
}
