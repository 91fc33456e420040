use crate::{
    records::{IngestCategory, IngestRecord},
    IngestError,
};
use serde::Deserialize;
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

/// combined summary as written by the ingest benchmark harness
#[derive(Deserialize, Debug)]
struct IngestSummary {
    #[serde(default)]
    results: Vec<SummaryEntry>,
}

// unknown keys (num_runs, total_records, ...) are ignored on purpose
#[derive(Deserialize, Debug)]
struct SummaryEntry {
    num_records: u64,
    throughput_records_per_second: f64,
    total_time_seconds: f64,
    average_memory_usage_mb: f64,
}

/// location of the summary file for a single category
pub fn summary_path(results_dir: &Path, category: IngestCategory) -> PathBuf {
    results_dir
        .join("ingest")
        .join(format!("encrypt_{}_combined.json", category.as_str()))
}

/// Load all ingest summaries below `<results_dir>/ingest`.
///
/// Categories without a summary file are skipped with a warning. A summary that exists but
/// lacks a required field fails the whole load. Within a category a repeated record count
/// replaces the earlier entry, the returned records are grouped by category (in
/// [`IngestCategory::ALL`] order) and sorted by record count.
pub fn load_ingest_results(results_dir: &Path) -> Result<Vec<IngestRecord>, IngestError> {
    let mut records = Vec::new();

    for category in IngestCategory::ALL {
        let path = summary_path(results_dir, category);

        if !path.is_file() {
            warn!(path = ?path, "{} not found, skipping", path.display());
            continue;
        }

        let content = fs::read_to_string(&path).map_err(|source| IngestError::Read {
            path: path.clone(),
            source,
        })?;

        records.extend(parse_summary(&content, category).map_err(|source| {
            IngestError::MalformedSummary {
                path: path.clone(),
                source,
            }
        })?);
    }

    Ok(records)
}

/// parse the content of a single summary file
pub fn parse_summary(
    content: &str,
    category: IngestCategory,
) -> Result<Vec<IngestRecord>, serde_json::Error> {
    let summary: IngestSummary = serde_json::from_str(content)?;
    let mut by_count = BTreeMap::new();

    for entry in summary.results {
        let previous = by_count.insert(
            entry.num_records,
            IngestRecord {
                category,
                num_records: entry.num_records,
                throughput: entry.throughput_records_per_second,
                total_time: entry.total_time_seconds,
                avg_memory_mb: entry.average_memory_usage_mb,
            },
        );

        if previous.is_some() {
            debug!(
                category = %category,
                num_records = entry.num_records,
                "Duplicate record count, keeping the later entry"
            );
        }
    }

    Ok(by_count.into_values().collect())
}
