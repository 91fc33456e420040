use crate::{
    records::IngestCategory,
    summary::{load_ingest_results, parse_summary, summary_path},
    IngestError,
};
use std::{fs, path::Path};
use tempfile::TempDir;

const INT_SUMMARY: &str = r#"{
  "results": [
    {
      "num_records": 10000,
      "total_time_seconds": 0.2222,
      "total_records": 10000,
      "throughput_records_per_second": 45000.0,
      "average_memory_usage_bytes": 52428800,
      "average_memory_usage_mb": 50.0,
      "num_runs": 3
    },
    {
      "num_records": 1000,
      "total_time_seconds": 0.02,
      "total_records": 1000,
      "throughput_records_per_second": 50000.0,
      "average_memory_usage_bytes": 31457280,
      "average_memory_usage_mb": 30.0,
      "num_runs": 3
    }
  ]
}"#;

fn write_summary(results_dir: &Path, category: IngestCategory, content: &str) {
    let path = summary_path(results_dir, category);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
pub fn category_names() {
    assert_eq!(IngestCategory::JsonSmall.as_str(), "json_small");
    assert_eq!(IngestCategory::JsonSmall.title(), "Json Small");
    assert_eq!(IngestCategory::Int.title(), "Int");
    assert_eq!(
        summary_path(Path::new("results"), IngestCategory::String),
        Path::new("results/ingest/encrypt_string_combined.json")
    );
}

#[test]
pub fn summary_sorted_by_record_count() {
    let records = parse_summary(INT_SUMMARY, IngestCategory::Int).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].num_records, 1000);
    assert_eq!(records[0].throughput, 50000.0);
    assert_eq!(records[1].num_records, 10000);
    assert_eq!(records[1].avg_memory_mb, 50.0);
    assert!(records
        .iter()
        .all(|record| record.category == IngestCategory::Int));
}

#[test]
pub fn duplicate_record_count_keeps_last() {
    let content = r#"{"results": [
        {"num_records": 5, "throughput_records_per_second": 1.0, "total_time_seconds": 1.0, "average_memory_usage_mb": 1.0},
        {"num_records": 5, "throughput_records_per_second": 2.0, "total_time_seconds": 1.0, "average_memory_usage_mb": 1.0}
    ]}"#;

    let records = parse_summary(content, IngestCategory::String).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].throughput, 2.0);
}

#[test]
pub fn missing_results_key_is_empty() {
    assert!(parse_summary("{}", IngestCategory::Int).unwrap().is_empty());
}

#[test]
pub fn missing_required_field_fails() {
    let content = r#"{"results": [{"num_records": 5, "total_time_seconds": 1.0}]}"#;

    assert!(parse_summary(content, IngestCategory::Int).is_err());
}

#[test]
pub fn load_skips_missing_categories() {
    let dir = TempDir::new().unwrap();
    write_summary(dir.path(), IngestCategory::Int, INT_SUMMARY);

    let records = load_ingest_results(dir.path()).unwrap();

    assert_eq!(records.len(), 2);
    assert!(records
        .iter()
        .all(|record| record.category == IngestCategory::Int));
}

#[test]
pub fn load_keeps_category_order() {
    let dir = TempDir::new().unwrap();
    write_summary(dir.path(), IngestCategory::String, INT_SUMMARY);
    write_summary(dir.path(), IngestCategory::Int, INT_SUMMARY);

    let categories = load_ingest_results(dir.path())
        .unwrap()
        .into_iter()
        .map(|record| record.category)
        .collect::<Vec<_>>();

    assert_eq!(
        categories,
        vec![
            IngestCategory::Int,
            IngestCategory::Int,
            IngestCategory::String,
            IngestCategory::String
        ]
    );
}

#[test]
pub fn load_fails_on_malformed_summary() {
    let dir = TempDir::new().unwrap();
    write_summary(dir.path(), IngestCategory::JsonSmall, r#"{"results": [{}]}"#);

    assert!(matches!(
        load_ingest_results(dir.path()),
        Err(IngestError::MalformedSummary { .. })
    ));
}
