use crate::{records::QueryRecord, IngestError};
use globset::GlobBuilder;
use ignore::{DirEntry, WalkBuilder};
use itertools::Itertools;
use serde_json::Value;
use std::{
    ffi::OsStr,
    fs,
    num::{NonZeroU64, ParseIntError},
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

/// only files matching this pattern inside `<results>/query` are considered
pub const QUERY_FILE_GLOB: &str = "*.json";
/// separates category and data set size in a file stem, e.g. `ore_rows_5000`
pub const ROWS_DELIMITER: &str = "_rows_";
/// `reason` of the events that carry the final statistics of a benchmark
pub const COMPLETE_REASON: &str = "benchmark-complete";
/// marker inside the second id segment for benchmarks that decrypt their results
pub const DECRYPT_MARKER: &str = "decrypt";
/// tokens that negate a following [`DECRYPT_MARKER`], as in `no_decrypt`
const NEGATIONS: [&str; 2] = ["no", "without"];

/// Whether the function segment of a benchmark id names a decrypting benchmark.
///
/// The segment is split on `_` and `-`, e.g. `exact_decrypt` and `range-decrypt-0` decrypt
/// while `exact` and `no_decrypt` don't.
pub fn is_decrypt_segment(segment: &str) -> bool {
    let tokens = segment.split(['_', '-']).collect_vec();

    tokens.iter().enumerate().any(|(index, token)| {
        token.contains(DECRYPT_MARKER)
            && (index == 0 || !NEGATIONS.contains(&tokens[index - 1].to_lowercase().as_str()))
    })
}

/// Split a file stem into an upper-cased category and its data set size.
///
/// Stems without exactly one [`ROWS_DELIMITER`] yield `Ok(None)`, a size segment that is not
/// a positive integer is an error.
pub fn parse_file_stem(stem: &str) -> Result<Option<(String, u64)>, ParseIntError> {
    match stem.split(ROWS_DELIMITER).collect_tuple() {
        Some((category, size)) => {
            let size: NonZeroU64 = size.parse()?;

            Ok(Some((category.to_uppercase(), size.get())))
        }
        None => Ok(None),
    }
}

/// Turn a single line of a criterion message stream into a record.
///
/// Everything that isn't a well formed completion event is dropped.
pub fn parse_event(line: &str, category: &str, row_count: u64) -> Option<QueryRecord> {
    let line = line.trim();

    if line.is_empty() {
        return None;
    }

    let event: Value = serde_json::from_str(line).ok()?;

    if event.get("reason").and_then(Value::as_str) != Some(COMPLETE_REASON) {
        return None;
    }

    // "<GROUP>/<function>/<scenario>/<rows>"
    let id = event.get("id").and_then(Value::as_str).unwrap_or_default();
    let segments = id.split('/').collect_vec();

    if segments.len() < 3 {
        debug!(id = id, "Skipping completion event with malformed id");
        return None;
    }

    Some(QueryRecord {
        category: category.to_owned(),
        variant: segments[2].to_owned(),
        row_count,
        decrypt: is_decrypt_segment(segments[1]),
        mean_ns: estimate(&event, "/mean/estimate"),
        median_ns: estimate(&event, "/median/estimate"),
    })
}

fn estimate(event: &Value, pointer: &str) -> f64 {
    event
        .pointer(pointer)
        .and_then(Value::as_f64)
        .unwrap_or_default()
}

/// find all candidate files directly inside `query_dir`, sorted by path
fn query_files(query_dir: &Path) -> Result<Vec<PathBuf>, IngestError> {
    let matcher = GlobBuilder::new(QUERY_FILE_GLOB)
        .literal_separator(true)
        .build()?
        .compile_matcher();

    Ok(WalkBuilder::new(query_dir)
        .max_depth(Some(1))
        .standard_filters(false)
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(error) => {
                warn!(error = ?error, "Failed to list query results: {error}");
                None
            }
        })
        .map(DirEntry::into_path)
        // follows symlinks, unlike the entry's own file type
        .filter(|path| path.is_file())
        .filter(|path| path.file_name().map_or(false, |name| matcher.is_match(name)))
        .sorted()
        .collect_vec())
}

/// Load every query result file below `<results_dir>/query`.
///
/// Garbled lines and files that don't follow the `<category>_rows_<size>.json` naming are
/// skipped, only a size segment that isn't a number aborts the load.
pub fn load_query_results(results_dir: &Path) -> Result<Vec<QueryRecord>, IngestError> {
    let query_dir = results_dir.join("query");

    if !query_dir.is_dir() {
        warn!(path = ?query_dir, "{} not found, skipping", query_dir.display());
        return Ok(Vec::new());
    }

    let mut records = Vec::new();

    for path in query_files(&query_dir)? {
        let Some(stem) = path.file_stem().and_then(OsStr::to_str) else {
            continue;
        };

        let (category, row_count) = match parse_file_stem(stem) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => continue,
            Err(source) => {
                return Err(IngestError::InvalidSize {
                    size: stem
                        .split_once(ROWS_DELIMITER)
                        .map(|(_, size)| size.to_owned())
                        .unwrap_or_default(),
                    path,
                    source,
                })
            }
        };

        let content = match fs::read(&path) {
            Ok(content) => content,
            Err(error) => {
                warn!(path = ?path, error = ?error, "Failed to read query results, skipping");
                continue;
            }
        };

        let before = records.len();
        records.extend(
            String::from_utf8_lossy(&content)
                .lines()
                .filter_map(|line| parse_event(line, &category, row_count)),
        );

        debug!(
            path = ?path,
            "Found {} completion events for {category} at {row_count} rows",
            records.len() - before
        );
    }

    Ok(records)
}
