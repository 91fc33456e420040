pub mod events;
pub mod records;
pub mod summary;

#[cfg(test)]
mod summary_test;

pub use events::load_query_results;
pub use records::{IngestCategory, IngestRecord, QueryRecord};
pub use summary::load_ingest_results;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to read {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse ingest summary {path:?}")]
    MalformedSummary {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Query result file {path:?} has an invalid data set size '{size}'")]
    InvalidSize {
        path: PathBuf,
        size: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Invalid result file pattern")]
    Pattern(#[from] globset::Error),
}
