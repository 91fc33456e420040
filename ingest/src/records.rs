use std::fmt;

/// fixed set of ingest benchmark categories, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IngestCategory {
    Int,
    JsonSmall,
    String,
}

impl IngestCategory {
    pub const ALL: [IngestCategory; 3] = [Self::Int, Self::JsonSmall, Self::String];

    /// name as used in summary file names and chart file names
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::JsonSmall => "json_small",
            Self::String => "string",
        }
    }

    /// human readable heading, e.g. `json_small` -> `Json Small`
    pub fn title(&self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Int => "Tests insertion of encrypted integer values.",
            Self::JsonSmall => "Tests insertion of small encrypted JSON objects.",
            Self::String => "Tests insertion of encrypted string values.",
        }
    }
}

impl fmt::Display for IngestCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One observation of insert throughput
#[derive(Debug, Clone, PartialEq)]
pub struct IngestRecord {
    pub category: IngestCategory,
    pub num_records: u64,
    /// records per second
    pub throughput: f64,
    /// seconds
    pub total_time: f64,
    /// megabytes
    pub avg_memory_mb: f64,
}

/// One observation of query latency
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRecord {
    /// upper-cased tag taken from the file name, e.g. `ORE`
    pub category: String,
    /// scenario segment of the benchmark id, e.g. `range_gt_10`
    pub variant: String,
    pub row_count: u64,
    /// whether result values were decrypted
    pub decrypt: bool,
    pub mean_ns: f64,
    pub median_ns: f64,
}

impl QueryRecord {
    /// mean latency in milliseconds
    pub fn mean_ms(&self) -> f64 {
        self.mean_ns / 1_000_000.0
    }
}
