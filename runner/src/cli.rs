use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Generate a markdown report from ingest and query benchmark results
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory containing benchmark results [default: results]
    #[arg(long)]
    pub results_dir: Option<PathBuf>,

    /// Directory containing SQL schema and index files [default: sql]
    #[arg(long)]
    pub sql_dir: Option<PathBuf>,

    /// Output file path [default: report/BENCHMARK_REPORT.md]
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// YAML file with defaults for the options above
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Skip rendering charts
    #[arg(long)]
    pub no_charts: bool,

    /// Increase log verbosity, overridden by RUST_LOG
    #[arg(long, short, action = ArgAction::Count)]
    pub verbose: u8,
}
