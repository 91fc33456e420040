mod cli;
mod config;


use benchreport_analysis::{ChartEmitter, IndexResolver, ReportError, ReportWriter};
use benchreport_ingest::{load_ingest_results, load_query_results, IngestError};
use clap::Parser;
use cli::Args;
use config::{ConfigErrors, ReportConfig};
use std::{fs, process::ExitCode};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
enum RunnerError {
    #[error(transparent)]
    Config(#[from] ConfigErrors),
    #[error("Failed to create output directory")]
    OutputDir(#[source] std::io::Error),
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// RUST_LOG wins over the verbosity flag, logs go to stderr
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<(), RunnerError> {
    let config = ReportConfig::from_args(args)?;

    if config.preflight_checks() {
        return Err(ConfigErrors::Preflight.into());
    }

    let output_dir = config.output_dir();
    fs::create_dir_all(&output_dir).map_err(RunnerError::OutputDir)?;

    info!("Loading ingest results...");
    let ingest = load_ingest_results(&config.results_dir)?;
    info!("Found {} ingest results", ingest.len());

    info!("Loading query results...");
    let queries = load_query_results(&config.results_dir)?;
    info!("Found {} query results", queries.len());

    let charts = if config.charts {
        ChartEmitter::svg(output_dir)
    } else {
        info!("Charts are disabled");
        ChartEmitter::Disabled
    };

    info!("Generating report: {}", config.output.display());
    let mut writer = ReportWriter::new(
        &ingest,
        &queries,
        IndexResolver::new(&config.sql_dir),
        charts,
    );
    writer.generate(&config.output)?;

    info!(
        "Report generated successfully: {} ({} charts)",
        config.output.display(),
        writer.emitted_charts().len()
    );

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!(error = ?error, "{error}");
            ExitCode::FAILURE
        }
    }
}
