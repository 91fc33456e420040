use crate::cli::Args;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum ConfigErrors {
    #[error("Failed to read config file {path:?}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Config file is invalid")]
    InvalidConfig(#[from] serde_yaml::Error),
    #[error("Configuration failed preflight checks")]
    Preflight,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    // root of the results snapshot, contains `ingest/` and `query/`
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
    // contains `indexes/<table>_up.sql`
    #[serde(default = "default_sql_dir")]
    pub sql_dir: PathBuf,
    // report document, charts are written next to it
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_charts")]
    pub charts: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
            sql_dir: default_sql_dir(),
            output: default_output(),
            charts: default_charts(),
        }
    }
}

impl ReportConfig {
    /// load a yaml config, missing keys fall back to their defaults
    pub fn load(path: &Path) -> Result<Self, ConfigErrors> {
        let content = fs::read_to_string(path).map_err(|source| ConfigErrors::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(serde_yaml::from_str(&content)?)
    }

    /// Build the effective config: command line over config file over defaults.
    pub fn from_args(args: &Args) -> Result<Self, ConfigErrors> {
        let mut config = match args.config {
            Some(ref path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(ref results_dir) = args.results_dir {
            config.results_dir = results_dir.clone();
        }
        if let Some(ref sql_dir) = args.sql_dir {
            config.sql_dir = sql_dir.clone();
        }
        if let Some(ref output) = args.output {
            config.output = output.clone();
        }
        if args.no_charts {
            config.charts = false;
        }

        Ok(config)
    }

    /// directory charts and the report are written to
    pub fn output_dir(&self) -> PathBuf {
        match self.output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Check the config before any results are loaded.
    ///
    /// All problems are logged, returns whether any of them is fatal.
    pub fn preflight_checks(&self) -> bool {
        let mut contains_error = false;

        if !self.results_dir.is_dir() {
            error!(
                "Results directory '{}' does not exist",
                self.results_dir.display()
            );
            contains_error = true;
        }

        if !self.sql_dir.join("indexes").is_dir() {
            warn!(
                "No index definitions found in '{}', index information will be skipped",
                self.sql_dir.join("indexes").display()
            );
        }

        if self.output.file_name().is_none() || self.output.is_dir() {
            error!(
                "Output '{}' must be a file path",
                self.output.display()
            );
            contains_error = true;
        }

        contains_error
    }
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_sql_dir() -> PathBuf {
    PathBuf::from("sql")
}

fn default_output() -> PathBuf {
    PathBuf::from("report/BENCHMARK_REPORT.md")
}

fn default_charts() -> bool {
    true
}
