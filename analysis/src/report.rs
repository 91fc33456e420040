use crate::{
    catalog::{self, UNKNOWN_DESCRIPTION},
    chart::{ingest_chart_name, query_chart_name, BarChart, Chart, ChartEmitter, LineChart, Series},
    format::{format_count, format_throughput, format_time, is_slow, NOT_AVAILABLE, WARNING_MARKER},
    indexes::IndexResolver,
};
use benchreport_ingest::{IngestCategory, IngestRecord, QueryRecord};
use itertools::Itertools;
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to open {path:?} for writing")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write report")]
    Write(#[from] io::Error),
}

/// Renders loaded records into a single markdown document.
///
/// Charts are emitted while the document is written, the references land next to the
/// section they belong to.
#[derive(Debug)]
pub struct ReportWriter<'a> {
    ingest: &'a [IngestRecord],
    queries: &'a [QueryRecord],
    indexes: IndexResolver,
    charts: ChartEmitter,
    emitted: Vec<String>,
}

impl<'a> ReportWriter<'a> {
    pub fn new(
        ingest: &'a [IngestRecord],
        queries: &'a [QueryRecord],
        indexes: IndexResolver,
        charts: ChartEmitter,
    ) -> Self {
        Self {
            ingest,
            queries,
            indexes,
            charts,
            emitted: Vec::new(),
        }
    }

    /// chart references written so far
    pub fn emitted_charts(&self) -> &[String] {
        &self.emitted
    }

    /// Write the report to `path`, failing before any rendering if it can't be opened.
    pub fn generate(&mut self, path: &Path) -> Result<(), ReportError> {
        let file = File::create(path).map_err(|source| ReportError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut out = BufWriter::new(file);

        self.write(&mut out)?;
        out.flush()?;

        info!(
            path = ?path,
            charts = self.emitted.len(),
            "Report written to {}",
            path.display()
        );

        Ok(())
    }

    pub fn write<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.write_header(out)?;
        self.write_ingest_section(out)?;
        self.write_query_sections(out)?;
        self.write_footer(out)
    }

    /// query categories in report order
    fn query_categories(&self) -> Vec<&'a str> {
        let queries = self.queries;

        queries
            .iter()
            .map(|record| record.category.as_str())
            .unique()
            .sorted()
            .collect_vec()
    }

    fn write_header<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "# Benchmark Report\n")?;
        writeln!(
            out,
            "This report summarizes the performance benchmarks for encrypted database operations.\n"
        )?;
        writeln!(out, "## Table of Contents\n")?;
        writeln!(out, "1. [Ingest Throughput](#ingest-throughput)")?;
        writeln!(out, "2. [Query Performance](#query-performance)")?;

        for category in self.query_categories() {
            writeln!(
                out,
                "   - [{category} Queries](#{}-queries)",
                category.to_lowercase()
            )?;
        }

        writeln!(out, "\n---\n")
    }

    fn write_ingest_section<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        writeln!(out, "## Ingest Throughput\n")?;
        writeln!(
            out,
            "This section measures the throughput of inserting encrypted records into the database.\n"
        )?;

        let ingest = self.ingest;

        for category in IngestCategory::ALL {
            let records = ingest
                .iter()
                .filter(|record| record.category == category)
                .sorted_by_key(|record| record.num_records)
                .collect_vec();

            if !records.is_empty() {
                self.write_ingest_category(out, category, &records)?;
            }
        }

        Ok(())
    }

    fn write_ingest_category<W: Write>(
        &mut self,
        out: &mut W,
        category: IngestCategory,
        records: &[&IngestRecord],
    ) -> io::Result<()> {
        writeln!(out, "### {}\n", category.title())?;
        writeln!(out, "{}\n", category.description())?;

        writeln!(
            out,
            "| Records | Throughput (records/sec) | Total Time | Avg Memory |"
        )?;
        writeln!(
            out,
            "|---------|--------------------------|------------|------------|"
        )?;

        for record in records {
            writeln!(
                out,
                "| {} | {} | {:.2}s | {:.2} MB |",
                format_count(record.num_records),
                format_throughput(record.throughput),
                record.total_time,
                record.avg_memory_mb
            )?;
        }

        writeln!(out)?;

        // single data points are charted as well
        if self.charts.is_enabled() {
            let chart = Chart::Bar(BarChart {
                title: format!("Ingest Throughput - {}", category.title()),
                x_desc: "Number of Records".to_owned(),
                y_desc: "Throughput (records/sec)".to_owned(),
                bars: records
                    .iter()
                    .map(|record| (format_count(record.num_records), record.throughput))
                    .collect(),
            });

            self.write_chart(
                out,
                &ingest_chart_name(category.as_str()),
                &format!("Ingest Throughput - {category}"),
                &chart,
            )?;
        }

        Ok(())
    }

    fn write_query_sections<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        writeln!(out, "## Query Performance\n")?;
        writeln!(
            out,
            "This section measures query performance across different data set sizes. \
             Each query is tested with and without decryption of results.\n"
        )?;

        let queries = self.queries;

        for category in self.query_categories() {
            writeln!(out, "### {category} Queries\n")?;

            let variants = queries
                .iter()
                .filter(|record| record.category == category)
                .map(|record| record.variant.as_str())
                .unique()
                .sorted()
                .collect_vec();

            for variant in variants {
                self.write_query_variant(out, category, variant)?;
            }
        }

        Ok(())
    }

    fn write_query_variant<W: Write>(
        &mut self,
        out: &mut W,
        category: &str,
        variant: &str,
    ) -> io::Result<()> {
        let queries = self.queries;
        let records = queries
            .iter()
            .filter(|record| record.category == category && record.variant == variant)
            .sorted_by_key(|record| (record.row_count, record.decrypt))
            .collect_vec();

        let Some(first) = records.first() else {
            return Ok(());
        };

        let entry = catalog::lookup(category, variant);

        writeln!(out, "#### {variant}\n")?;
        writeln!(
            out,
            "**Description:** {}\n",
            entry.map_or(UNKNOWN_DESCRIPTION, |entry| entry.description)
        )?;

        if let Some(entry) = entry {
            writeln!(out, "**SQL Query:**\n```sql\n{}\n```\n", entry.template)?;
            writeln!(out, "**Parameter:** `{}`\n", entry.parameter)?;
            writeln!(out, "**{}**\n", entry.narrative)?;
        }

        // every data set size shares the same indexes
        if let Some(table) = catalog::table_name(category, first.row_count) {
            if let Some(definitions) = self.indexes.resolve(&table) {
                writeln!(out, "**Indexes:**\n```sql\n{definitions}\n```\n")?;
            }
        }

        if records.iter().any(|record| is_slow(record.mean_ns)) {
            writeln!(out, "*{WARNING_MARKER} = Query time exceeds 100ms*\n")?;
        }

        writeln!(
            out,
            "| Data Set Size | Query Time (no decrypt) | Query Time (with decrypt) |"
        )?;
        writeln!(
            out,
            "|---------------|-------------------------|---------------------------|"
        )?;

        let row_counts = records
            .iter()
            .map(|record| record.row_count)
            .dedup()
            .collect_vec();
        let find = |row_count: u64, decrypt: bool| {
            records
                .iter()
                .find(|record| record.row_count == row_count && record.decrypt == decrypt)
        };

        for &row_count in &row_counts {
            let cell = |record: Option<&&QueryRecord>| {
                record.map_or_else(
                    || NOT_AVAILABLE.to_owned(),
                    |record| format_time(record.mean_ns, true),
                )
            };

            writeln!(
                out,
                "| {} | {} | {} |",
                format_count(row_count),
                cell(find(row_count, false)),
                cell(find(row_count, true))
            )?;
        }

        writeln!(out)?;

        // a single data set size has nothing to compare against
        if self.charts.is_enabled() && row_counts.len() > 1 {
            let series = |label: &str, decrypt: bool| Series {
                label: label.to_owned(),
                points: row_counts
                    .iter()
                    .map(|&row_count| find(row_count, decrypt).map(|record| record.mean_ms()))
                    .collect(),
            };

            let chart = Chart::Line(LineChart {
                title: format!("{category} - {variant}"),
                x_desc: "Data Set Size (rows)".to_owned(),
                y_desc: "Query Time (ms)".to_owned(),
                x: row_counts.iter().map(|&row_count| row_count as f64).collect(),
                series: vec![
                    series("Without Decryption", false),
                    series("With Decryption", true),
                ],
            });

            self.write_chart(
                out,
                &query_chart_name(category, variant),
                &format!("Query Performance - {category}/{variant}"),
                &chart,
            )?;
        }

        Ok(())
    }

    fn write_chart<W: Write>(
        &mut self,
        out: &mut W,
        file_name: &str,
        alt: &str,
        chart: &Chart,
    ) -> io::Result<()> {
        match self.charts.emit(file_name, chart) {
            Ok(Some(reference)) => {
                writeln!(out, "![{alt}]({reference})\n")?;
                self.emitted.push(reference);
            }
            Ok(None) => {}
            Err(error) => {
                warn!(error = ?error, "Skipping chart {file_name}: {error}");
            }
        }

        Ok(())
    }

    fn write_footer<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "\n---\n")?;
        writeln!(out, "*Report generated by `benchreport`*")
    }
}
