use crate::format::format_count;
use itertools::Itertools;
use plotters::prelude::*;
use std::{
    fmt::Display,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::debug;

pub const CHART_EXTENSION: &str = "svg";

const TITLE_FONT_SIZE: u32 = 28;
const AXIS_LABEL_FONT_SIZE: u32 = 18;
const TICK_LABEL_FONT_SIZE: u32 = 14;

const BAR_COLOR: RGBColor = RGBColor(70, 130, 180);
const SERIES_COLORS: &[RGBColor] = &[
    RGBColor(66, 133, 244),
    RGBColor(234, 67, 53),
    RGBColor(52, 168, 83),
    RGBColor(251, 188, 5),
];

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Failed to draw chart {path:?}: {message}")]
    Drawing { path: PathBuf, message: String },
    #[error("Chart {0:?} has no data points")]
    Empty(String),
    #[error("Chart {title:?} can't be drawn on a {axis} axis from {min} to {max}")]
    Range {
        title: String,
        axis: &'static str,
        min: f64,
        max: f64,
    },
}

/// One bar per label, e.g. throughput per record count
#[derive(Debug, Clone)]
pub struct BarChart {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub bars: Vec<(String, f64)>,
}

#[derive(Debug, Clone)]
pub struct Series {
    pub label: String,
    /// one value per x position, `None` for gaps
    pub points: Vec<Option<f64>>,
}

/// Lines over a shared, ascending and positive x axis drawn in log scale
#[derive(Debug, Clone)]
pub struct LineChart {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub x: Vec<f64>,
    pub series: Vec<Series>,
}

#[derive(Debug, Clone)]
pub enum Chart {
    Bar(BarChart),
    Line(LineChart),
}

/// file name of the chart for an ingest category
pub fn ingest_chart_name(category: &str) -> String {
    format!("ingest_{category}_chart.{CHART_EXTENSION}")
}

/// file name of the chart for a query variant
pub fn query_chart_name(category: &str, variant: &str) -> String {
    format!(
        "query_{}_{variant}_chart.{CHART_EXTENSION}",
        category.to_lowercase()
    )
}

/// Available chart backends
#[derive(Debug, Clone)]
pub enum ChartEmitter {
    Svg(SvgEmitter),
    /// no renderer available, nothing is emitted
    Disabled,
}

impl ChartEmitter {
    /// render svg charts into `output_dir`
    pub fn svg(output_dir: impl Into<PathBuf>) -> Self {
        Self::Svg(SvgEmitter::new(output_dir.into()))
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }

    /// Render `chart` as `file_name` and return the reference to place into the document.
    pub fn emit(&self, file_name: &str, chart: &Chart) -> Result<Option<String>, ChartError> {
        match self {
            Self::Svg(emitter) => emitter.emit(file_name, chart).map(Some),
            Self::Disabled => Ok(None),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SvgEmitter {
    output_dir: PathBuf,
    size: (u32, u32),
}

impl SvgEmitter {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            size: (1000, 600),
        }
    }

    pub fn emit(&self, file_name: &str, chart: &Chart) -> Result<String, ChartError> {
        let path = self.output_dir.join(file_name);

        match chart {
            Chart::Bar(bar) => draw_bar(&path, self.size, bar)?,
            Chart::Line(line) => draw_line(&path, self.size, line)?,
        }

        debug!(path = ?path, "Rendered chart");

        Ok(file_name.to_owned())
    }
}

fn drawing(path: &Path) -> impl Fn(&dyn Display) -> ChartError + '_ {
    move |error: &dyn Display| ChartError::Drawing {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}

/// upper bound of a value axis starting at zero, with some headroom above `max`
fn value_axis_top(title: &str, max: f64) -> Result<f64, ChartError> {
    let top = if max > 0.0 { max * 1.1 } else { 1.0 };

    // plotters never finishes laying out an infinite axis
    if top.is_finite() {
        Ok(top)
    } else {
        Err(ChartError::Range {
            title: title.to_owned(),
            axis: "value",
            min: 0.0,
            max: top,
        })
    }
}

fn draw_bar(path: &Path, size: (u32, u32), chart: &BarChart) -> Result<(), ChartError> {
    if chart.bars.is_empty() {
        return Err(ChartError::Empty(chart.title.clone()));
    }

    let count = chart.bars.len();
    let max = chart
        .bars
        .iter()
        .map(|(_, value)| *value)
        .fold(0.0_f64, f64::max);
    let top = value_axis_top(&chart.title, max)?;

    let failed = drawing(path);
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| failed(&e))?;

    let mut context = ChartBuilder::on(&root)
        .caption(&chart.title, ("sans-serif", TITLE_FONT_SIZE))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d(-0.5..(count as f64 - 0.5), 0.0..top)
        .map_err(|e| failed(&e))?;

    context
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(count)
        .x_label_formatter(&|x| {
            let index = x.round();
            // only label the bar centers
            if index >= 0.0 && (x - index).abs() < 0.3 {
                chart
                    .bars
                    .get(index as usize)
                    .map(|(label, _)| label.clone())
                    .unwrap_or_default()
            } else {
                String::new()
            }
        })
        .x_desc(chart.x_desc.as_str())
        .y_desc(chart.y_desc.as_str())
        .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
        .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
        .draw()
        .map_err(|e| failed(&e))?;

    context
        .draw_series(chart.bars.iter().enumerate().map(|(index, (_, value))| {
            let center = index as f64;
            Rectangle::new([(center - 0.35, 0.0), (center + 0.35, *value)], BAR_COLOR.filled())
        }))
        .map_err(|e| failed(&e))?;

    root.present().map_err(|e| failed(&e))
}

fn draw_line(path: &Path, size: (u32, u32), chart: &LineChart) -> Result<(), ChartError> {
    let series = chart
        .series
        .iter()
        .map(|series| {
            let points = chart
                .x
                .iter()
                .zip(series.points.iter())
                .filter_map(|(x, y)| y.map(|y| (*x, y)))
                .collect_vec();

            (series.label.as_str(), points)
        })
        .filter(|(_, points)| !points.is_empty())
        .collect_vec();

    let (Some(min_x), Some(max_x)) = (
        chart.x.iter().copied().reduce(f64::min),
        chart.x.iter().copied().reduce(f64::max),
    ) else {
        return Err(ChartError::Empty(chart.title.clone()));
    };

    if series.is_empty() {
        return Err(ChartError::Empty(chart.title.clone()));
    }

    // a log scale needs strictly positive bounds, a zero never gets laid out
    if !(min_x > 0.0 && (max_x * 1.25).is_finite()) {
        return Err(ChartError::Range {
            title: chart.title.clone(),
            axis: "logarithmic",
            min: min_x,
            max: max_x,
        });
    }

    let max_y = series
        .iter()
        .flat_map(|(_, points)| points.iter().map(|(_, y)| *y))
        .fold(0.0_f64, f64::max);
    let top = value_axis_top(&chart.title, max_y)?;

    let failed = drawing(path);
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| failed(&e))?;

    let mut context = ChartBuilder::on(&root)
        .caption(&chart.title, ("sans-serif", TITLE_FONT_SIZE))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(
            (min_x * 0.8..max_x * 1.25).log_scale(),
            0.0..top,
        )
        .map_err(|e| failed(&e))?;

    context
        .configure_mesh()
        .x_label_formatter(&|x| format_count(x.round() as u64))
        .x_desc(chart.x_desc.as_str())
        .y_desc(chart.y_desc.as_str())
        .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
        .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
        .draw()
        .map_err(|e| failed(&e))?;

    for (index, (label, points)) in series.into_iter().enumerate() {
        let color = SERIES_COLORS[index % SERIES_COLORS.len()];

        context
            .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))
            .map_err(|e| failed(&e))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

        context
            .draw_series(
                points
                    .into_iter()
                    .map(|point| Circle::new(point, 4, color.filled())),
            )
            .map_err(|e| failed(&e))?;
    }

    context
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", TICK_LABEL_FONT_SIZE))
        .draw()
        .map_err(|e| failed(&e))?;

    root.present().map_err(|e| failed(&e))
}
