pub mod catalog;
pub mod chart;
pub mod format;
pub mod indexes;
pub mod report;

#[cfg(test)]
mod format_test;
#[cfg(test)]
mod indexes_test;

pub use chart::{ChartEmitter, ChartError};
pub use indexes::IndexResolver;
pub use report::{ReportError, ReportWriter};
