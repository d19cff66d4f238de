pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use application::{DatasetSession, MetricsCalculator, Normalizer};
pub use domain::error::{AppError, Result};
pub use domain::metrics::SpendMetrics;
pub use domain::table::{CleaningConfig, Table};
pub use infrastructure::csv::{CsvParser, CsvWriter};
