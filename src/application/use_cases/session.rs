// ============================================================
// DATASET SESSION USE CASE
// ============================================================
// Single-slot store for the uploaded dataset and its last-computed
// cleaned form, scoped to one user session

use crate::application::use_cases::metrics::MetricsCalculator;
use crate::application::use_cases::normalizer::Normalizer;
use crate::domain::error::{AppError, Result};
use crate::domain::metrics::SpendMetrics;
use crate::domain::table::{CleaningConfig, Table};

/// Session state for one user's dataset.
/// Access is strictly sequential; the cleaned table is cached so the
/// clean and analyze actions share one normalization run per upload.
pub struct DatasetSession {
    normalizer: Normalizer,
    calculator: MetricsCalculator,
    raw: Option<Table>,
    cleaned: Option<Table>,
}

impl DatasetSession {
    /// Create a session with the given cleaning configuration
    pub fn new(config: CleaningConfig) -> Self {
        Self {
            normalizer: Normalizer::new(config),
            calculator: MetricsCalculator::new(),
            raw: None,
            cleaned: None,
        }
    }

    /// Create with default configuration
    pub fn default_config() -> Self {
        Self::new(CleaningConfig::default())
    }

    /// Whether a dataset has been uploaded
    pub fn is_loaded(&self) -> bool {
        self.raw.is_some()
    }

    /// Replace the loaded dataset; invalidates the cached cleaned table
    pub fn load(&mut self, raw: Table) {
        tracing::info!(
            rows = raw.row_count(),
            columns = raw.column_count(),
            "Dataset loaded into session"
        );
        self.raw = Some(raw);
        self.cleaned = None;
    }

    /// The uploaded raw table
    pub fn raw(&self) -> Result<&Table> {
        self.raw.as_ref().ok_or_else(no_dataset)
    }

    /// Cleaned form of the loaded dataset, computed at most once per upload
    pub fn cleaned(&mut self) -> Result<&Table> {
        self.ensure_cleaned()?;
        self.cleaned.as_ref().ok_or_else(no_dataset)
    }

    /// Spend metrics over the cleaned dataset
    pub fn metrics(&mut self) -> Result<SpendMetrics> {
        self.ensure_cleaned()?;
        let cleaned = self.cleaned.as_ref().ok_or_else(no_dataset)?;
        self.calculator.compute(cleaned)
    }

    fn ensure_cleaned(&mut self) -> Result<()> {
        if self.cleaned.is_none() {
            let raw = self.raw.as_ref().ok_or_else(no_dataset)?;
            self.cleaned = Some(self.normalizer.normalize(raw)?);
        }
        Ok(())
    }
}

fn no_dataset() -> AppError {
    AppError::NotFound("No dataset uploaded".to_string())
}
