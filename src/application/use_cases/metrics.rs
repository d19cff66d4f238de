// ============================================================
// METRICS CALCULATOR USE CASE
// ============================================================
// Spend-efficiency metrics over a cleaned dataset

use crate::domain::error::{AppError, Result};
use crate::domain::metrics::SpendMetrics;
use crate::domain::table::{Column, Table};

/// Columns the analysis depends on, in reporting order
pub const REQUIRED_COLUMNS: [&str; 4] = [
    "total_revenue",
    "fb_spend",
    "instagram_spend",
    "tiktok_spend",
];

/// Metrics computation use case
#[derive(Default)]
pub struct MetricsCalculator;

impl MetricsCalculator {
    /// Create a new metrics calculator
    pub fn new() -> Self {
        Self
    }

    /// Compute spend-efficiency metrics over a cleaned table.
    ///
    /// Fails with the exact list of absent required columns, in
    /// required-list order. Revenue of zero yields a zero percentage
    /// rather than a division error. No rounding is applied.
    pub fn compute(&self, clean: &Table) -> Result<SpendMetrics> {
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| !clean.has_column(name))
            .map(|name| name.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(AppError::MissingColumns(missing));
        }

        let total_revenue = column_sum(clean, "total_revenue");
        let total_ad_spend = column_sum(clean, "fb_spend")
            + column_sum(clean, "instagram_spend")
            + column_sum(clean, "tiktok_spend");

        let ad_spend_pct = if total_revenue > 0.0 {
            (total_ad_spend / total_revenue) * 100.0
        } else {
            0.0
        };

        Ok(SpendMetrics {
            total_revenue,
            total_ad_spend,
            ad_spend_pct,
        })
    }
}

fn column_sum(table: &Table, name: &str) -> f64 {
    table.column(name).map(Column::sum).unwrap_or(0.0)
}
