// ============================================================
// DATASET SUMMARY
// ============================================================
// Presentation-facing projection of a table

use super::Table;
use serde::{Deserialize, Serialize};

/// Snapshot of a table handed to the presentation layer:
/// shape, headers, and a rendered preview of the first rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Total number of rows (not just the previewed subset)
    pub row_count: usize,

    /// Number of columns
    pub column_count: usize,

    /// Column names, in table order
    pub headers: Vec<String>,

    /// First rows rendered as display strings
    pub preview: Vec<Vec<String>>,

    /// Time spent producing the table, when measured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time_ms: Option<u64>,
}

impl DatasetSummary {
    /// Summarize a table with a preview of its first `preview_rows` rows
    pub fn of(table: &Table, preview_rows: usize) -> Self {
        Self {
            row_count: table.row_count(),
            column_count: table.column_count(),
            headers: table.headers(),
            preview: table.head(preview_rows),
            processing_time_ms: None,
        }
    }

    /// Attach a processing-time measurement
    pub fn with_processing_time(mut self, ms: u64) -> Self {
        self.processing_time_ms = Some(ms);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::{CellValue, Column, ColumnKind};

    #[test]
    fn test_summary_reports_full_row_count() {
        let table = Table::new(vec![Column::new(
            "x",
            ColumnKind::Numeric,
            (0..10).map(|i| CellValue::Number(i as f64)).collect(),
        )])
        .unwrap();

        let summary = DatasetSummary::of(&table, 3);
        assert_eq!(summary.row_count, 10);
        assert_eq!(summary.preview.len(), 3);
        assert_eq!(summary.headers, vec!["x"]);
        assert!(summary.processing_time_ms.is_none());
    }
}
