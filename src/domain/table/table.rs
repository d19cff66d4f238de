// ============================================================
// TABLE
// ============================================================
// An ordered collection of equal-length named columns

use super::Column;
use crate::domain::error::{AppError, Result};
use serde::{Deserialize, Serialize};

/// An in-memory rectangular table.
/// Column order is preserved; every column holds one cell per row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table from columns, rejecting ragged input
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let rows = first.len();
            for col in &columns {
                if col.len() != rows {
                    return Err(AppError::ParseError(format!(
                        "Column '{}' has {} rows, expected {}",
                        col.name,
                        col.len(),
                        rows
                    )));
                }
            }
        }

        Ok(Self { columns })
    }

    /// Table with no columns and no rows
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.columns.first().map(|c| c.len()).unwrap_or(0)
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column names, in table order
    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Whether a column with this name exists
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// All columns, in table order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// First `n` rows rendered as display strings, one Vec per row
    pub fn head(&self, n: usize) -> Vec<Vec<String>> {
        let rows = self.row_count().min(n);
        (0..rows)
            .map(|r| self.columns.iter().map(|c| c.cells[r].render()).collect())
            .collect()
    }
}
