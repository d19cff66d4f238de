// ============================================================
// COLUMN TYPES
// ============================================================
// A named, typed sequence of cell values

use super::CellValue;
use serde::{Deserialize, Serialize};

/// Declared column type, fixed once at parse time.
/// Fill policy and summation dispatch on this tag, not on per-cell checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Every non-missing cell is a number
    Numeric,

    /// Free-form text / categorical data
    Text,

    /// Parsed calendar dates
    Date,
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::Text => write!(f, "text"),
            ColumnKind::Date => write!(f, "date"),
        }
    }
}

/// A single table column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name (header)
    pub name: String,

    /// Declared type of this column
    pub kind: ColumnKind,

    /// Cell values, one per row
    pub cells: Vec<CellValue>,
}

impl Column {
    /// Create a new column
    pub fn new(name: impl Into<String>, kind: ColumnKind, cells: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            kind,
            cells,
        }
    }

    /// Number of rows in this column
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the column has no rows
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of missing cells
    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_missing()).count()
    }

    /// Whether this is a numeric column whose every cell equals zero.
    /// An empty numeric column vacuously qualifies.
    pub fn is_all_zero(&self) -> bool {
        self.kind == ColumnKind::Numeric
            && self
                .cells
                .iter()
                .all(|c| matches!(c, CellValue::Number(n) if *n == 0.0))
    }

    /// Arithmetic sum over the column. Non-numeric cells contribute zero.
    pub fn sum(&self) -> f64 {
        self.cells.iter().filter_map(|c| c.as_number()).sum()
    }
}
