// ============================================================
// CELL VALUES
// ============================================================
// Tagged cell values carried by table columns

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single cell in a table column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CellValue {
    /// Numeric value (integers are carried as f64)
    Number(f64),

    /// Free-form text
    Text(String),

    /// Calendar date
    Date(NaiveDate),

    /// Marker for a date cell that could not be parsed
    InvalidDate,

    /// Missing / empty cell
    Missing,
}

impl CellValue {
    /// Whether this cell carries no value
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// Numeric view of the cell, if it is a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Render the cell the way it appears in CSV output.
    /// Missing and invalid-date cells render as empty fields.
    pub fn render(&self) -> String {
        match self {
            CellValue::Number(n) => format!("{}", n),
            CellValue::Text(s) => s.clone(),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            CellValue::InvalidDate => String::new(),
            CellValue::Missing => String::new(),
        }
    }

    /// Projection used for duplicate-row detection
    pub fn dedup_key(&self) -> CellKey {
        match self {
            // Canonicalize NaN so every NaN cell maps to the same key
            CellValue::Number(n) if n.is_nan() => CellKey::Number(f64::NAN.to_bits()),
            CellValue::Number(n) => CellKey::Number(n.to_bits()),
            CellValue::Text(s) => CellKey::Text(s.clone()),
            CellValue::Date(d) => CellKey::Date(*d),
            CellValue::InvalidDate => CellKey::InvalidDate,
            CellValue::Missing => CellKey::Missing,
        }
    }

    /// Parse a string as a numeric cell value.
    /// Tolerates thousands separators ("1,250" -> 1250.0).
    pub fn parse_numeric(raw: &str) -> Option<f64> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        trimmed
            .parse::<f64>()
            .ok()
            .or_else(|| trimmed.replace(',', "").parse::<f64>().ok())
    }
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // NaN == NaN and Missing == Missing keep row comparison total
            (CellValue::Number(a), CellValue::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (CellValue::Text(a), CellValue::Text(b)) => a == b,
            (CellValue::Date(a), CellValue::Date(b)) => a == b,
            (CellValue::InvalidDate, CellValue::InvalidDate) => true,
            (CellValue::Missing, CellValue::Missing) => true,
            _ => false,
        }
    }
}

/// Hashable projection of a cell value for duplicate-row detection.
/// Numbers are keyed by their bit pattern with NaN canonicalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CellKey {
    Number(u64),
    Text(String),
    Date(NaiveDate),
    InvalidDate,
    Missing,
}
