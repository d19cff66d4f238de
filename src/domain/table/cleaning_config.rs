// ============================================================
// CLEANING CONFIGURATION
// ============================================================
// Policy knobs for the dataset cleaning transform

use serde::{Deserialize, Serialize};

/// How to resolve canonical header-name collisions after renaming
/// (e.g. "Total Revenue" and "total revenue" both map to "total_revenue")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeaderCollisionPolicy {
    /// Fail the cleaning run, naming the colliding header
    Reject,

    /// Keep the first column with a given canonical name, drop later ones
    KeepFirst,
}

/// Configuration for dataset cleaning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningConfig {
    /// Fill value for missing cells in numeric columns (default: 0)
    pub numeric_fill: f64,

    /// Fill marker for missing cells in text columns (default: "unknown")
    pub text_fill: String,

    /// Prefer day-before-month when parsing ambiguous dates (default: true)
    pub day_first: bool,

    /// How to resolve header collisions after renaming (default: Reject)
    pub header_collision: HeaderCollisionPolicy,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            numeric_fill: 0.0,
            text_fill: "unknown".to_string(),
            day_first: true,
            header_collision: HeaderCollisionPolicy::Reject,
        }
    }
}

impl CleaningConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.text_fill.is_empty() {
            return Err("text_fill must not be empty".to_string());
        }
        if !self.numeric_fill.is_finite() {
            return Err("numeric_fill must be finite".to_string());
        }
        Ok(())
    }
}
