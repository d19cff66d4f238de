// ============================================================
// SPEND METRICS
// ============================================================
// Derived marketing-spend-efficiency values

use serde::{Deserialize, Serialize};

/// Result of analyzing a cleaned dataset.
/// Raw numeric values only; formatting is a presentation concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendMetrics {
    /// Sum of the revenue column
    pub total_revenue: f64,

    /// Combined spend across the three ad channels
    pub total_ad_spend: f64,

    /// Ad spend as a percentage of revenue (0 when revenue is 0)
    pub ad_spend_pct: f64,
}
