use serde::{Deserialize, Serialize};

use super::metric::Metric;

/// Overall verdict derived from the eight metric signals
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recommendation {
    Buy,
    Hold,
    Sell,
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recommendation::Buy => write!(f, "BUY"),
            Recommendation::Hold => write!(f, "HOLD"),
            Recommendation::Sell => write!(f, "SELL"),
        }
    }
}

/// Result of running the full rule set over one financial record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub ticker: String,
    pub company_name: String,
    pub current_year: String,
    pub previous_year: String,

    /// Always eight, in evaluation order
    pub metrics: Vec<Metric>,

    pub recommendation: Recommendation,
    pub green_count: usize,
    pub yellow_count: usize,
    pub red_count: usize,
    pub summary: String,
}
