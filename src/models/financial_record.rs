use serde::{Deserialize, Serialize};

/// Normalized two-period snapshot of a company's statements.
///
/// Every numeric field is independently optional. A record with all of them
/// missing is still valid input for the metric evaluators.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FinancialRecord {
    pub ticker: String,
    pub company_name: String,

    /// Fiscal year label of the current period (empty when unknown)
    pub current_year: String,
    /// Fiscal year label of the previous period (empty when unknown)
    pub previous_year: String,

    // Income statement
    pub revenue: Option<f64>,
    pub prev_revenue: Option<f64>,
    /// Profit after tax (net income)
    pub pat: Option<f64>,
    pub prev_pat: Option<f64>,
    pub eps: Option<f64>,
    pub prev_eps: Option<f64>,
    pub dps: Option<f64>,
    pub prev_dps: Option<f64>,

    // Balance sheet
    pub total_debt: Option<f64>,
    pub prev_total_debt: Option<f64>,
    pub shareholder_equity: Option<f64>,
    pub prev_shareholder_equity: Option<f64>,

    // Cash flow statement
    pub operating_cash_flow: Option<f64>,
    pub prev_operating_cash_flow: Option<f64>,
}

impl FinancialRecord {
    /// Empty record for a ticker; every numeric field missing.
    pub fn new(ticker: impl Into<String>, company_name: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            company_name: company_name.into(),
            ..Default::default()
        }
    }
}
