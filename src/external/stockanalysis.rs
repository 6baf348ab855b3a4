/// Quote root for NGX listings on stockanalysis.com
pub const DEFAULT_BASE_URL: &str = "https://stockanalysis.com/quote/ngx";

/// The three statement pages scraped per ticker, in fetch order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement {
    Income,
    BalanceSheet,
    CashFlow,
}

impl Statement {
    fn path(&self) -> &'static str {
        match self {
            Statement::Income => "financials/",
            Statement::BalanceSheet => "financials/balance-sheet/",
            Statement::CashFlow => "financials/cash-flow-statement/",
        }
    }

    pub fn url(&self, base_url: &str, ticker: &str) -> String {
        format!("{}/{}/{}", base_url.trim_end_matches('/'), ticker, self.path())
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Statement::Income => write!(f, "income statement"),
            Statement::BalanceSheet => write!(f, "balance sheet"),
            Statement::CashFlow => write!(f, "cash flow statement"),
        }
    }
}

/// Longest symbol accepted for a lookup
pub const MAX_TICKER_LEN: usize = 16;

/// Canonical form of a user-supplied ticker
pub fn normalize_ticker(ticker: &str) -> String {
    ticker.trim().to_uppercase()
}

/// Whether a normalized ticker is safe to place in a source URL path.
///
/// Symbols start with a letter or digit and otherwise use only `A-Z`, `0-9`,
/// `.`, `&` and `-`. That excludes `/`, `?`, `#` and all-dot segments.
pub fn is_valid_ticker(ticker: &str) -> bool {
    let mut chars = ticker.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    ticker.len() <= MAX_TICKER_LEN
        && (first.is_ascii_uppercase() || first.is_ascii_digit())
        && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, '.' | '&' | '-'))
}
