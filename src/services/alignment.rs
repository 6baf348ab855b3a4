use crate::services::extraction::FinancialDataset;

/// Field whose length decides which columns are full fiscal years
pub const FISCAL_YEAR_FIELD: &str = "fiscalYear";

/// Column indices of the periods compared by the evaluators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiscalAlignment {
    pub current: usize,
    pub previous: Option<usize>,
}

/// Pick the current and previous columns of a statement.
///
/// Statement pages may prepend a trailing-twelve-months column. With three or
/// more fiscal-year entries, column 0 is taken to be TTM and skipped. Each
/// statement is aligned on its own; nothing reconciles the absolute years
/// chosen for different statements.
pub fn align(dataset: &FinancialDataset) -> FiscalAlignment {
    let years = dataset.get(FISCAL_YEAR_FIELD).map_or(0, |values| values.len());
    align_by_len(years)
}

pub fn align_by_len(years: usize) -> FiscalAlignment {
    match years {
        n if n >= 3 => FiscalAlignment { current: 1, previous: Some(2) },
        2 => FiscalAlignment { current: 0, previous: Some(1) },
        _ => FiscalAlignment { current: 0, previous: None },
    }
}
