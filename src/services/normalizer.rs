use serde_json::Value;

use crate::models::FinancialRecord;
use crate::services::alignment::{align, FiscalAlignment, FISCAL_YEAR_FIELD};
use crate::services::extraction::FinancialDataset;

const DATE_KEY_FIELD: &str = "datekey";

/// Merge the three statement datasets into one record.
///
/// The income statement is required. Balance sheet and cash flow only enrich
/// the record; when absent their fields stay missing.
pub fn normalize(
    ticker: &str,
    company_name: &str,
    income: Option<&FinancialDataset>,
    balance: Option<&FinancialDataset>,
    cashflow: Option<&FinancialDataset>,
) -> Option<FinancialRecord> {
    let income = income?;
    let mut record = FinancialRecord::new(ticker, company_name);

    let alignment = align(income);
    record.current_year = year_label(income, Some(alignment.current));
    record.previous_year = year_label(income, alignment.previous);

    (record.revenue, record.prev_revenue) = pair(income, "revenue", alignment);
    (record.pat, record.prev_pat) = pair(income, "netinc", alignment);
    (record.eps, record.prev_eps) = pair(income, "epsBasic", alignment);
    (record.dps, record.prev_dps) = pair(income, "dps", alignment);

    if let Some(balance) = balance {
        let alignment = align(balance);
        (record.total_debt, record.prev_total_debt) = pair(balance, "debt", alignment);
        (record.shareholder_equity, record.prev_shareholder_equity) =
            pair(balance, "equity", alignment);
    }

    if let Some(cashflow) = cashflow {
        let alignment = align(cashflow);
        (record.operating_cash_flow, record.prev_operating_cash_flow) =
            pair(cashflow, "ncfo", alignment);
    }

    Some(record)
}

fn pair(dataset: &FinancialDataset, field: &str, alignment: FiscalAlignment) -> (Option<f64>, Option<f64>) {
    (
        numeric_at(dataset, field, Some(alignment.current)),
        numeric_at(dataset, field, alignment.previous),
    )
}

/// Numeric value of `field` at `index`; strings are parsed, anything else is missing.
pub fn numeric_at(dataset: &FinancialDataset, field: &str, index: Option<usize>) -> Option<f64> {
    let value = dataset.value_at(field, index?)?;
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// Fiscal label for a column, read from `fiscalYear` or else `datekey`.
/// ISO dates collapse to their year.
pub fn year_label(dataset: &FinancialDataset, index: Option<usize>) -> String {
    let Some(index) = index else {
        return String::new();
    };

    let labels = dataset
        .get(FISCAL_YEAR_FIELD)
        .filter(|values| !values.is_empty())
        .or_else(|| dataset.get(DATE_KEY_FIELD));

    let label = match labels.and_then(|values| values.get(index)) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return String::new(),
    };

    if label.contains('-') && label.len() > 4 {
        label.chars().take(4).collect()
    } else {
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn income() -> FinancialDataset {
        let mut d = FinancialDataset::new();
        d.insert("fiscalYear", vec![json!("TTM"), json!("2024"), json!("2023")]);
        d.insert("revenue", vec![json!(130), json!(120), json!(100)]);
        d.insert("netinc", vec![json!(14), json!(12), json!("10.5")]);
        d.insert("epsBasic", vec![json!(1.4), json!(1.2), Value::Null]);
        d.insert("dps", vec![json!(0.5)]);
        d
    }

    fn balance() -> FinancialDataset {
        let mut d = FinancialDataset::new();
        d.insert("fiscalYear", vec![json!("2024"), json!("2023")]);
        d.insert("debt", vec![json!(50), json!(40)]);
        d.insert("equity", vec![json!(200), json!(180)]);
        d
    }

    #[test]
    fn test_income_is_required() {
        assert!(normalize("DANGCEM", "Dangote Cement", None, Some(&balance()), None).is_none());
    }

    #[test]
    fn test_income_fields_use_aligned_columns() {
        let record = normalize("DANGCEM", "Dangote Cement", Some(&income()), None, None).unwrap();

        assert_eq!(record.current_year, "2024");
        assert_eq!(record.previous_year, "2023");
        assert_eq!(record.revenue, Some(120.0));
        assert_eq!(record.prev_revenue, Some(100.0));
        assert_eq!(record.pat, Some(12.0));
        assert_eq!(record.prev_pat, Some(10.5));
        assert_eq!(record.eps, Some(1.2));
        assert_eq!(record.prev_eps, None);
        // dps only has a TTM entry
        assert_eq!(record.dps, None);
        assert_eq!(record.total_debt, None);
        assert_eq!(record.operating_cash_flow, None);
    }

    #[test]
    fn test_statements_align_independently() {
        let mut cashflow = FinancialDataset::new();
        cashflow.insert("fiscalYear", vec![json!("2024")]);
        cashflow.insert("ncfo", vec![json!(-7), json!(3)]);

        let record = normalize("X", "X", Some(&income()), Some(&balance()), Some(&cashflow)).unwrap();

        // balance has no TTM column
        assert_eq!(record.total_debt, Some(50.0));
        assert_eq!(record.prev_total_debt, Some(40.0));
        assert_eq!(record.shareholder_equity, Some(200.0));
        assert_eq!(record.prev_shareholder_equity, Some(180.0));
        // single fiscal year: no previous column even though ncfo has two values
        assert_eq!(record.operating_cash_flow, Some(-7.0));
        assert_eq!(record.prev_operating_cash_flow, None);
    }

    #[test]
    fn test_year_label_truncates_iso_dates() {
        let mut d = FinancialDataset::new();
        d.insert("datekey", vec![json!("2024-12-31"), json!("2023-12-31")]);
        assert_eq!(year_label(&d, Some(0)), "2024");
        assert_eq!(year_label(&d, Some(1)), "2023");
        assert_eq!(year_label(&d, Some(5)), "");
        assert_eq!(year_label(&d, None), "");
    }

    #[test]
    fn test_year_label_prefers_fiscal_year() {
        let mut d = FinancialDataset::new();
        d.insert("fiscalYear", vec![json!(2024)]);
        d.insert("datekey", vec![json!("2025-06-30")]);
        assert_eq!(year_label(&d, Some(0)), "2024");
    }

    #[test]
    fn test_numeric_coercion() {
        let mut d = FinancialDataset::new();
        d.insert("x", vec![json!(1), json!("2.5"), json!("n/a"), Value::Null, json!(true)]);
        assert_eq!(numeric_at(&d, "x", Some(0)), Some(1.0));
        assert_eq!(numeric_at(&d, "x", Some(1)), Some(2.5));
        assert_eq!(numeric_at(&d, "x", Some(2)), None);
        assert_eq!(numeric_at(&d, "x", Some(3)), None);
        assert_eq!(numeric_at(&d, "x", Some(4)), None);
        assert_eq!(numeric_at(&d, "missing", Some(0)), None);
        assert_eq!(numeric_at(&d, "x", None), None);
    }
}
