//! The eight napkin-math rules.
//!
//! Each rule is a pure function of a [`FinancialRecord`]. Missing inputs and
//! uncomputable ratios land in an explicit yellow branch rather than an error.

use crate::models::{FinancialRecord, FormatKind, Metric, Signal};
use crate::services::formatting::format_naira;

pub const REVENUE: &str = "Revenue";
pub const PROFIT_AFTER_TAX: &str = "Profit After Tax";
pub const EPS: &str = "Earnings Per Share (EPS)";
pub const DPS: &str = "Dividend Per Share (DPS)";
pub const PAYOUT_RATIO: &str = "Payout Ratio";
pub const DEBT_TO_EQUITY: &str = "Debt-to-Equity";
pub const ROE: &str = "Return on Equity (ROE)";
pub const OPERATING_CASH_FLOW: &str = "Operating Cash Flow";

/// Year-over-year change in percent.
///
/// Undefined when either value is missing or the previous value is zero.
pub fn pct_change(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    match (current, previous) {
        (Some(current), Some(previous)) if previous != 0.0 => {
            Some((current - previous) * 100.0 / previous.abs())
        }
        _ => None,
    }
}

/// All eight rules in their fixed order
pub fn evaluate_all(fin: &FinancialRecord) -> Vec<Metric> {
    vec![
        evaluate_revenue(fin),
        evaluate_pat(fin),
        evaluate_eps(fin),
        evaluate_dps(fin),
        evaluate_payout_ratio(fin),
        evaluate_debt_to_equity(fin),
        evaluate_roe(fin),
        evaluate_operating_cash_flow(fin),
    ]
}

fn trend_metric(
    name: &str,
    current: Option<f64>,
    previous: Option<f64>,
    yoy: Option<f64>,
    (signal, explanation): (Signal, String),
    format_kind: FormatKind,
) -> Metric {
    Metric {
        name: name.to_string(),
        current_value: current,
        previous_value: previous,
        yoy_change: yoy,
        signal,
        explanation,
        format_kind,
    }
}

pub fn evaluate_revenue(fin: &FinancialRecord) -> Metric {
    let yoy = pct_change(fin.revenue, fin.prev_revenue);

    let judgment = match yoy {
        Some(y) if y >= 10.0 => (
            Signal::Green,
            format!("Revenue grew {:.1}% YoY - strong growth above the 10% threshold", y),
        ),
        Some(y) if y > 0.0 => (
            Signal::Yellow,
            format!("Revenue grew {:.1}% YoY - positive but below the 10-15% ideal", y),
        ),
        Some(y) => (
            Signal::Red,
            format!("Revenue changed {:.1}% YoY - flat or declining revenue is a red flag", y),
        ),
        None => (
            Signal::Yellow,
            "Insufficient data to calculate YoY revenue change".to_string(),
        ),
    };

    trend_metric(REVENUE, fin.revenue, fin.prev_revenue, yoy, judgment, FormatKind::Currency)
}

pub fn evaluate_pat(fin: &FinancialRecord) -> Metric {
    let yoy = pct_change(fin.pat, fin.prev_pat);

    let judgment = match (fin.pat, yoy) {
        (Some(pat), _) if pat < 0.0 => (
            Signal::Red,
            format!("Net loss of {} - company is not profitable", format_naira(Some(pat))),
        ),
        (_, Some(y)) if y > 0.0 => (
            Signal::Green,
            format!("Profit After Tax grew {:.1}% YoY - profitability is improving", y),
        ),
        (_, Some(y)) if y > -10.0 => (
            Signal::Yellow,
            format!("PAT changed {:.1}% YoY - relatively flat", y),
        ),
        (_, Some(y)) => (
            Signal::Red,
            format!("PAT declined {:.1}% YoY - a sustained profit decline is a warning", y),
        ),
        (_, None) => (
            Signal::Yellow,
            "Insufficient data to calculate PAT trend".to_string(),
        ),
    };

    trend_metric(PROFIT_AFTER_TAX, fin.pat, fin.prev_pat, yoy, judgment, FormatKind::Currency)
}

pub fn evaluate_eps(fin: &FinancialRecord) -> Metric {
    let yoy = pct_change(fin.eps, fin.prev_eps);

    let judgment = match (fin.eps, yoy) {
        (Some(eps), _) if eps < 0.0 => (
            Signal::Red,
            format!("Negative EPS (\u{20a6}{:.2}) - company is losing money per share", eps),
        ),
        (_, Some(y)) if y > 0.0 => (
            Signal::Green,
            format!("EPS increased {:.1}% YoY - earnings per share growing", y),
        ),
        (_, Some(y)) if y > -5.0 => (
            Signal::Yellow,
            format!("EPS roughly flat ({:.1}% YoY)", y),
        ),
        (_, Some(y)) => (
            Signal::Red,
            format!("EPS fell {:.1}% YoY - declining earnings is a red flag", y),
        ),
        (_, None) => (
            Signal::Yellow,
            "Insufficient data to evaluate EPS trend".to_string(),
        ),
    };

    trend_metric(EPS, fin.eps, fin.prev_eps, yoy, judgment, FormatKind::Number)
}

pub fn evaluate_dps(fin: &FinancialRecord) -> Metric {
    let paying = fin.dps.filter(|dps| *dps > 0.0);

    let Some(dps) = paying else {
        let judgment = match fin.prev_dps {
            Some(prev) if prev > 0.0 => (
                Signal::Red,
                "Dividend was cut or skipped - previously paid a dividend".to_string(),
            ),
            _ => (
                Signal::Yellow,
                "No dividend paid - not necessarily bad for growth stocks".to_string(),
            ),
        };
        return trend_metric(DPS, fin.dps, fin.prev_dps, None, judgment, FormatKind::Number);
    };

    let yoy = pct_change(Some(dps), fin.prev_dps);

    let judgment = match yoy {
        Some(y) if y > 0.0 => (
            Signal::Green,
            format!("DPS increased {:.1}% YoY - dividend is growing", y),
        ),
        Some(y) if y >= -5.0 => (
            Signal::Green,
            format!("DPS stable ({:.1}% YoY) - consistent dividend", y),
        ),
        Some(y) => (
            Signal::Red,
            format!("DPS declined {:.1}% YoY - dividend cut is a warning sign", y),
        ),
        None => (
            Signal::Green,
            format!("Paying a dividend of \u{20a6}{:.2} per share", dps),
        ),
    };

    trend_metric(DPS, fin.dps, fin.prev_dps, yoy, judgment, FormatKind::Number)
}

pub fn evaluate_payout_ratio(fin: &FinancialRecord) -> Metric {
    let (Some(eps), Some(dps)) = (fin.eps.filter(|eps| *eps > 0.0), fin.dps) else {
        return Metric::without_values(
            PAYOUT_RATIO,
            Signal::Yellow,
            "Cannot calculate - EPS is zero/negative or no dividend",
            FormatKind::Percent,
        );
    };

    let ratio = dps * 100.0 / eps;

    let (signal, explanation) = if (30.0..=70.0).contains(&ratio) {
        (
            Signal::Green,
            format!("Payout ratio of {:.1}% is in the healthy 30-70% range", ratio),
        )
    } else if ratio < 30.0 {
        (
            Signal::Yellow,
            format!("Payout ratio of {:.1}% is low - company retains most earnings", ratio),
        )
    } else if ratio <= 100.0 {
        (
            Signal::Yellow,
            format!("Payout ratio of {:.1}% is high - approaching sustainability limits", ratio),
        )
    } else {
        (
            Signal::Red,
            format!("Payout ratio of {:.1}% exceeds 100% - paying out more than it earns", ratio),
        )
    };

    Metric {
        current_value: Some(ratio),
        ..Metric::without_values(PAYOUT_RATIO, signal, explanation, FormatKind::Percent)
    }
}

pub fn evaluate_debt_to_equity(fin: &FinancialRecord) -> Metric {
    let (Some(debt), Some(equity)) = (fin.total_debt, fin.shareholder_equity.filter(|e| *e != 0.0)) else {
        return Metric::without_values(
            DEBT_TO_EQUITY,
            Signal::Yellow,
            "Insufficient data to calculate D/E ratio",
            FormatKind::Ratio,
        );
    };

    let ratio = debt / equity;

    let (signal, explanation) = if equity < 0.0 {
        (
            Signal::Red,
            format!("Negative equity - liabilities exceed assets. D/E: {:.2}\u{00d7}", ratio),
        )
    } else if ratio < 1.0 {
        (
            Signal::Green,
            format!("D/E of {:.2}\u{00d7} is conservative - debt well below equity", ratio),
        )
    } else if ratio <= 1.5 {
        (
            Signal::Green,
            format!("D/E of {:.2}\u{00d7} is within the healthy range (at most 1.5\u{00d7})", ratio),
        )
    } else if ratio <= 2.0 {
        (
            Signal::Yellow,
            format!("D/E of {:.2}\u{00d7} is moderate - approaching the 2.0\u{00d7} warning level", ratio),
        )
    } else {
        (
            Signal::Red,
            format!("D/E of {:.2}\u{00d7} exceeds 2.0\u{00d7} - high debt burden is a red flag", ratio),
        )
    };

    Metric {
        current_value: Some(ratio),
        ..Metric::without_values(DEBT_TO_EQUITY, signal, explanation, FormatKind::Ratio)
    }
}

pub fn evaluate_roe(fin: &FinancialRecord) -> Metric {
    let (Some(pat), Some(equity)) = (fin.pat, fin.shareholder_equity.filter(|e| *e > 0.0)) else {
        return Metric::without_values(
            ROE,
            Signal::Yellow,
            "Cannot calculate ROE - missing data or non-positive equity",
            FormatKind::Percent,
        );
    };

    let roe = pat * 100.0 / equity;

    let (signal, explanation) = if roe >= 15.0 {
        (
            Signal::Green,
            format!("ROE of {:.1}% is above the 15% threshold - strong returns", roe),
        )
    } else if roe >= 8.0 {
        (
            Signal::Yellow,
            format!("ROE of {:.1}% is moderate - between 8% and 15%", roe),
        )
    } else if roe >= 0.0 {
        (
            Signal::Red,
            format!("ROE of {:.1}% is below 8% - poor return on equity", roe),
        )
    } else {
        (
            Signal::Red,
            format!("Negative ROE ({:.1}%) - company is destroying shareholder value", roe),
        )
    };

    Metric {
        current_value: Some(roe),
        ..Metric::without_values(ROE, signal, explanation, FormatKind::Percent)
    }
}

pub fn evaluate_operating_cash_flow(fin: &FinancialRecord) -> Metric {
    let Some(ocf) = fin.operating_cash_flow else {
        return Metric::without_values(
            OPERATING_CASH_FLOW,
            Signal::Yellow,
            "No operating cash flow data available",
            FormatKind::Currency,
        );
    };

    let yoy = pct_change(Some(ocf), fin.prev_operating_cash_flow);

    let judgment = if ocf < 0.0 {
        (
            Signal::Red,
            format!("Negative operating cash flow ({}) - business is burning cash", format_naira(Some(ocf))),
        )
    } else if ocf == 0.0 {
        (
            Signal::Yellow,
            "Operating cash flow is zero - operations generated no cash".to_string(),
        )
    } else {
        match yoy {
            Some(y) if y > 0.0 => (
                Signal::Green,
                format!("Operating cash flow grew {:.1}% YoY - positive and growing", y),
            ),
            Some(y) if y > -10.0 => (
                Signal::Yellow,
                format!("Operating cash flow changed {:.1}% YoY - still positive but declining slightly", y),
            ),
            Some(y) => (
                Signal::Yellow,
                format!("Operating cash flow declined {:.1}% YoY - still positive but shrinking", y),
            ),
            None => (
                Signal::Green,
                format!("Positive operating cash flow of {}", format_naira(Some(ocf))),
            ),
        }
    };

    trend_metric(
        OPERATING_CASH_FLOW,
        Some(ocf),
        fin.prev_operating_cash_flow,
        yoy,
        judgment,
        FormatKind::Currency,
    )
}
