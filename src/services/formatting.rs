//! Display helpers for metric values.
//!
//! Amounts are Naira. Large magnitudes are suffixed at the trillion, billion
//! and million thresholds with two decimals.

use crate::models::FormatKind;

const TRILLION: f64 = 1_000_000_000_000.0;
const BILLION: f64 = 1_000_000_000.0;
const MILLION: f64 = 1_000_000.0;

const MINUS: &str = "\u{2212}";
const NAIRA: &str = "\u{20a6}";

pub fn format_naira(value: Option<f64>) -> String {
    let Some(value) = value else {
        return "N/A".to_string();
    };

    let sign = if value < 0.0 { MINUS } else { "" };
    let abs = value.abs();

    if abs >= TRILLION {
        format!("{sign}{NAIRA}{:.2}T", abs / TRILLION)
    } else if abs >= BILLION {
        format!("{sign}{NAIRA}{:.2}B", abs / BILLION)
    } else if abs >= MILLION {
        format!("{sign}{NAIRA}{:.2}M", abs / MILLION)
    } else {
        format!("{sign}{NAIRA}{}", with_thousands(abs))
    }
}

pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}%", v),
        None => "N/A".to_string(),
    }
}

pub fn format_ratio(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}\u{00d7}", v),
        None => "N/A".to_string(),
    }
}

pub fn format_number(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "N/A".to_string(),
    }
}

/// Signed year-over-year change, e.g. `+12.5%`
pub fn format_change(value: Option<f64>) -> String {
    match value {
        Some(v) if v > 0.0 => format!("+{:.1}%", v),
        Some(v) => format!("{:.1}%", v),
        None => "N/A".to_string(),
    }
}

pub fn format_value(kind: FormatKind, value: Option<f64>) -> String {
    match kind {
        FormatKind::Currency => format_naira(value),
        FormatKind::Number => format_number(value),
        FormatKind::Percent => format_percent(value),
        FormatKind::Ratio => format_ratio(value),
    }
}

/// Two decimals with comma thousands separators; expects a non-negative value.
fn with_thousands(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{grouped}.{frac_part}")
}
