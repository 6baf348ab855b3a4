use serde::{Deserialize, Serialize};

use crate::services::formatting;

/// Classification attached to every evaluated metric
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    /// Favorable
    Green,
    /// Neutral, or not enough data to judge
    Yellow,
    /// Unfavorable
    Red,
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Signal::Green => write!(f, "green"),
            Signal::Yellow => write!(f, "yellow"),
            Signal::Red => write!(f, "red"),
        }
    }
}

/// How the display layer should render a metric's values
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    Currency,
    Number,
    Percent,
    Ratio,
}

/// One of the eight napkin-math judgments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    pub current_value: Option<f64>,
    pub previous_value: Option<f64>,
    /// Year-over-year change in percent; absent when undefined
    pub yoy_change: Option<f64>,
    pub signal: Signal,
    pub explanation: String,
    pub format_kind: FormatKind,
}

impl Metric {
    /// A metric carrying only a signal and its explanation.
    pub fn without_values(
        name: &str,
        signal: Signal,
        explanation: impl Into<String>,
        format_kind: FormatKind,
    ) -> Self {
        Self {
            name: name.to_string(),
            current_value: None,
            previous_value: None,
            yoy_change: None,
            signal,
            explanation: explanation.into(),
            format_kind,
        }
    }

    pub fn display_current(&self) -> String {
        formatting::format_value(self.format_kind, self.current_value)
    }

    pub fn display_previous(&self) -> String {
        formatting::format_value(self.format_kind, self.previous_value)
    }

    pub fn display_yoy(&self) -> String {
        formatting::format_change(self.yoy_change)
    }
}
