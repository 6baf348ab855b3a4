use crate::models::{AnalysisResult, FinancialRecord, Metric, Recommendation, Signal};
use crate::services::metric_evaluator::evaluate_all;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignalCounts {
    pub green: usize,
    pub yellow: usize,
    pub red: usize,
}

impl SignalCounts {
    pub fn tally(metrics: &[Metric]) -> Self {
        metrics.iter().fold(Self::default(), |mut counts, metric| {
            match metric.signal {
                Signal::Green => counts.green += 1,
                Signal::Yellow => counts.yellow += 1,
                Signal::Red => counts.red += 1,
            }
            counts
        })
    }
}

/// Apply the decision table to signal counts. First matching rule wins.
pub fn recommend(counts: SignalCounts) -> (Recommendation, String) {
    let SignalCounts { green, yellow, red } = counts;

    if red >= 2 {
        (
            Recommendation::Sell,
            format!("SELL/AVOID - {} red flags detected. Multiple warning signs suggest caution.", red),
        )
    } else if green >= 6 && red == 0 {
        (
            Recommendation::Buy,
            format!("BUY - {}/8 metrics look strong with no red flags. Fundamentals are solid.", green),
        )
    } else if green >= 4 && red <= 1 {
        (
            Recommendation::Buy,
            format!(
                "BUY - {}/8 green signals with only {} concern(s). Generally positive outlook.",
                green, red
            ),
        )
    } else if red == 1 {
        (
            Recommendation::Hold,
            format!(
                "HOLD - Mixed signals with {} green and {} red. Watch the flagged metric closely.",
                green, red
            ),
        )
    } else {
        (
            Recommendation::Hold,
            format!(
                "HOLD - {} green, {} neutral, {} red. Insufficient strong signals either way.",
                green, yellow, red
            ),
        )
    }
}

/// Aggregate evaluated metrics into a recommendation and summary.
pub fn aggregate(metrics: &[Metric]) -> (Recommendation, String) {
    recommend(SignalCounts::tally(metrics))
}

/// Run all eight rules over a record and aggregate them.
///
/// Pure and total: any record, including one with every field missing,
/// yields a full result.
pub fn analyze(fin: &FinancialRecord) -> AnalysisResult {
    let metrics = evaluate_all(fin);
    let (recommendation, summary) = aggregate(&metrics);
    let counts = SignalCounts::tally(&metrics);

    AnalysisResult {
        ticker: fin.ticker.clone(),
        company_name: fin.company_name.clone(),
        current_year: fin.current_year.clone(),
        previous_year: fin.previous_year.clone(),
        metrics,
        recommendation,
        green_count: counts.green,
        yellow_count: counts.yellow,
        red_count: counts.red,
        summary,
    }
}
