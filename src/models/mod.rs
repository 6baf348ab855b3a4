mod analysis;
mod financial_record;
mod metric;

pub use analysis::{AnalysisResult, Recommendation};
pub use financial_record::FinancialRecord;
pub use metric::{FormatKind, Metric, Signal};
