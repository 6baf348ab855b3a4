pub mod app;
pub mod config;
pub mod errors;
pub mod external;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use models::{AnalysisResult, FinancialRecord, Metric, Recommendation, Signal};
pub use services::financials_service::FinancialsService;
pub use services::recommendation::analyze;
