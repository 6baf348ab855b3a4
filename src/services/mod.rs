pub mod alignment;
pub mod extraction;
pub mod financials_cache;
pub mod financials_service;
pub mod formatting;
pub mod metric_evaluator;
pub mod normalizer;
pub mod recommendation;
pub mod ticker_directory;
