use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::{AnalysisResult, FormatKind, Metric, Recommendation, Signal};
use crate::services::recommendation::analyze;
use crate::state::AppState;

/// Most tickers a single comparison will look up
pub const MAX_COMPARE: usize = 3;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/analyze/:ticker", get(analyze_ticker))
        .route("/compare", get(compare_tickers))
}

/// A metric with its values pre-rendered for display
#[derive(Debug, Clone, Serialize)]
pub struct MetricResponse {
    pub name: String,
    pub current_value: Option<f64>,
    pub previous_value: Option<f64>,
    pub yoy_change: Option<f64>,
    pub signal: Signal,
    pub explanation: String,
    pub format_kind: FormatKind,
    pub current_display: String,
    pub previous_display: String,
    pub yoy_display: String,
}

impl From<Metric> for MetricResponse {
    fn from(metric: Metric) -> Self {
        let current_display = metric.display_current();
        let previous_display = metric.display_previous();
        let yoy_display = metric.display_yoy();
        Self {
            name: metric.name,
            current_value: metric.current_value,
            previous_value: metric.previous_value,
            yoy_change: metric.yoy_change,
            signal: metric.signal,
            explanation: metric.explanation,
            format_kind: metric.format_kind,
            current_display,
            previous_display,
            yoy_display,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    pub ticker: String,
    pub company_name: String,
    pub current_year: String,
    pub previous_year: String,
    pub recommendation: Recommendation,
    pub summary: String,
    pub green_count: usize,
    pub yellow_count: usize,
    pub red_count: usize,
    pub metrics: Vec<MetricResponse>,
}

impl From<AnalysisResult> for AnalysisResponse {
    fn from(result: AnalysisResult) -> Self {
        Self {
            ticker: result.ticker,
            company_name: result.company_name,
            current_year: result.current_year,
            previous_year: result.previous_year,
            recommendation: result.recommendation,
            summary: result.summary,
            green_count: result.green_count,
            yellow_count: result.yellow_count,
            red_count: result.red_count,
            metrics: result.metrics.into_iter().map(MetricResponse::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    #[serde(default)]
    pub tickers: String,
}

pub async fn analyze_ticker(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<AnalysisResponse>, AppError> {
    info!("GET /api/analyze/{} - Running napkin analysis", ticker);

    let record = state
        .financials
        .fetch_financials(&ticker)
        .await
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Could not fetch financial data for {}. The ticker may be invalid or the data source unavailable.",
                ticker.trim().to_uppercase()
            ))
        })?;

    let result = analyze(&record);
    info!(
        "{}: {} ({} green, {} yellow, {} red)",
        result.ticker, result.recommendation, result.green_count, result.yellow_count, result.red_count
    );

    Ok(Json(result.into()))
}

/// Up to `MAX_COMPARE` non-empty tickers from a comma-separated list
pub fn parse_compare_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .take(MAX_COMPARE)
        .map(str::to_string)
        .collect()
}

pub async fn compare_tickers(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<Vec<AnalysisResponse>>, AppError> {
    info!("GET /api/compare - tickers={}", query.tickers);

    let tickers = parse_compare_list(&query.tickers);
    if tickers.is_empty() {
        return Err(AppError::Validation("Provide at least one ticker to compare".to_string()));
    }

    let responses = state
        .financials
        .fetch_many(&tickers)
        .await
        .into_iter()
        .filter_map(|(ticker, record)| match record {
            Some(record) => Some(AnalysisResponse::from(analyze(&record))),
            None => {
                warn!("Skipping {} in comparison: no financial data", ticker);
                None
            }
        })
        .collect();

    Ok(Json(responses))
}
