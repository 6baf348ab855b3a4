use axum::extract::Query;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::services::ticker_directory::{self, TickerMatch};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", get(search_tickers))
        .route("/top", get(top_tickers))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

pub async fn search_tickers(Query(query): Query<SearchQuery>) -> Result<Json<Vec<TickerMatch>>, AppError> {
    info!("GET /api/tickers/search - q={}", query.q);

    if query.q.trim().is_empty() {
        return Err(AppError::Validation("Query parameter 'q' must not be empty".to_string()));
    }

    Ok(Json(ticker_directory::search(&query.q)))
}

pub async fn top_tickers() -> Json<Vec<TickerMatch>> {
    info!("GET /api/tickers/top");
    Json(ticker_directory::top_tickers())
}
