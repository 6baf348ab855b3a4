use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use tracing::info;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/clear-cache", post(clear_cache))
}

#[derive(Debug, Serialize)]
pub struct ClearCacheResponse {
    pub message: String,
    pub entries_cleared: usize,
}

pub async fn clear_cache(State(state): State<AppState>) -> Json<ClearCacheResponse> {
    info!("POST /api/admin/clear-cache - Clearing financials cache");

    let entries_cleared = state.financials.cache().len();
    state.financials.clear_cache();

    Json(ClearCacheResponse {
        message: "Cache cleared".to_string(),
        entries_cleared,
    })
}
