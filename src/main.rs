use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use napkin_backend::app;
use napkin_backend::config::AppConfig;
use napkin_backend::external::page_fetcher::{FetchPolicy, HttpPageFetcher};
use napkin_backend::logging::{init_logging, LoggingConfig};
use napkin_backend::services::financials_cache::FinancialsCache;
use napkin_backend::services::financials_service::FinancialsService;
use napkin_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // logging first so config errors are reported
    init_logging(LoggingConfig::from_env()).map_err(|e| anyhow::anyhow!(e))?;

    let config = AppConfig::from_env().context("invalid configuration")?;

    let policy = FetchPolicy {
        timeout: config.fetch_timeout(),
        ..FetchPolicy::default()
    };
    let fetcher = HttpPageFetcher::new(policy).context("failed to build HTTP client")?;

    let financials = FinancialsService::new(
        Arc::new(fetcher),
        FinancialsCache::with_system_clock(config.cache_ttl()),
        config.source_base_url.clone(),
        config.fetch_pacing(),
    );
    let app = app::create_app(AppState::new(financials));

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!(
        "Napkin backend running at http://{}/ (source: {})",
        config.bind_addr,
        config.source_base_url
    );

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
