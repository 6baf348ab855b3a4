use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use futures::future::join_all;
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::external::page_fetcher::PageFetcher;
use crate::external::stockanalysis::{is_valid_ticker, normalize_ticker, Statement};
use crate::models::FinancialRecord;
use crate::services::extraction::{extract, FinancialDataset};
use crate::services::financials_cache::FinancialsCache;
use crate::services::normalizer::normalize;
use crate::services::ticker_directory;

/// Courtesy delay between consecutive page requests for one ticker
pub const DEFAULT_PACING: Duration = Duration::from_millis(1500);

/// Cache-wrapped scrape pipeline: fetch → extract → align → normalize.
pub struct FinancialsService {
    fetcher: Arc<dyn PageFetcher>,
    cache: FinancialsCache,
    base_url: String,
    pacing: Duration,
    /// Per-ticker gate so concurrent misses for one ticker scrape only once
    in_flight: DashMap<String, Arc<Mutex<()>>>,
}

impl FinancialsService {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        cache: FinancialsCache,
        base_url: impl Into<String>,
        pacing: Duration,
    ) -> Self {
        Self {
            fetcher,
            cache,
            base_url: base_url.into(),
            pacing,
            in_flight: DashMap::new(),
        }
    }

    /// Financial record for a ticker, served from cache while fresh.
    ///
    /// Returns `None` when the income statement could not be fetched or parsed.
    /// Failures are not cached.
    pub async fn fetch_financials(&self, ticker: &str) -> Option<FinancialRecord> {
        let ticker = normalize_ticker(ticker);
        if !is_valid_ticker(&ticker) {
            warn!("Rejecting malformed ticker {:?}", ticker);
            return None;
        }

        if let Some(record) = self.cache.get(&ticker) {
            debug!("Cache hit for {}", ticker);
            return Some(record);
        }

        let gate = self.in_flight.entry(ticker.clone()).or_default().clone();
        let _guard = gate.lock().await;

        let record = self.load_uncached(&ticker).await;

        // the map's handle plus ours; anyone else still waiting keeps the gate alive
        self.in_flight
            .remove_if(&ticker, |_, gate| Arc::strong_count(gate) <= 2);
        record
    }

    /// Fetch several tickers concurrently; each keeps its own sequential
    /// three-page scrape. Results come back in input order.
    pub async fn fetch_many(&self, tickers: &[String]) -> Vec<(String, Option<FinancialRecord>)> {
        let lookups = tickers.iter().map(|ticker| async move {
            let record = self.fetch_financials(ticker).await;
            (normalize_ticker(ticker), record)
        });
        join_all(lookups).await
    }

    pub fn clear_cache(&self) {
        info!("Clearing financials cache ({} entries)", self.cache.len());
        self.cache.clear();
    }

    pub fn cache(&self) -> &FinancialsCache {
        &self.cache
    }

    /// Scrape and cache under the per-ticker gate.
    async fn load_uncached(&self, ticker: &str) -> Option<FinancialRecord> {
        // another task may have filled the cache while we waited
        if let Some(record) = self.cache.get(ticker) {
            debug!("Cache filled for {} while waiting", ticker);
            return Some(record);
        }

        self.cache.cleanup_expired();
        info!("Scraping financial statements for {}", ticker);
        let record = self.scrape(ticker).await;

        match &record {
            Some(record) => self.cache.insert(ticker, record.clone()),
            None => warn!("No financial record available for {}", ticker),
        }
        record
    }

    async fn scrape(&self, ticker: &str) -> Option<FinancialRecord> {
        let income = self.fetch_statement(ticker, Statement::Income).await;
        if income.is_none() {
            // the record cannot be built without it
            return None;
        }

        sleep(self.pacing).await;
        let balance = self.fetch_statement(ticker, Statement::BalanceSheet).await;

        sleep(self.pacing).await;
        let cashflow = self.fetch_statement(ticker, Statement::CashFlow).await;

        let company_name = ticker_directory::company_name(ticker).unwrap_or(ticker);
        normalize(
            ticker,
            company_name,
            income.as_ref(),
            balance.as_ref(),
            cashflow.as_ref(),
        )
    }

    async fn fetch_statement(&self, ticker: &str, statement: Statement) -> Option<FinancialDataset> {
        let url = statement.url(&self.base_url, ticker);

        let Some(html) = self.fetcher.fetch(&url).await else {
            warn!("Could not fetch {} for {}", statement, ticker);
            return None;
        };

        let dataset = extract(&html);
        if dataset.is_none() {
            warn!("No financial data found in {} page for {}", statement, ticker);
        }
        dataset
    }
}
