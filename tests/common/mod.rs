#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use napkin_backend::external::page_fetcher::PageFetcher;
use napkin_backend::services::financials_cache::{FinancialsCache, ManualClock};
use napkin_backend::services::financials_service::FinancialsService;

pub const BASE: &str = "http://source.test/quote/ngx";

/// Serves canned pages by URL and counts every request.
#[derive(Default)]
pub struct StubFetcher {
    pages: HashMap<String, String>,
    calls: AtomicUsize,
}

impl StubFetcher {
    pub fn with_page(mut self, ticker: &str, path: &str, html: &str) -> Self {
        self.pages.insert(format!("{BASE}/{ticker}/{path}"), html.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pages.get(url).cloned()
    }
}

pub fn service(fetcher: Arc<StubFetcher>) -> FinancialsService {
    let cache = FinancialsCache::new(
        chrono::Duration::seconds(3600),
        Arc::new(ManualClock::new(Utc::now())),
    );
    FinancialsService::new(fetcher, cache, BASE, Duration::ZERO)
}

/// Income page with a bare-key object literal, leading-dot decimals and `void 0`.
pub const HEALTHY_INCOME: &str = r#"<html><body><script>
const data = [null,{type:"data",data:{financialData:{datekey:["2025-06-30","2024-12-31","2023-12-31"],fiscalYear:["TTM","2024","2023"],revenue:[130000000000,120000000000,100000000000],netinc:[25000000000,24000000000,20000000000],epsBasic:[2.5,2.4,2],dps:[void 0,1.2,1],payoutratio:[.48,.5,.5]},map:[]},uses:{}}];
</script></body></html>"#;

/// Balance sheet without a financialData key; only per-field arrays survive.
pub const HEALTHY_BALANCE: &str = r#"<html><script>
window.__statement = {"rows":{"fiscalYear":["2024","2023"],"debt":[60000000000,50000000000],"equity":[120000000000,100000000000]}};
</script></html>"#;

/// Cash flow page with a quoted key and whitespace before the brace.
pub const HEALTHY_CASH_FLOW: &str = r#"<html><script>
var payload = {"financialData": {"fiscalYear":["2024","2023"],"ncfo":[30000000000,25000000000]}, "other": 1};
</script></html>"#;

pub const DISTRESSED_INCOME: &str = r#"<script>
{financialData:{fiscalYear:["2024","2023"],revenue:[90000000000,100000000000],netinc:[-5000000000,2000000000],epsBasic:[-.5,.2],dps:[0,.5]}}
</script>"#;

pub fn healthy_fetcher(ticker: &str) -> StubFetcher {
    StubFetcher::default()
        .with_page(ticker, "financials/", HEALTHY_INCOME)
        .with_page(ticker, "financials/balance-sheet/", HEALTHY_BALANCE)
        .with_page(ticker, "financials/cash-flow-statement/", HEALTHY_CASH_FLOW)
}
