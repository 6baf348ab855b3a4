//! End-to-end scrape → analysis over canned statement pages.

mod common;

use std::sync::Arc;

use common::{healthy_fetcher, service, StubFetcher, DISTRESSED_INCOME};
use napkin_backend::{analyze, Recommendation, Signal};

#[tokio::test]
async fn test_healthy_company_is_a_buy() {
    let fetcher = Arc::new(healthy_fetcher("DANGCEM"));
    let service = service(fetcher.clone());

    let record = service.fetch_financials("dangcem").await.expect("record");
    assert_eq!(fetcher.calls(), 3);

    // income has a TTM column first, the other statements do not
    assert_eq!(record.current_year, "2024");
    assert_eq!(record.previous_year, "2023");
    assert_eq!(record.revenue, Some(120_000_000_000.0));
    assert_eq!(record.prev_revenue, Some(100_000_000_000.0));
    assert_eq!(record.dps, Some(1.2));
    assert_eq!(record.total_debt, Some(60_000_000_000.0));
    assert_eq!(record.shareholder_equity, Some(120_000_000_000.0));
    assert_eq!(record.operating_cash_flow, Some(30_000_000_000.0));

    let result = analyze(&record);
    assert_eq!(result.company_name, "Dangote Cement Plc");
    assert_eq!(result.green_count, 8);
    assert_eq!(result.recommendation, Recommendation::Buy);
    assert_eq!(
        result.summary,
        "BUY - 8/8 metrics look strong with no red flags. Fundamentals are solid."
    );
}

#[tokio::test]
async fn test_distressed_company_without_balance_sheet() {
    let fetcher = Arc::new(StubFetcher::default().with_page("OANDO", "financials/", DISTRESSED_INCOME));
    let service = service(fetcher.clone());

    let record = service.fetch_financials("OANDO").await.expect("record");
    assert_eq!(fetcher.calls(), 3);
    assert_eq!(record.eps, Some(-0.5));
    assert_eq!(record.total_debt, None);
    assert_eq!(record.operating_cash_flow, None);

    let result = analyze(&record);
    let signal_of = |name: &str| {
        result
            .metrics
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.signal)
            .expect("metric present")
    };

    assert_eq!(signal_of("Revenue"), Signal::Red);
    assert_eq!(signal_of("Earnings Per Share (EPS)"), Signal::Red);
    assert_eq!(signal_of("Dividend Per Share (DPS)"), Signal::Red);
    assert_eq!(signal_of("Operating Cash Flow"), Signal::Yellow);
    assert_eq!(result.recommendation, Recommendation::Sell);
    assert!(result.summary.starts_with("SELL/AVOID"));
    assert_eq!(result.green_count + result.yellow_count + result.red_count, 8);
}

#[tokio::test]
async fn test_unparseable_income_page_yields_nothing() {
    let fetcher = Arc::new(
        StubFetcher::default().with_page("MTNN", "financials/", "<html><p>Access denied</p></html>"),
    );
    let service = service(fetcher.clone());

    assert!(service.fetch_financials("MTNN").await.is_none());
    assert!(service.cache().is_empty());
}

#[tokio::test]
async fn test_second_lookup_is_served_from_cache() {
    let fetcher = Arc::new(healthy_fetcher("GTCO"));
    let service = service(fetcher.clone());

    let first = service.fetch_financials("GTCO").await;
    let second = service.fetch_financials(" gtco").await;

    assert_eq!(first, second);
    assert_eq!(fetcher.calls(), 3);
}
