use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;

use crate::models::FinancialRecord;

/// Default time-to-live of a cached record
pub const DEFAULT_TTL_SECS: i64 = 3600;

/// Time source for cache expiry
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(start) }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

#[derive(Debug, Clone)]
struct CachedRecord {
    record: FinancialRecord,
    fetched_at: DateTime<Utc>,
}

/// Thread-safe ticker → financial record cache with a fixed TTL
#[derive(Clone)]
pub struct FinancialsCache {
    store: Arc<DashMap<String, CachedRecord>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl FinancialsCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Arc::new(DashMap::new()),
            ttl,
            clock,
        }
    }

    pub fn with_system_clock(ttl: Duration) -> Self {
        Self::new(ttl, Arc::new(SystemClock))
    }

    /// Stored record for `ticker` if it is younger than the TTL
    pub fn get(&self, ticker: &str) -> Option<FinancialRecord> {
        let entry = self.store.get(ticker)?;
        let age = self.clock.now() - entry.fetched_at;
        if age < self.ttl {
            Some(entry.record.clone())
        } else {
            None
        }
    }

    /// Store a record stamped with the current time, replacing any previous entry
    pub fn insert(&self, ticker: &str, record: FinancialRecord) {
        let cached = CachedRecord {
            record,
            fetched_at: self.clock.now(),
        };
        self.store.insert(ticker.to_string(), cached);
    }

    pub fn clear(&self) {
        self.store.clear();
    }

    /// Drop entries whose TTL has elapsed
    pub fn cleanup_expired(&self) {
        let now = self.clock.now();
        let ttl = self.ttl;
        self.store.retain(|_, cached| now - cached.fetched_at < ttl);
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn cache_with_clock() -> (FinancialsCache, Arc<ManualClock>) {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let clock = Arc::new(ManualClock::new(start));
        let cache = FinancialsCache::new(Duration::seconds(DEFAULT_TTL_SECS), clock.clone());
        (cache, clock)
    }

    #[test]
    fn test_hit_within_ttl() {
        let (cache, clock) = cache_with_clock();
        let record = FinancialRecord::new("MTNN", "MTN Nigeria");

        cache.insert("MTNN", record.clone());
        clock.advance(Duration::seconds(3599));

        assert_eq!(cache.get("MTNN"), Some(record));
    }

    #[test]
    fn test_miss_after_ttl() {
        let (cache, clock) = cache_with_clock();
        cache.insert("MTNN", FinancialRecord::new("MTNN", "MTN Nigeria"));

        clock.advance(Duration::seconds(3601));
        assert!(cache.get("MTNN").is_none());

        // exactly at the TTL is already stale
        let (cache, clock) = cache_with_clock();
        cache.insert("MTNN", FinancialRecord::new("MTNN", "MTN Nigeria"));
        clock.advance(Duration::seconds(3600));
        assert!(cache.get("MTNN").is_none());
    }

    #[test]
    fn test_insert_overwrites_and_restamps() {
        let (cache, clock) = cache_with_clock();
        cache.insert("GTCO", FinancialRecord::new("GTCO", "old"));
        clock.advance(Duration::seconds(3000));
        cache.insert("GTCO", FinancialRecord::new("GTCO", "new"));
        clock.advance(Duration::seconds(3000));

        assert_eq!(cache.get("GTCO").unwrap().company_name, "new");
    }

    #[test]
    fn test_clear_and_cleanup() {
        let (cache, clock) = cache_with_clock();
        cache.insert("A", FinancialRecord::new("A", "A"));
        clock.advance(Duration::seconds(4000));
        cache.insert("B", FinancialRecord::new("B", "B"));

        cache.cleanup_expired();
        assert_eq!(cache.len(), 1);
        assert!(cache.get("B").is_some());

        cache.clear();
        assert!(cache.is_empty());
    }
}
