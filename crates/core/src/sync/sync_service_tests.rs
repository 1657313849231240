use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};

use super::sync_service::SyncService;
use crate::cache::InvalidateCache;
use crate::constants::INITIAL_CAPITAL;
use crate::errors::Result;
use crate::factors::{
    FactorLoadings, FactorLoadingsRepositoryTrait, FactorRecord, FactorRepositoryTrait,
    FactorSourceTrait, RegressionService,
};
use crate::navs::{NavCurveSet, NavRecord, NavRepositoryTrait};
use crate::portfolios::Portfolio;
use modelfolio_market_data::{MarketDataError, PriceHistory, PriceHistoryProvider};

// ============================================================================
// Mock Implementations
// ============================================================================

struct MockPriceProvider {
    history: Option<PriceHistory>,
    calls: AtomicUsize,
}

impl MockPriceProvider {
    fn with_history(history: PriceHistory) -> Self {
        Self {
            history: Some(history),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            history: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl PriceHistoryProvider for MockPriceProvider {
    fn id(&self) -> &'static str {
        "MOCK"
    }

    async fn daily_history(
        &self,
        symbols: &[String],
        start: NaiveDate,
    ) -> std::result::Result<PriceHistory, MarketDataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.history {
            Some(history) => Ok(history.clone()),
            None => Err(MarketDataError::EmptyResponse {
                requested: symbols.len(),
                start: start.to_string(),
            }),
        }
    }
}

#[derive(Default)]
struct MockNavRepository {
    records: RwLock<BTreeMap<(NaiveDate, String), f64>>,
}

#[async_trait]
impl NavRepositoryTrait for MockNavRepository {
    async fn upsert_navs(&self, records: &[NavRecord]) -> Result<usize> {
        let mut stored = self.records.write().unwrap();
        for record in records {
            stored.insert((record.date, record.portfolio_name.clone()), record.nav);
        }
        Ok(records.len())
    }

    fn read_since(&self, since: NaiveDate) -> Result<NavCurveSet> {
        let rows: Vec<NavRecord> = self
            .records
            .read()
            .unwrap()
            .iter()
            .filter(|((date, _), _)| *date >= since)
            .map(|((date, name), nav)| NavRecord {
                date: *date,
                portfolio_name: name.clone(),
                nav: *nav,
            })
            .collect();
        Ok(NavCurveSet::from_records(&rows))
    }

    fn latest_date(&self) -> Result<Option<NaiveDate>> {
        Ok(self
            .records
            .read()
            .unwrap()
            .keys()
            .map(|(date, _)| *date)
            .max())
    }
}

#[derive(Default)]
struct MockFactorRepository {
    rows: RwLock<Vec<FactorRecord>>,
}

#[async_trait]
impl FactorRepositoryTrait for MockFactorRepository {
    async fn upsert_factors(&self, records: &[FactorRecord]) -> Result<usize> {
        let mut rows = self.rows.write().unwrap();
        for record in records {
            rows.retain(|r| r.date != record.date);
            rows.push(record.clone());
        }
        rows.sort_by_key(|r| r.date);
        Ok(records.len())
    }

    fn row_count(&self) -> Result<i64> {
        Ok(self.rows.read().unwrap().len() as i64)
    }

    fn read_all(&self) -> Result<Vec<FactorRecord>> {
        Ok(self.rows.read().unwrap().clone())
    }
}

#[derive(Default)]
struct MockLoadingsRepository {
    stored: RwLock<BTreeMap<String, FactorLoadings>>,
}

#[async_trait]
impl FactorLoadingsRepositoryTrait for MockLoadingsRepository {
    async fn upsert_loadings(&self, loadings: &[FactorLoadings]) -> Result<usize> {
        let mut stored = self.stored.write().unwrap();
        for row in loadings {
            stored.insert(row.portfolio_name.clone(), row.clone());
        }
        Ok(loadings.len())
    }

    fn list(&self) -> Result<Vec<FactorLoadings>> {
        Ok(self.stored.read().unwrap().values().cloned().collect())
    }

    async fn delete_missing(&self, keep: &[String]) -> Result<usize> {
        let mut stored = self.stored.write().unwrap();
        let before = stored.len();
        stored.retain(|name, _| keep.contains(name));
        Ok(before - stored.len())
    }
}

struct MockFactorSource {
    rows: Vec<FactorRecord>,
    calls: AtomicUsize,
}

#[async_trait]
impl FactorSourceTrait for MockFactorSource {
    async fn fetch(&self) -> Result<Vec<FactorRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.clone())
    }
}

#[derive(Default)]
struct SpyCache {
    invalidations: AtomicUsize,
}

impl InvalidateCache for SpyCache {
    fn invalidate(&self) {
        self.invalidations.fetch_add(1, Ordering::SeqCst);
    }
}

// ============================================================================
// Fixtures
// ============================================================================

struct Fixture {
    service: SyncService,
    nav_repository: Arc<MockNavRepository>,
    factor_repository: Arc<MockFactorRepository>,
    loadings_repository: Arc<MockLoadingsRepository>,
    price_provider: Arc<MockPriceProvider>,
    factor_source: Arc<MockFactorSource>,
    cache: Arc<SpyCache>,
}

fn catalog() -> Arc<Vec<Portfolio>> {
    Arc::new(vec![Portfolio::new("SPY", &[("SPY", 1.0)])])
}

fn price_history(days: usize) -> PriceHistory {
    let start: NaiveDate = "2026-02-02".parse().unwrap();
    let mut history = PriceHistory::new();
    for i in 0..days {
        let date = start + Duration::days(i as i64);
        history.insert("SPY", date, 100.0 + i as f64);
    }
    history
}

fn fixture(
    price_provider: MockPriceProvider,
    factor_rows: Vec<FactorRecord>,
    preloaded_factors: Vec<FactorRecord>,
) -> Fixture {
    let nav_repository = Arc::new(MockNavRepository::default());
    let factor_repository = Arc::new(MockFactorRepository::default());
    *factor_repository.rows.write().unwrap() = preloaded_factors;
    let loadings_repository = Arc::new(MockLoadingsRepository::default());
    let price_provider = Arc::new(price_provider);
    let factor_source = Arc::new(MockFactorSource {
        rows: factor_rows,
        calls: AtomicUsize::new(0),
    });
    let cache = Arc::new(SpyCache::default());

    let regression_service = Arc::new(RegressionService::new(
        nav_repository.clone(),
        factor_repository.clone(),
        loadings_repository.clone(),
    ));

    let service = SyncService::new(
        catalog(),
        price_provider.clone(),
        nav_repository.clone(),
        factor_repository.clone(),
        factor_source.clone(),
        regression_service,
        vec![cache.clone()],
    );

    Fixture {
        service,
        nav_repository,
        factor_repository,
        loadings_repository,
        price_provider,
        factor_source,
        cache,
    }
}

fn factor_rows_covering(days: usize) -> Vec<FactorRecord> {
    let start: NaiveDate = "2026-02-02".parse().unwrap();
    (0..days)
        .map(|i| FactorRecord {
            date: start + Duration::days(i as i64),
            mkt_rf: 0.1 * i as f64 - 1.0,
            smb: 0.0,
            hml: 0.0,
            rmw: 0.0,
            cma: 0.0,
            rf: 0.0,
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn nav_sync_writes_rows_and_invalidates_caches() {
    let f = fixture(
        MockPriceProvider::with_history(price_history(5)),
        Vec::new(),
        Vec::new(),
    );

    let status = f.service.sync_navs().await;

    assert!(status.success);
    assert_eq!(status.rows_written, 5);
    assert_eq!(
        status.latest_date,
        Some("2026-02-06".parse().unwrap())
    );
    assert!(status.error.is_none());
    assert_eq!(f.cache.invalidations.load(Ordering::SeqCst), 1);

    let stored = f
        .nav_repository
        .read_since("2026-02-02".parse().unwrap())
        .unwrap();
    assert_eq!(stored.dates.len(), 5);
    assert_eq!(stored.series["SPY"][0], Some(INITIAL_CAPITAL));

    assert_eq!(f.service.nav_status().unwrap(), status);
}

#[tokio::test]
async fn nav_sync_failure_becomes_a_status_record() {
    let f = fixture(MockPriceProvider::failing(), Vec::new(), Vec::new());

    let status = f.service.sync_navs().await;

    assert!(!status.success);
    assert_eq!(status.rows_written, 0);
    assert!(status.error.as_deref().unwrap().contains("no data"));
    assert_eq!(f.cache.invalidations.load(Ordering::SeqCst), 0);
    assert!(f
        .nav_repository
        .read_since("2026-02-02".parse().unwrap())
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn factor_sync_upserts_then_regresses() {
    let f = fixture(
        MockPriceProvider::with_history(price_history(40)),
        factor_rows_covering(40),
        Vec::new(),
    );

    // NAV data must exist before the regression can fit anything.
    f.service.sync_navs().await;
    let status = f.service.sync_factors().await;

    assert!(status.success);
    assert_eq!(status.rows_written, 40);
    assert_eq!(status.regressions_fitted, Some(1));
    assert!(status.regression_error.is_none());
    assert_eq!(f.loadings_repository.list().unwrap().len(), 1);
}

#[tokio::test]
async fn regression_shortfall_is_recorded_not_fatal() {
    // Only five days of factor coverage: the fetch succeeds but the
    // regression reports insufficient overlap.
    let f = fixture(
        MockPriceProvider::with_history(price_history(40)),
        factor_rows_covering(5),
        Vec::new(),
    );

    f.service.sync_navs().await;
    let status = f.service.sync_factors().await;

    assert!(status.success);
    assert_eq!(status.rows_written, 5);
    assert!(status.regressions_fitted.is_none());
    assert!(status
        .regression_error
        .as_deref()
        .unwrap()
        .contains("common trading days"));
}

#[tokio::test]
async fn startup_skips_the_download_when_factors_exist() {
    let f = fixture(
        MockPriceProvider::with_history(price_history(40)),
        factor_rows_covering(40),
        factor_rows_covering(40),
    );

    f.service.startup().await;

    assert_eq!(f.price_provider.calls.load(Ordering::SeqCst), 1);
    assert_eq!(f.factor_source.calls.load(Ordering::SeqCst), 0);
    // Regressions still ran against the preloaded factor data.
    assert_eq!(f.loadings_repository.list().unwrap().len(), 1);
}

#[tokio::test]
async fn startup_downloads_into_an_empty_factor_store() {
    let f = fixture(
        MockPriceProvider::with_history(price_history(40)),
        factor_rows_covering(40),
        Vec::new(),
    );

    f.service.startup().await;

    assert_eq!(f.factor_source.calls.load(Ordering::SeqCst), 1);
    assert_eq!(f.factor_repository.row_count().unwrap(), 40);
    assert!(f.service.factor_status().unwrap().success);
}
