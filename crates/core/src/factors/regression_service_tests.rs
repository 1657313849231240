use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};

use super::regression_service::{RegressionError, RegressionService};
use crate::errors::{Error, Result};
use crate::factors::{
    FactorLoadings, FactorLoadingsRepositoryTrait, FactorRecord, FactorRepositoryTrait,
};
use crate::navs::{NavCurveSet, NavRecord, NavRepositoryTrait};
use crate::portfolios::Portfolio;

// ============================================================================
// Mock Implementations
// ============================================================================

struct MockNavRepository {
    records: Vec<NavRecord>,
}

#[async_trait]
impl NavRepositoryTrait for MockNavRepository {
    async fn upsert_navs(&self, _records: &[NavRecord]) -> Result<usize> {
        unimplemented!()
    }

    fn read_since(&self, since: NaiveDate) -> Result<NavCurveSet> {
        let filtered: Vec<NavRecord> = self
            .records
            .iter()
            .filter(|r| r.date >= since)
            .cloned()
            .collect();
        Ok(NavCurveSet::from_records(&filtered))
    }

    fn latest_date(&self) -> Result<Option<NaiveDate>> {
        Ok(self.records.iter().map(|r| r.date).max())
    }
}

struct MockFactorRepository {
    rows: Vec<FactorRecord>,
}

#[async_trait]
impl FactorRepositoryTrait for MockFactorRepository {
    async fn upsert_factors(&self, _records: &[FactorRecord]) -> Result<usize> {
        unimplemented!()
    }

    fn row_count(&self) -> Result<i64> {
        Ok(self.rows.len() as i64)
    }

    fn read_all(&self) -> Result<Vec<FactorRecord>> {
        Ok(self.rows.clone())
    }
}

#[derive(Default)]
struct MockLoadingsRepository {
    stored: RwLock<BTreeMap<String, FactorLoadings>>,
    upsert_calls: AtomicUsize,
}

#[async_trait]
impl FactorLoadingsRepositoryTrait for MockLoadingsRepository {
    async fn upsert_loadings(&self, loadings: &[FactorLoadings]) -> Result<usize> {
        self.upsert_calls.fetch_add(1, Ordering::SeqCst);
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

// ============================================================================
// Fixtures
// ============================================================================

fn trading_days(count: usize) -> Vec<NaiveDate> {
    let start: NaiveDate = "2025-03-03".parse().unwrap();
    (0..count)
        .map(|i| start + Duration::days(i as i64))
        .collect()
}

fn factor_row(date: NaiveDate, mkt_rf: f64) -> FactorRecord {
    FactorRecord {
        date,
        mkt_rf,
        smb: 0.0,
        hml: 0.0,
        rmw: 0.0,
        cma: 0.0,
        rf: 0.0,
    }
}

/// NAV curve engineered so the daily return is exactly twice the (decimal)
/// market factor, with every other factor flat and a zero risk-free rate.
fn synthetic_fixture(days: usize) -> (Vec<NavRecord>, Vec<FactorRecord>) {
    let dates = trading_days(days);

    let mut navs = Vec::new();
    let mut factors = Vec::new();
    let mut nav = 100.0;

    for (i, date) in dates.iter().enumerate() {
        // Percent units; varies so the regressor has dispersion.
        let mkt_rf = 0.05 * (i as f64) - 0.8;
        factors.push(factor_row(*date, mkt_rf));

        if i > 0 {
            nav *= 1.0 + 2.0 * (mkt_rf / 100.0);
        }
        navs.push(NavRecord {
            date: *date,
            portfolio_name: "Synth".to_string(),
            nav,
        });
    }

    (navs, factors)
}

fn make_service(
    navs: Vec<NavRecord>,
    factors: Vec<FactorRecord>,
) -> (RegressionService, Arc<MockLoadingsRepository>) {
    let loadings = Arc::new(MockLoadingsRepository::default());
    let service = RegressionService::new(
        Arc::new(MockNavRepository { records: navs }),
        Arc::new(MockFactorRepository { rows: factors }),
        loadings.clone(),
    );
    (service, loadings)
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn recovers_synthetic_coefficients_within_tolerance() {
    let (navs, factors) = synthetic_fixture(40);
    let (service, loadings) = make_service(navs, factors);

    let summary = service
        .run(&[Portfolio::new("Synth", &[("SPY", 1.0)])])
        .await
        .unwrap();
    assert_eq!(summary.fitted, 1);

    let fitted = &loadings.list().unwrap()[0];
    assert!(fitted.alpha.abs() < 1e-9, "alpha = {}", fitted.alpha);
    assert!(
        (fitted.beta_mkt - 2.0).abs() < 1e-9,
        "beta_mkt = {}",
        fitted.beta_mkt
    );
    assert!(
        (fitted.r_squared - 1.0).abs() < 1e-9,
        "r_squared = {}",
        fitted.r_squared
    );
    assert_eq!(fitted.observations, 39);
}

#[tokio::test]
async fn fitting_twice_is_deterministic() {
    let (navs, factors) = synthetic_fixture(40);
    let catalog = vec![Portfolio::new("Synth", &[("SPY", 1.0)])];

    let (service, loadings) = make_service(navs.clone(), factors.clone());
    service.run(&catalog).await.unwrap();
    let first = loadings.list().unwrap();

    let (service, loadings) = make_service(navs, factors);
    service.run(&catalog).await.unwrap();
    let second = loadings.list().unwrap();

    assert_eq!(first[0].alpha.to_bits(), second[0].alpha.to_bits());
    assert_eq!(first[0].beta_mkt.to_bits(), second[0].beta_mkt.to_bits());
    assert_eq!(first[0].r_squared.to_bits(), second[0].r_squared.to_bits());
}

#[tokio::test]
async fn insufficient_overlap_reports_ranges_and_writes_nothing() {
    let (navs, mut factors) = synthetic_fixture(15);
    // Keep only 10 factor days; overlap drops below the minimum.
    factors.truncate(10);
    let (service, loadings) = make_service(navs, factors);

    let err = service
        .run(&[Portfolio::new("Synth", &[("SPY", 1.0)])])
        .await
        .unwrap_err();

    match err {
        Error::Regression(RegressionError::InsufficientOverlap {
            overlap, required, ..
        }) => {
            assert!(overlap < required);
        }
        other => panic!("expected InsufficientOverlap, got {}", other),
    }

    assert_eq!(loadings.upsert_calls.load(Ordering::SeqCst), 0);
    assert!(loadings.list().unwrap().is_empty());
}

#[tokio::test]
async fn portfolios_with_too_few_observations_are_skipped_not_fatal() {
    let (mut navs, factors) = synthetic_fixture(40);
    // A second portfolio with only five NAV points.
    let dates = trading_days(5);
    for date in dates {
        navs.push(NavRecord {
            date,
            portfolio_name: "Young".to_string(),
            nav: 100.0,
        });
    }

    let catalog = vec![
        Portfolio::new("Synth", &[("SPY", 1.0)]),
        Portfolio::new("Young", &[("QQQ", 1.0)]),
    ];
    let (service, loadings) = make_service(navs, factors);

    let summary = service.run(&catalog).await.unwrap();
    assert_eq!(summary.fitted, 1);
    assert_eq!(summary.skipped, 1);

    let names: Vec<String> = loadings
        .list()
        .unwrap()
        .into_iter()
        .map(|l| l.portfolio_name)
        .collect();
    assert_eq!(names, vec!["Synth"]);
}

#[tokio::test]
async fn orphaned_results_are_pruned_after_a_run() {
    let (navs, factors) = synthetic_fixture(40);
    let (service, loadings) = make_service(navs, factors);

    // A stale result for a portfolio that left the catalog.
    loadings
        .upsert_loadings(&[FactorLoadings {
            portfolio_name: "Renamed Away".to_string(),
            alpha: 0.0,
            beta_mkt: 1.0,
            beta_smb: 0.0,
            beta_hml: 0.0,
            beta_rmw: 0.0,
            beta_cma: 0.0,
            r_squared: 0.5,
            observations: 30,
            computed_at: chrono::Utc::now(),
        }])
        .await
        .unwrap();

    let summary = service
        .run(&[Portfolio::new("Synth", &[("SPY", 1.0)])])
        .await
        .unwrap();
    assert_eq!(summary.pruned, 1);

    let names: Vec<String> = loadings
        .list()
        .unwrap()
        .into_iter()
        .map(|l| l.portfolio_name)
        .collect();
    assert_eq!(names, vec!["Synth"]);
}

#[tokio::test]
async fn empty_stores_are_reported_distinctly() {
    let (_, factors) = synthetic_fixture(25);
    let (service, _) = make_service(Vec::new(), factors);
    let err = service.run(&[]).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Regression(RegressionError::EmptyNavStore)
    ));

    let (navs, _) = synthetic_fixture(25);
    let (service, _) = make_service(navs, Vec::new());
    let err = service.run(&[]).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Regression(RegressionError::EmptyFactorStore)
    ));
}
