//! Sync orchestrator.
//!
//! Coordinates the NAV refresh and the factor/regression refresh. Failures
//! inside a refresh are converted into the owned status records rather than
//! raised past the orchestrator; the HTTP layer reads those records through
//! the health surface. Overlapping refreshes are tolerated - store writes
//! are whole-batch transactional, so the worst case is duplicate work.

use std::sync::{Arc, RwLock};

use chrono::Utc;
use log::{error, info, warn};

use super::sync_model::{FactorSyncStatus, NavSyncStatus};
use crate::cache::InvalidateCache;
use crate::constants::inception_date;
use crate::equity::{compute_equity_curves, to_nav_records};
use crate::errors::Result;
use crate::factors::{FactorRepositoryTrait, FactorSourceTrait, RegressionService};
use crate::navs::NavRepositoryTrait;
use crate::portfolios::Portfolio;
use crate::returns::{build_return_table, symbol_universe};
use modelfolio_market_data::provider::PriceHistoryProvider;

/// Owns both refresh pipelines and their status records.
pub struct SyncService {
    catalog: Arc<Vec<Portfolio>>,
    price_provider: Arc<dyn PriceHistoryProvider>,
    nav_repository: Arc<dyn NavRepositoryTrait>,
    factor_repository: Arc<dyn FactorRepositoryTrait>,
    factor_source: Arc<dyn FactorSourceTrait>,
    regression_service: Arc<RegressionService>,
    caches: Vec<Arc<dyn InvalidateCache>>,
    nav_status: RwLock<Option<NavSyncStatus>>,
    factor_status: RwLock<Option<FactorSyncStatus>>,
}

impl SyncService {
    pub fn new(
        catalog: Arc<Vec<Portfolio>>,
        price_provider: Arc<dyn PriceHistoryProvider>,
        nav_repository: Arc<dyn NavRepositoryTrait>,
        factor_repository: Arc<dyn FactorRepositoryTrait>,
        factor_source: Arc<dyn FactorSourceTrait>,
        regression_service: Arc<RegressionService>,
        caches: Vec<Arc<dyn InvalidateCache>>,
    ) -> Self {
        Self {
            catalog,
            price_provider,
            nav_repository,
            factor_repository,
            factor_source,
            regression_service,
            caches,
            nav_status: RwLock::new(None),
            factor_status: RwLock::new(None),
        }
    }

    /// Last recorded NAV refresh outcome.
    pub fn nav_status(&self) -> Option<NavSyncStatus> {
        self.nav_status.read().unwrap().clone()
    }

    /// Last recorded factor refresh outcome.
    pub fn factor_status(&self) -> Option<FactorSyncStatus> {
        self.factor_status.read().unwrap().clone()
    }

    /// Startup sequence: always refresh NAVs; download the factor dataset
    /// only when the store is empty, otherwise just re-run regressions
    /// against the data already on disk.
    pub async fn startup(&self) {
        info!("Startup sync: refreshing NAVs");
        self.sync_navs().await;

        match self.factor_repository.row_count() {
            Ok(0) => {
                info!("Factor store is empty, running initial factor refresh");
                self.sync_factors().await;
            }
            Ok(rows) => {
                info!("Factor store has {} rows, skipping download", rows);
                self.regress_and_log().await;
            }
            Err(e) => error!("Could not inspect factor store: {}", e),
        }
    }

    /// Full NAV refresh: fetch prices, rebuild curves, upsert, expire the
    /// response caches, then trigger a regression pass. Always records and
    /// returns a status.
    pub async fn sync_navs(&self) -> NavSyncStatus {
        let status = match self.refresh_navs().await {
            Ok((rows_written, latest_date)) => {
                info!(
                    "NAV refresh complete: {} rows, latest {:?}",
                    rows_written, latest_date
                );
                NavSyncStatus {
                    success: true,
                    rows_written,
                    latest_date,
                    error: None,
                    completed_at: Utc::now(),
                }
            }
            Err(e) => {
                error!("NAV refresh failed: {}", e);
                NavSyncStatus {
                    success: false,
                    rows_written: 0,
                    latest_date: None,
                    error: Some(e.to_string()),
                    completed_at: Utc::now(),
                }
            }
        };

        *self.nav_status.write().unwrap() = Some(status.clone());

        // Fresh NAV data shifts the regression inputs; insufficient factor
        // coverage here is routine and must not fail the NAV sync.
        if status.success {
            self.regress_and_log().await;
        }

        status
    }

    /// Full factor refresh: download and parse the dataset, upsert, then run
    /// regressions. Always records and returns a status.
    pub async fn sync_factors(&self) -> FactorSyncStatus {
        let mut status = match self.refresh_factors().await {
            Ok(rows_written) => {
                info!("Factor refresh complete: {} rows", rows_written);
                FactorSyncStatus {
                    success: true,
                    rows_written,
                    error: None,
                    regressions_fitted: None,
                    regression_error: None,
                    completed_at: Utc::now(),
                }
            }
            Err(e) => {
                error!("Factor refresh failed: {}", e);
                FactorSyncStatus {
                    success: false,
                    rows_written: 0,
                    error: Some(e.to_string()),
                    regressions_fitted: None,
                    regression_error: None,
                    completed_at: Utc::now(),
                }
            }
        };

        if status.success {
            match self.regression_service.run(&self.catalog).await {
                Ok(summary) => {
                    status.regressions_fitted = Some(summary.fitted);
                }
                Err(e) => {
                    warn!("Regression pass after factor refresh failed: {}", e);
                    status.regression_error = Some(e.to_string());
                }
            }
            status.completed_at = Utc::now();
        }

        *self.factor_status.write().unwrap() = Some(status.clone());
        status
    }

    async fn refresh_navs(&self) -> Result<(usize, Option<chrono::NaiveDate>)> {
        let symbols = symbol_universe(&self.catalog);
        let history = self
            .price_provider
            .daily_history(&symbols, inception_date())
            .await?;

        let table = build_return_table(&history, &self.catalog)?;
        let curves = compute_equity_curves(&table, &self.catalog)?;
        let records = to_nav_records(&table, &curves);

        let rows_written = self.nav_repository.upsert_navs(&records).await?;

        for cache in &self.caches {
            cache.invalidate();
        }

        Ok((rows_written, table.dates.last().copied()))
    }

    async fn refresh_factors(&self) -> Result<usize> {
        let records = self.factor_source.fetch().await?;
        self.factor_repository.upsert_factors(&records).await
    }

    async fn regress_and_log(&self) {
        match self.regression_service.run(&self.catalog).await {
            Ok(summary) => info!(
                "Regression pass: {} fitted, {} skipped, {} pruned",
                summary.fitted, summary.skipped, summary.pruned
            ),
            Err(e) => warn!("Regression pass skipped: {}", e),
        }
    }
}
