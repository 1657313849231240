//! Factor regression engine.
//!
//! Aligns stored portfolio returns with stored factor returns on common
//! trading days and fits ordinary least squares per portfolio: excess return
//! on the five factor returns plus an intercept. Results are persisted as
//! one current row per portfolio; rows for portfolios no longer in the
//! catalog are pruned after every run.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use log::{info, warn};
use nalgebra::{DMatrix, DVector};
use thiserror::Error;

use super::factors_model::{FactorLoadings, FactorRecord};
use super::factors_traits::{FactorLoadingsRepositoryTrait, FactorRepositoryTrait};
use crate::constants::{regression_window_start, MIN_REGRESSION_OBSERVATIONS};
use crate::errors::Result;
use crate::navs::NavRepositoryTrait;
use crate::portfolios::Portfolio;

/// Errors from the regression engine.
///
/// `InsufficientOverlap` is expected while the factor dataset's coverage
/// lags the live portfolio window and is reported, not treated as fatal to
/// the surrounding sync.
#[derive(Error, Debug)]
pub enum RegressionError {
    #[error("NAV store is empty within the regression window")]
    EmptyNavStore,

    #[error("Factor store is empty")]
    EmptyFactorStore,

    #[error(
        "Only {overlap} common trading days (NAV {nav_start}..{nav_end}, \
         factors {factor_start}..{factor_end}); {required} required"
    )]
    InsufficientOverlap {
        nav_start: NaiveDate,
        nav_end: NaiveDate,
        factor_start: NaiveDate,
        factor_end: NaiveDate,
        overlap: usize,
        required: usize,
    },

    #[error("Least-squares solve failed: {0}")]
    Computation(String),
}

/// Outcome counts for one regression run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegressionSummary {
    /// Portfolios with freshly persisted loadings.
    pub fitted: usize,
    /// Portfolios skipped for too few observations or a failed fit.
    pub skipped: usize,
    /// Orphaned result rows removed.
    pub pruned: usize,
}

/// Coefficients of one fitted portfolio.
struct OlsFit {
    alpha: f64,
    betas: [f64; 5],
    r_squared: f64,
    observations: usize,
}

/// Service that runs the full regression pass over the catalog.
pub struct RegressionService {
    nav_repository: Arc<dyn NavRepositoryTrait>,
    factor_repository: Arc<dyn FactorRepositoryTrait>,
    loadings_repository: Arc<dyn FactorLoadingsRepositoryTrait>,
}

impl RegressionService {
    pub fn new(
        nav_repository: Arc<dyn NavRepositoryTrait>,
        factor_repository: Arc<dyn FactorRepositoryTrait>,
        loadings_repository: Arc<dyn FactorLoadingsRepositoryTrait>,
    ) -> Self {
        Self {
            nav_repository,
            factor_repository,
            loadings_repository,
        }
    }

    /// Runs regressions for every catalog portfolio with enough data,
    /// persists the results, and prunes orphaned rows.
    pub async fn run(&self, catalog: &[Portfolio]) -> Result<RegressionSummary> {
        let navs = self.nav_repository.read_since(regression_window_start())?;
        if navs.is_empty() {
            return Err(RegressionError::EmptyNavStore.into());
        }

        let factor_rows = self.factor_repository.read_all()?;
        if factor_rows.is_empty() {
            return Err(RegressionError::EmptyFactorStore.into());
        }

        let factors_by_date: BTreeMap<NaiveDate, &FactorRecord> =
            factor_rows.iter().map(|r| (r.date, r)).collect();

        // The forced-zero inception row carries no information; returns are
        // indexed on dates[1..].
        let return_dates: Vec<NaiveDate> = navs.dates.iter().skip(1).copied().collect();
        let common: Vec<NaiveDate> = return_dates
            .iter()
            .filter(|date| factors_by_date.contains_key(date))
            .copied()
            .collect();

        if common.len() < MIN_REGRESSION_OBSERVATIONS {
            return Err(RegressionError::InsufficientOverlap {
                nav_start: navs.dates[0],
                nav_end: navs.dates[navs.dates.len() - 1],
                factor_start: factor_rows[0].date,
                factor_end: factor_rows[factor_rows.len() - 1].date,
                overlap: common.len(),
                required: MIN_REGRESSION_OBSERVATIONS,
            }
            .into());
        }

        let returns = navs.daily_returns();
        let computed_at = Utc::now();

        let mut loadings = Vec::new();
        let mut skipped = 0usize;

        for portfolio in catalog {
            let Some(per_date) = returns.get(&portfolio.name) else {
                info!("{}: no NAV history in window, skipping", portfolio.name);
                skipped += 1;
                continue;
            };

            let mut excess = Vec::new();
            let mut factor_rows_aligned = Vec::new();
            for date in &common {
                if let Some(daily_return) = per_date.get(date) {
                    let record = factors_by_date[date];
                    let y = daily_return - record.rf_decimal();
                    if y.is_finite() {
                        excess.push(y);
                        factor_rows_aligned.push(record.factors_decimal());
                    }
                }
            }

            if excess.len() < MIN_REGRESSION_OBSERVATIONS {
                info!(
                    "{}: only {} observations, skipping regression",
                    portfolio.name,
                    excess.len()
                );
                skipped += 1;
                continue;
            }

            match fit_ols(&excess, &factor_rows_aligned) {
                Ok(fit) => loadings.push(FactorLoadings {
                    portfolio_name: portfolio.name.clone(),
                    alpha: fit.alpha,
                    beta_mkt: fit.betas[0],
                    beta_smb: fit.betas[1],
                    beta_hml: fit.betas[2],
                    beta_rmw: fit.betas[3],
                    beta_cma: fit.betas[4],
                    r_squared: fit.r_squared,
                    observations: fit.observations as i64,
                    computed_at,
                }),
                Err(e) => {
                    warn!("{}: regression failed: {}", portfolio.name, e);
                    skipped += 1;
                }
            }
        }

        self.loadings_repository.upsert_loadings(&loadings).await?;

        let keep: Vec<String> = catalog.iter().map(|p| p.name.clone()).collect();
        let pruned = self.loadings_repository.delete_missing(&keep).await?;

        info!(
            "Regression pass: {} fitted, {} skipped, {} pruned over {} common days",
            loadings.len(),
            skipped,
            pruned,
            common.len()
        );

        Ok(RegressionSummary {
            fitted: loadings.len(),
            skipped,
            pruned,
        })
    }
}

/// Ordinary least squares of y on [1 | x] via singular value decomposition.
///
/// SVD yields the minimum-norm solution, which keeps the fit well-defined
/// even when a factor column is constant over the sample.
fn fit_ols(y: &[f64], x_rows: &[[f64; 5]]) -> std::result::Result<OlsFit, RegressionError> {
    let n = y.len();

    let mut x = DMatrix::<f64>::zeros(n, 6);
    for (i, row) in x_rows.iter().enumerate() {
        x[(i, 0)] = 1.0;
        for (j, value) in row.iter().enumerate() {
            x[(i, j + 1)] = *value;
        }
    }
    let y = DVector::from_column_slice(y);

    let svd = x.clone().svd(true, true);
    let coefficients = svd
        .solve(&y, 1e-12)
        .map_err(|e| RegressionError::Computation(e.to_string()))?;

    let residuals = &y - &x * &coefficients;
    let ss_res = residuals.norm_squared();
    let mean = y.mean();
    let ss_tot: f64 = y.iter().map(|v| (v - mean).powi(2)).sum();
    let r_squared = if ss_tot > 0.0 { 1.0 - ss_res / ss_tot } else { 0.0 };

    Ok(OlsFit {
        alpha: coefficients[0],
        betas: [
            coefficients[1],
            coefficients[2],
            coefficients[3],
            coefficients[4],
            coefficients[5],
        ],
        r_squared,
        observations: n,
    })
}
