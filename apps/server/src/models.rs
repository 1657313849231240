//! API response types and JSON sanitization.
//!
//! Numbers leave this process either finite or as an explicit null; the
//! [`finite`] filter is applied at response-shaping time so NaN/Infinity can
//! never reach the wire.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use modelfolio_core::factors::FactorLoadings;
use modelfolio_core::performance::PortfolioStats;
use modelfolio_core::sync::{FactorSyncStatus, NavSyncStatus};

/// Maps a non-finite number to the explicit "no value" marker.
pub fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// NAV values are published at fixed 6-decimal precision.
pub fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSeriesResponse {
    /// ISO dates, one label per trading day.
    pub labels: Vec<String>,
    /// Per-portfolio NAV arrays aligned to `labels`.
    pub series: BTreeMap<String, Vec<Option<f64>>>,
    pub stats: BTreeMap<String, StatsResponse>,
    pub holdings: BTreeMap<String, Vec<HoldingBreakdown>>,
    pub start_date: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_return: Option<f64>,
    pub cagr: Option<f64>,
    pub vol: Option<f64>,
    pub sharpe: Option<f64>,
    pub max_drawdown: Option<f64>,
    pub start_value: Option<f64>,
    pub end_value: Option<f64>,
}

impl From<&PortfolioStats> for StatsResponse {
    fn from(stats: &PortfolioStats) -> Self {
        Self {
            total_return: finite(stats.total_return),
            cagr: stats.cagr.and_then(finite),
            vol: stats.volatility.and_then(finite),
            sharpe: stats.sharpe.and_then(finite),
            max_drawdown: finite(stats.max_drawdown),
            start_value: finite(stats.start_value),
            end_value: finite(stats.end_value),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingBreakdown {
    pub ticker: String,
    pub weight: f64,
    pub weight_pct: f64,
    pub dollars: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorLoadingsResponse {
    pub alpha: Option<f64>,
    pub alpha_annualized: Option<f64>,
    pub beta_mkt: Option<f64>,
    pub beta_smb: Option<f64>,
    pub beta_hml: Option<f64>,
    pub beta_rmw: Option<f64>,
    pub beta_cma: Option<f64>,
    pub r_squared: Option<f64>,
    pub observations: i64,
    pub computed_at: DateTime<Utc>,
}

impl From<&FactorLoadings> for FactorLoadingsResponse {
    fn from(loadings: &FactorLoadings) -> Self {
        Self {
            alpha: finite(loadings.alpha),
            alpha_annualized: finite(loadings.annualized_alpha()),
            beta_mkt: finite(loadings.beta_mkt),
            beta_smb: finite(loadings.beta_smb),
            beta_hml: finite(loadings.beta_hml),
            beta_rmw: finite(loadings.beta_rmw),
            beta_cma: finite(loadings.beta_cma),
            r_squared: finite(loadings.r_squared),
            observations: loadings.observations,
            computed_at: loadings.computed_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub ok: bool,
    pub latest_date: Option<NaiveDate>,
    pub nav_sync: Option<NavSyncStatus>,
    pub factor_sync: Option<FactorSyncStatus>,
    pub factor_regression_available: bool,
    pub series_cached: bool,
    pub series_cache_age_secs: Option<u64>,
    pub series_last_error: Option<String>,
    pub outlook_cached: bool,
    pub outlook_last_error: Option<String>,
}
