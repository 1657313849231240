//! Sync status records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of the most recent NAV refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavSyncStatus {
    pub success: bool,
    /// NAV rows written this refresh.
    pub rows_written: usize,
    /// Latest trading day covered by the refresh.
    pub latest_date: Option<NaiveDate>,
    pub error: Option<String>,
    pub completed_at: DateTime<Utc>,
}

/// Outcome of the most recent factor refresh, including the regression pass
/// it triggered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorSyncStatus {
    pub success: bool,
    /// Factor rows written this refresh.
    pub rows_written: usize,
    pub error: Option<String>,
    /// Portfolios with freshly fitted loadings, when the regression ran.
    pub regressions_fitted: Option<usize>,
    /// Why the regression pass produced nothing, when it failed.
    pub regression_error: Option<String>,
    pub completed_at: DateTime<Utc>,
}
