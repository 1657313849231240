//! Factor dataset and regression result models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::TRADING_DAYS_PER_YEAR;

/// One day of five-factor data plus the risk-free rate, keyed by date.
///
/// Values are kept in the upstream source's unit convention (percent) and
/// converted to fractional decimal only at consumption time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorRecord {
    pub date: NaiveDate,
    /// Market excess return.
    pub mkt_rf: f64,
    /// Size (small minus big).
    pub smb: f64,
    /// Value (high minus low).
    pub hml: f64,
    /// Profitability (robust minus weak).
    pub rmw: f64,
    /// Investment (conservative minus aggressive).
    pub cma: f64,
    /// Risk-free rate.
    pub rf: f64,
}

impl FactorRecord {
    /// The five factor returns as fractional decimals, in regression column
    /// order (Mkt-RF, SMB, HML, RMW, CMA).
    pub fn factors_decimal(&self) -> [f64; 5] {
        [
            self.mkt_rf / 100.0,
            self.smb / 100.0,
            self.hml / 100.0,
            self.rmw / 100.0,
            self.cma / 100.0,
        ]
    }

    /// The risk-free rate as a fractional decimal.
    pub fn rf_decimal(&self) -> f64 {
        self.rf / 100.0
    }
}

/// The persisted outcome of one portfolio's factor regression.
///
/// At most one current row per portfolio; a refresh overwrites it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorLoadings {
    pub portfolio_name: String,
    /// Daily regression intercept.
    pub alpha: f64,
    pub beta_mkt: f64,
    pub beta_smb: f64,
    pub beta_hml: f64,
    pub beta_rmw: f64,
    pub beta_cma: f64,
    pub r_squared: f64,
    /// Number of excess-return observations the fit used.
    pub observations: i64,
    pub computed_at: DateTime<Utc>,
}

impl FactorLoadings {
    /// The intercept scaled to an annual rate.
    pub fn annualized_alpha(&self) -> f64 {
        self.alpha * TRADING_DAYS_PER_YEAR
    }
}
