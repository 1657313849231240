use serde::{Deserialize, Serialize};

/// Summary risk/return metrics for one portfolio's equity curve.
///
/// Fields are `None` when the statistic cannot be computed from the
/// available data (too few observations, zero dispersion, non-positive
/// endpoints), never NaN or infinity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioStats {
    /// last / first - 1 over the curve.
    pub total_return: f64,
    /// Compound annual growth rate on a 365.25-day year.
    pub cagr: Option<f64>,
    /// Annualized standard deviation of daily returns.
    pub volatility: Option<f64>,
    /// Annualized Sharpe ratio at a zero risk-free rate.
    pub sharpe: Option<f64>,
    /// Worst peak-to-trough decline; 0 for a non-decreasing curve.
    pub max_drawdown: f64,
    pub start_value: f64,
    pub end_value: f64,
}
