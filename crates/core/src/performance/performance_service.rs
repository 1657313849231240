//! Statistics engine: summary metrics over one NAV curve.

use chrono::NaiveDate;

use super::performance_model::PortfolioStats;
use crate::constants::TRADING_DAYS_PER_YEAR;

/// Computes summary statistics for one date-ordered NAV curve.
///
/// Non-finite points are discarded first; curves with fewer than two valid
/// points are skipped entirely (`None`) rather than producing degenerate
/// stats.
pub fn compute_stats(curve: &[(NaiveDate, f64)]) -> Option<PortfolioStats> {
    let valid: Vec<(NaiveDate, f64)> = curve
        .iter()
        .copied()
        .filter(|(_, nav)| nav.is_finite())
        .collect();

    if valid.len() < 2 {
        return None;
    }

    let (first_date, first_nav) = valid[0];
    let (last_date, last_nav) = valid[valid.len() - 1];

    let total_return = last_nav / first_nav - 1.0;

    let days_elapsed = (last_date - first_date).num_days();
    let cagr = if days_elapsed > 0 && first_nav > 0.0 && last_nav > 0.0 {
        let years = days_elapsed as f64 / 365.25;
        Some((last_nav / first_nav).powf(1.0 / years) - 1.0)
    } else {
        None
    };

    let returns: Vec<f64> = valid
        .windows(2)
        .filter_map(|pair| {
            let prev = pair[0].1;
            let current = pair[1].1;
            if prev != 0.0 {
                let change = current / prev - 1.0;
                change.is_finite().then_some(change)
            } else {
                None
            }
        })
        .collect();

    let (volatility, sharpe) = match sample_stdev(&returns) {
        Some(stdev) if stdev > 0.0 => {
            let mean = returns.iter().sum::<f64>() / returns.len() as f64;
            let annualized_vol = stdev * TRADING_DAYS_PER_YEAR.sqrt();
            let annualized_sharpe = (mean * TRADING_DAYS_PER_YEAR) / annualized_vol;
            (Some(annualized_vol), Some(annualized_sharpe))
        }
        _ => (None, None),
    };

    let navs: Vec<f64> = valid.iter().map(|(_, nav)| *nav).collect();

    Some(PortfolioStats {
        total_return,
        cagr,
        volatility,
        sharpe,
        max_drawdown: max_drawdown(&navs),
        start_value: first_nav,
        end_value: last_nav,
    })
}

/// Worst peak-to-trough decline: min over time of nav / running-peak - 1.
/// Exactly 0 for a monotonically non-decreasing curve.
pub fn max_drawdown(navs: &[f64]) -> f64 {
    let mut peak = f64::MIN;
    let mut worst: f64 = 0.0;
    for nav in navs {
        peak = peak.max(*nav);
        if peak > 0.0 {
            worst = worst.min(nav / peak - 1.0);
        }
    }
    worst
}

/// Sample standard deviation (n - 1 denominator); `None` below two points.
fn sample_stdev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Some(variance.sqrt())
}
