//! Instrument return table builder.
//!
//! Turns a raw multi-symbol price table into a daily simple-return table
//! aligned on a single ascending date index. Gaps are forward-filled, the
//! inception row is forced to zero (no prior reference), and non-finite
//! returns collapse to zero.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::{debug, warn};

use crate::constants::CASH_SYMBOL;
use crate::errors::{CurveError, Result};
use crate::portfolios::Portfolio;
use modelfolio_market_data::PriceHistory;

/// Daily simple returns per market symbol over a shared date index.
///
/// Every column has exactly `dates.len()` entries and every entry is finite.
#[derive(Debug, Clone, Default)]
pub struct ReturnTable {
    /// Ascending trading-day index.
    pub dates: Vec<NaiveDate>,
    /// Market symbol -> daily simple return, aligned to `dates`.
    pub columns: BTreeMap<String, Vec<f64>>,
}

impl ReturnTable {
    /// True when no trading day survived filtering.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Normalizes a catalog ticker to its market-facing quote code.
///
/// The literal CASH pseudo-symbol passes through unchanged (it is never
/// requested from the market); any other ticker has its dot-delimited
/// share-class suffix rewritten to the market's dash notation, e.g.
/// "BRK.B" -> "BRK-B".
pub fn market_symbol(ticker: &str) -> String {
    let ticker = ticker.trim();
    if ticker.eq_ignore_ascii_case(CASH_SYMBOL) {
        return ticker.to_string();
    }
    ticker.replace('.', "-")
}

/// The deduplicated, normalized, sorted symbol universe of a catalog,
/// excluding the CASH pseudo-symbol.
pub fn symbol_universe(catalog: &[Portfolio]) -> Vec<String> {
    let mut symbols: Vec<String> = catalog
        .iter()
        .flat_map(|p| p.holdings.iter())
        .filter(|h| !h.is_cash())
        .map(|h| market_symbol(&h.symbol))
        .collect();
    symbols.sort();
    symbols.dedup();
    symbols
}

/// Builds the daily return table for a catalog from raw price history.
///
/// Columns are restricted to the normalized catalog symbols actually present
/// in the response; symbols the provider returned nothing for are dropped
/// here and handled downstream as zero-return capital. Fails only when no
/// column survives at all.
pub fn build_return_table(history: &PriceHistory, catalog: &[Portfolio]) -> Result<ReturnTable> {
    let universe = symbol_universe(catalog);

    let mut available: Vec<(&str, &BTreeMap<NaiveDate, f64>)> = Vec::new();
    for symbol in &universe {
        match history.series(symbol) {
            Some(series) => available.push((symbol, series)),
            None => warn!("Dropping {}: absent from the price response", symbol),
        }
    }

    if available.is_empty() {
        return Err(CurveError::NoPriceColumns {
            requested: universe.len(),
        }
        .into());
    }

    // Shared ascending date index over every surviving column.
    let mut dates: Vec<NaiveDate> = available
        .iter()
        .flat_map(|(_, series)| series.keys().copied())
        .collect();
    dates.sort();
    dates.dedup();

    let mut columns = BTreeMap::new();
    for (symbol, series) in available {
        columns.insert(symbol.to_string(), column_returns(&dates, series));
    }

    debug!(
        "Built return table: {} days x {} symbols",
        dates.len(),
        columns.len()
    );

    Ok(ReturnTable { dates, columns })
}

/// Forward-fills one symbol's closes over the shared index and converts them
/// to simple daily returns. The first row is forced to zero, and any return
/// that cannot be computed (leading gap, zero or non-finite prior close)
/// is zero as well.
fn column_returns(dates: &[NaiveDate], series: &BTreeMap<NaiveDate, f64>) -> Vec<f64> {
    let mut filled: Vec<Option<f64>> = Vec::with_capacity(dates.len());
    let mut last: Option<f64> = None;
    for date in dates {
        if let Some(close) = series.get(date) {
            last = Some(*close);
        }
        filled.push(last);
    }

    let mut returns = Vec::with_capacity(dates.len());
    for i in 0..filled.len() {
        if i == 0 {
            returns.push(0.0);
            continue;
        }
        let change = match (filled[i - 1], filled[i]) {
            (Some(prev), Some(current)) if prev != 0.0 => current / prev - 1.0,
            _ => 0.0,
        };
        returns.push(if change.is_finite() { change } else { 0.0 });
    }
    returns
}
