//! Portfolio equity engine.
//!
//! Blends weighted instrument returns into per-portfolio daily NAV curves.
//! A holding whose symbol is absent from the return table is treated as
//! zero-return capital; weights are never renormalized across the remaining
//! holdings, so a data failure for one instrument never inflates the others'
//! effective exposure.

use std::collections::BTreeMap;

use log::warn;

use crate::constants::INITIAL_CAPITAL;
use crate::errors::{CurveError, Result};
use crate::navs::NavRecord;
use crate::portfolios::Portfolio;
use crate::returns::{market_symbol, ReturnTable};

/// Computes every portfolio's NAV curve over the return table's date index.
///
/// Each curve starts at [`INITIAL_CAPITAL`] on the first trading day (the
/// return table forces that day's returns to zero) and compounds the
/// weight-blended daily contribution thereafter.
pub fn compute_equity_curves(
    table: &ReturnTable,
    catalog: &[Portfolio],
) -> Result<BTreeMap<String, Vec<f64>>> {
    let mut curves = BTreeMap::new();

    for portfolio in catalog {
        let contributions = daily_contributions(table, portfolio);
        if contributions.is_empty() {
            continue;
        }

        let mut nav = INITIAL_CAPITAL;
        let curve = contributions
            .iter()
            .map(|contribution| {
                nav *= 1.0 + contribution;
                nav
            })
            .collect();
        curves.insert(portfolio.name.clone(), curve);
    }

    if curves.is_empty() {
        return Err(CurveError::NoCurves.into());
    }

    Ok(curves)
}

/// Flattens curves into persistable NAV records, one per (date, portfolio).
pub fn to_nav_records(table: &ReturnTable, curves: &BTreeMap<String, Vec<f64>>) -> Vec<NavRecord> {
    let mut records = Vec::new();
    for (name, curve) in curves {
        for (date, nav) in table.dates.iter().zip(curve.iter()) {
            records.push(NavRecord {
                date: *date,
                portfolio_name: name.clone(),
                nav: *nav,
            });
        }
    }
    records
}

/// One portfolio's daily blended return: sum of weight x return over its
/// nonzero-weight, non-CASH holdings that have a column in the table.
fn daily_contributions(table: &ReturnTable, portfolio: &Portfolio) -> Vec<f64> {
    let mut contributions = vec![0.0; table.dates.len()];

    for holding in &portfolio.holdings {
        if holding.is_cash() || holding.weight == 0.0 {
            continue;
        }

        let symbol = market_symbol(&holding.symbol);
        match table.columns.get(&symbol) {
            Some(returns) => {
                for (contribution, daily_return) in contributions.iter_mut().zip(returns.iter()) {
                    *contribution += holding.weight * daily_return;
                }
            }
            None => {
                // Missing data: the weight sits as uninvested capital.
                warn!(
                    "{}: no return data for {}, treating {:.1}% as cash",
                    portfolio.name,
                    symbol,
                    holding.weight * 100.0
                );
            }
        }
    }

    contributions
}
