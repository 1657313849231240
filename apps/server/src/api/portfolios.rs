//! Portfolio series read surface.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::error::ApiResult;
use crate::main_lib::AppState;
use crate::models::{finite, round6, HoldingBreakdown, PortfolioSeriesResponse, StatsResponse};
use modelfolio_core::constants::{inception_date, INCEPTION_DATE, INITIAL_CAPITAL};
use modelfolio_core::performance::compute_stats;
use modelfolio_core::Result;

/// Serves the store-backed equity curves through the response cache. Raw
/// market data is never touched on this path.
async fn get_portfolio_series(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PortfolioSeriesResponse>> {
    let payload = state
        .series_cache
        .get_or_refresh(|| build_series_payload(&state))?;
    Ok(Json(payload))
}

fn build_series_payload(state: &AppState) -> Result<PortfolioSeriesResponse> {
    let curve_set = state.nav_repository.read_since(inception_date())?;

    let labels: Vec<String> = curve_set
        .dates
        .iter()
        .map(|date| date.format("%Y-%m-%d").to_string())
        .collect();

    let mut series = BTreeMap::new();
    let mut stats = BTreeMap::new();
    for (name, column) in &curve_set.series {
        series.insert(
            name.clone(),
            column
                .iter()
                .copied()
                .map(|nav| nav.and_then(finite).map(round6))
                .collect(),
        );

        // Curves with fewer than two valid points emit no stats entry.
        if let Some(portfolio_stats) = compute_stats(&curve_set.curve(name)) {
            stats.insert(name.clone(), StatsResponse::from(&portfolio_stats));
        }
    }

    let holdings = holdings_breakdown(state);

    Ok(PortfolioSeriesResponse {
        labels,
        series,
        stats,
        holdings,
        start_date: INCEPTION_DATE.to_string(),
    })
}

/// Static holdings report straight off the catalog: declared weight, percent,
/// and dollars at inception, largest position first.
fn holdings_breakdown(state: &AppState) -> BTreeMap<String, Vec<HoldingBreakdown>> {
    let mut holdings = BTreeMap::new();
    for portfolio in state.catalog.iter() {
        let mut items: Vec<HoldingBreakdown> = portfolio
            .holdings
            .iter()
            .map(|holding| HoldingBreakdown {
                ticker: holding.symbol.clone(),
                weight: holding.weight,
                weight_pct: holding.weight * 100.0,
                dollars: holding.weight * INITIAL_CAPITAL,
            })
            .collect();
        items.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        holdings.insert(portfolio.name.clone(), items);
    }
    holdings
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/portfolio-series", get(get_portfolio_series))
}
