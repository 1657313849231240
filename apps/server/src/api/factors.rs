//! Factor loadings read surface.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::error::ApiResult;
use crate::main_lib::AppState;
use crate::models::FactorLoadingsResponse;

/// Per-portfolio regression results, or an empty mapping when no regression
/// has succeeded yet.
async fn get_factor_loadings(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BTreeMap<String, FactorLoadingsResponse>>> {
    let loadings = state.loadings_repository.list()?;

    let response: BTreeMap<String, FactorLoadingsResponse> = loadings
        .iter()
        .map(|row| (row.portfolio_name.clone(), FactorLoadingsResponse::from(row)))
        .collect();

    Ok(Json(response))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/factor-loadings", get(get_factor_loadings))
}
