//! Operational health surface.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::main_lib::AppState;
use crate::models::HealthResponse;

async fn get_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let latest_date = state.nav_repository.latest_date().unwrap_or(None);
    let factor_regression_available = state
        .loadings_repository
        .list()
        .map(|rows| !rows.is_empty())
        .unwrap_or(false);

    Json(HealthResponse {
        ok: true,
        latest_date,
        nav_sync: state.sync_service.nav_status(),
        factor_sync: state.sync_service.factor_status(),
        factor_regression_available,
        series_cached: state.series_cache.is_cached(),
        series_cache_age_secs: state.series_cache.age().map(|age| age.as_secs()),
        series_last_error: state.series_cache.last_error(),
        outlook_cached: state.outlook_cache.is_cached(),
        outlook_last_error: state.outlook_cache.last_error(),
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health))
}
