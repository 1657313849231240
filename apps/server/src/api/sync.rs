//! On-demand refresh triggers.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};

use crate::main_lib::AppState;
use modelfolio_core::sync::{FactorSyncStatus, NavSyncStatus};

/// Runs a NAV refresh now (regressions re-run on success) and returns the
/// recorded status. Failures land in the status record, not in the HTTP code.
async fn trigger_nav_sync(State(state): State<Arc<AppState>>) -> Json<NavSyncStatus> {
    Json(state.sync_service.sync_navs().await)
}

/// Runs a factor refresh (download, store, regress) and returns the status.
async fn trigger_factor_sync(State(state): State<Arc<AppState>>) -> Json<FactorSyncStatus> {
    Json(state.sync_service.sync_factors().await)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sync/navs", post(trigger_nav_sync))
        .route("/sync/factors", post(trigger_factor_sync))
}
