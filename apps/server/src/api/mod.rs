//! HTTP routing.

pub mod factors;
pub mod health;
pub mod outlook;
pub mod portfolios;
pub mod sync;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::main_lib::AppState;

pub fn app_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .merge(health::router())
        .merge(portfolios::router())
        .merge(factors::router())
        .merge(outlook::router())
        .merge(sync::router());

    Router::new()
        .nest("/api", api)
        // Local dev allows everything; restrict in production.
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
