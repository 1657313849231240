//! Static outlook document, served from disk behind its own cache slot.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::error::ApiResult;
use crate::main_lib::AppState;
use modelfolio_core::{Error, Result};

async fn get_outlook(State(state): State<Arc<AppState>>) -> ApiResult<Json<serde_json::Value>> {
    let payload = state
        .outlook_cache
        .get_or_refresh(|| load_outlook(&state))?;
    Ok(Json(payload))
}

fn load_outlook(state: &AppState) -> Result<serde_json::Value> {
    if !state.outlook_path.exists() {
        return Err(Error::Unexpected(format!(
            "outlook document not found at {}",
            state.outlook_path.display()
        )));
    }
    let text = std::fs::read_to_string(&state.outlook_path)?;
    Ok(serde_json::from_str(&text)?)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/outlook", get(get_outlook))
}
