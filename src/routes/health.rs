//! Health check endpoints

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;
use crate::sync::SyncState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub service: &'static str,
    #[serde(rename = "syncState")]
    pub sync_state: SyncState,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        service: "quote-sync",
        sync_state: state.coordinator().state(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}
