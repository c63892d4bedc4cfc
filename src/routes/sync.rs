//! Sync API endpoints
//!
//! Manual sync trigger and coordinator status.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::error::Result;
use crate::state::AppState;
use crate::sync::{Notification, SyncReport, SyncStatus};

/// Create the sync router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(sync_now))
        .route("/status", get(get_sync_status))
        .route("/notifications", get(list_notifications))
}

/// Run one sync cycle now
async fn sync_now(State(state): State<AppState>) -> Result<Json<SyncReport>> {
    let report = state.coordinator().sync_now().await?;
    Ok(Json(report))
}

async fn get_sync_status(State(state): State<AppState>) -> Json<SyncStatus> {
    Json(state.coordinator().status())
}

/// Recent notifications, oldest first
async fn list_notifications(State(state): State<AppState>) -> Json<Vec<Notification>> {
    Json(state.notifications().recent())
}
