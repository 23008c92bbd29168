//! Health and presence endpoints.

use axum::{Json, extract::State};

use crate::{infrastructure::dto::http::PresenceDto, ui::state::AppState};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Users with a live connection, in ascending order
pub async fn online_users(State(state): State<AppState>) -> Json<PresenceDto> {
    let online = state.registry.snapshot().await;
    Json(PresenceDto {
        online_users: online.into_iter().map(|id| id.into_string()).collect(),
    })
}
