//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{HealthDto, StatsDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
    })
}

/// Active room / session counts
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<StatsDto> {
    let stats = state.get_server_stats_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(StatsDto {
        active_rooms: stats.active_rooms,
        active_sessions: stats.active_sessions,
    })
}
