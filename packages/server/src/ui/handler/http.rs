//! HTTP API endpoint handlers.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{Json, extract::State};

use crate::infrastructure::dto::http::{RoomDebugDto, RoomsDebugDto};
use crate::ui::state::AppState;

/// Debug endpoint listing every active room. Read-only; no mutation.
pub async fn debug_rooms(State(state): State<Arc<AppState>>) -> Json<RoomsDebugDto> {
    let rooms = state.registry.list().await;

    let mut room_info = HashMap::new();
    for room in &rooms {
        room_info.insert(
            room.id.as_str().to_string(),
            RoomDebugDto {
                has_broadcaster: room.broadcaster.is_some(),
                viewer_count: room.viewer_count(),
                language: room.target_language.clone(),
            },
        );
    }

    Json(RoomsDebugDto {
        total_rooms: room_info.len(),
        active_rooms: room_info,
    })
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}
