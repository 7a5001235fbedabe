//! HTTP API response DTOs.

use std::collections::HashMap;

use serde::Serialize;

/// Read-only view of one room for the debug endpoint.
#[derive(Debug, Serialize)]
pub struct RoomDebugDto {
    pub has_broadcaster: bool,
    pub viewer_count: usize,
    pub language: String,
}

/// Full debug listing of the room table.
#[derive(Debug, Serialize)]
pub struct RoomsDebugDto {
    pub active_rooms: HashMap<String, RoomDebugDto>,
    pub total_rooms: usize,
}
