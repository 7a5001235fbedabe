//! In-memory room registry.
//!
//! A mutex-guarded `HashMap` as the process-wide room table. Every trait
//! method takes the lock once, so each operation is a single critical
//! section under concurrent access from independent connection tasks.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, RegistryError, Room, RoomId, RoomRegistry};

pub struct InMemoryRoomRegistry {
    rooms: Mutex<HashMap<String, Room>>,
    default_source_language: String,
    default_target_language: String,
}

impl InMemoryRoomRegistry {
    pub fn new(
        default_source_language: impl Into<String>,
        default_target_language: impl Into<String>,
    ) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            default_source_language: default_source_language.into(),
            default_target_language: default_target_language.into(),
        }
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn upsert_broadcaster(&self, room_id: &RoomId, conn: ConnectionId) {
        let mut rooms = self.rooms.lock().await;
        match rooms.get_mut(room_id.as_str()) {
            Some(room) => {
                room.broadcaster = Some(conn);
                tracing::info!("Updated broadcaster for room '{}'", room_id);
            }
            None => {
                let mut room = Room::new(
                    room_id.clone(),
                    self.default_source_language.clone(),
                    self.default_target_language.clone(),
                );
                room.broadcaster = Some(conn);
                rooms.insert(room_id.as_str().to_string(), room);
                tracing::info!("Created new room '{}'", room_id);
            }
        }
    }

    async fn clear_broadcaster(&self, room_id: &RoomId, conn: &ConnectionId) {
        let mut rooms = self.rooms.lock().await;
        if let Some(room) = rooms.get_mut(room_id.as_str())
            && room.broadcaster.as_ref() == Some(conn)
        {
            room.broadcaster = None;
        }
    }

    async fn add_viewer(&self, room_id: &RoomId, conn: ConnectionId) -> Result<(), RegistryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(room_id.as_str())
            .ok_or_else(|| RegistryError::RoomNotFound(room_id.as_str().to_string()))?;
        room.add_viewer(conn);
        Ok(())
    }

    async fn remove_viewer(&self, room_id: &RoomId, conn: &ConnectionId) {
        let mut rooms = self.rooms.lock().await;
        if let Some(room) = rooms.get_mut(room_id.as_str()) {
            room.remove_viewer(conn);
        }
    }

    async fn get(&self, room_id: &RoomId) -> Result<Room, RegistryError> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room_id.as_str())
            .cloned()
            .ok_or_else(|| RegistryError::RoomNotFound(room_id.as_str().to_string()))
    }

    async fn set_target_language(
        &self,
        room_id: &RoomId,
        language: &str,
    ) -> Result<(), RegistryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(room_id.as_str())
            .ok_or_else(|| RegistryError::RoomNotFound(room_id.as_str().to_string()))?;
        room.target_language = language.to_string();
        Ok(())
    }

    async fn list(&self) -> Vec<Room> {
        let rooms = self.rooms.lock().await;
        rooms.values().cloned().collect()
    }
}
