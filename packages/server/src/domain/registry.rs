//! Room registry trait.
//!
//! The interface the application layer uses for all room-table access.
//! Every operation is atomic with respect to concurrent callers; the
//! concrete implementation lives in the Infrastructure layer.

use async_trait::async_trait;

use super::{ConnectionId, RegistryError, Room, RoomId};

/// Process-wide table of rooms keyed by room identifier.
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// Create the room if absent (empty viewer set, default languages),
    /// otherwise replace its broadcaster reference. Idempotent.
    async fn upsert_broadcaster(&self, room_id: &RoomId, conn: ConnectionId);

    /// Clear the broadcaster reference, but only if `conn` still owns it.
    /// A reconnected broadcaster must not be wiped by the old connection's
    /// teardown.
    async fn clear_broadcaster(&self, room_id: &RoomId, conn: &ConnectionId);

    /// Add a viewer to an existing room. Idempotent for a connection that is
    /// already a member.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::RoomNotFound`] if the room does not exist.
    async fn add_viewer(&self, room_id: &RoomId, conn: ConnectionId) -> Result<(), RegistryError>;

    /// Remove a viewer. No-op if the room or the connection is absent.
    async fn remove_viewer(&self, room_id: &RoomId, conn: &ConnectionId);

    /// Get a snapshot of the room.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::RoomNotFound`] if the room does not exist.
    async fn get(&self, room_id: &RoomId) -> Result<Room, RegistryError>;

    /// Change the target language used for the room's captions.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::RoomNotFound`] if the room does not exist.
    async fn set_target_language(
        &self,
        room_id: &RoomId,
        language: &str,
    ) -> Result<(), RegistryError>;

    /// Snapshot of every room (read-only introspection surface).
    async fn list(&self) -> Vec<Room>;
}
