//! UseCase: broadcaster attachment and teardown.

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel, RoomId, RoomRegistry};

/// Attaches a broadcaster connection to its room, creating the room on
/// first contact. A reconnect simply overwrites the previous reference;
/// the replaced connection is not explicitly closed.
pub struct AttachBroadcasterUseCase {
    registry: Arc<dyn RoomRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl AttachBroadcasterUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// Register the connection's outbound channel and take over the room's
    /// broadcaster slot.
    pub async fn execute(&self, room_id: &RoomId, conn: ConnectionId, sender: PusherChannel) {
        self.message_pusher.register(conn.clone(), sender).await;
        self.registry.upsert_broadcaster(room_id, conn.clone()).await;
        tracing::info!("Broadcaster '{}' attached to room '{}'", conn, room_id);
    }

    /// Tear the connection down: release the broadcaster slot (unless a
    /// reconnect already took it over) and drop the outbound channel.
    pub async fn detach(&self, room_id: &RoomId, conn: &ConnectionId) {
        self.registry.clear_broadcaster(room_id, conn).await;
        self.message_pusher.unregister(conn).await;
        tracing::info!("Broadcaster '{}' detached from room '{}'", conn, room_id);
    }
}
