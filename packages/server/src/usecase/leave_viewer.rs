//! UseCase: viewer departure.

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, RoomId, RoomRegistry};

/// Removes a viewer connection from its room and drops its outbound
/// channel. Covers both explicit disconnects and heartbeat evictions.
pub struct LeaveViewerUseCase {
    registry: Arc<dyn RoomRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl LeaveViewerUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    pub async fn execute(&self, room_id: &RoomId, conn: &ConnectionId) {
        self.registry.remove_viewer(room_id, conn).await;
        self.message_pusher.unregister(conn).await;
        tracing::info!("Viewer '{}' left room '{}'", conn, room_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::pusher::WebSocketMessagePusher;
    use crate::infrastructure::registry::InMemoryRoomRegistry;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_leave_removes_viewer_and_channel() {
        let registry = Arc::new(InMemoryRoomRegistry::new("ko", "en"));
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let usecase = LeaveViewerUseCase::new(registry.clone(), pusher.clone());
        let room_id = RoomId::new("r1");
        registry
            .upsert_broadcaster(&room_id, ConnectionId::generate())
            .await;
        let conn = ConnectionId::generate();
        let (tx, _rx) = mpsc::unbounded_channel();
        pusher.register(conn.clone(), tx).await;
        registry.add_viewer(&room_id, conn.clone()).await.unwrap();

        usecase.execute(&room_id, &conn).await;

        assert!(!registry.get(&room_id).await.unwrap().has_viewer(&conn));
        assert!(pusher.push_to(&conn, "caption").await.is_err());
    }

    #[tokio::test]
    async fn test_leave_unknown_viewer_is_noop() {
        let registry = Arc::new(InMemoryRoomRegistry::new("ko", "en"));
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let usecase = LeaveViewerUseCase::new(registry, pusher);

        usecase
            .execute(&RoomId::new("ghost"), &ConnectionId::generate())
            .await;
    }
}
