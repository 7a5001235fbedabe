//! UseCase: viewer join.

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePusher, PusherChannel, RegistryError, RoomId, RoomRegistry,
};

/// Adds a viewer connection to an existing room.
pub struct JoinViewerUseCase {
    registry: Arc<dyn RoomRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinViewerUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// Register the connection's outbound channel and add it to the room's
    /// viewer set.
    ///
    /// The channel is registered before the membership insert so a fan-out
    /// running between the two steps never sees a member without a channel;
    /// on a failed join the registration is rolled back.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::RoomNotFound`] if the room was never
    /// created. The connection is left unregistered in that case.
    pub async fn execute(
        &self,
        room_id: &RoomId,
        conn: ConnectionId,
        sender: PusherChannel,
    ) -> Result<(), RegistryError> {
        self.message_pusher.register(conn.clone(), sender).await;

        if let Err(e) = self.registry.add_viewer(room_id, conn.clone()).await {
            self.message_pusher.unregister(&conn).await;
            return Err(e);
        }

        tracing::info!("Viewer '{}' joined room '{}'", conn, room_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::pusher::WebSocketMessagePusher;
    use crate::infrastructure::registry::InMemoryRoomRegistry;
    use tokio::sync::mpsc;

    fn create_test_usecase() -> (
        JoinViewerUseCase,
        Arc<InMemoryRoomRegistry>,
        Arc<WebSocketMessagePusher>,
    ) {
        let registry = Arc::new(InMemoryRoomRegistry::new("ko", "en"));
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let usecase = JoinViewerUseCase::new(registry.clone(), pusher.clone());
        (usecase, registry, pusher)
    }

    #[tokio::test]
    async fn test_join_existing_room() {
        let (usecase, registry, pusher) = create_test_usecase();
        let room_id = RoomId::new("r1");
        registry
            .upsert_broadcaster(&room_id, ConnectionId::generate())
            .await;
        let conn = ConnectionId::generate();
        let (tx, mut rx) = mpsc::unbounded_channel();

        usecase.execute(&room_id, conn.clone(), tx).await.unwrap();

        assert!(registry.get(&room_id).await.unwrap().has_viewer(&conn));
        pusher.push_to(&conn, "caption").await.unwrap();
        assert_eq!(rx.recv().await, Some("caption".to_string()));
    }

    #[tokio::test]
    async fn test_join_unknown_room_fails_and_rolls_back() {
        let (usecase, registry, pusher) = create_test_usecase();
        let conn = ConnectionId::generate();
        let (tx, _rx) = mpsc::unbounded_channel();

        let result = usecase
            .execute(&RoomId::new("ghost"), conn.clone(), tx)
            .await;

        assert_eq!(
            result,
            Err(RegistryError::RoomNotFound("ghost".to_string()))
        );
        // Never added to any viewer set, and the channel registration was
        // rolled back.
        assert!(registry.list().await.is_empty());
        assert!(pusher.push_to(&conn, "caption").await.is_err());
    }
}
