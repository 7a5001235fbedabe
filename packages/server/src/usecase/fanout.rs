//! UseCase: room fan-out.

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, RoomId, RoomRegistry};

/// Delivers one message to every member of a room: all viewers plus the
/// broadcaster. Each recipient is independent; a failed recipient never
/// blocks the others.
pub struct BroadcastFanout {
    registry: Arc<dyn RoomRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl BroadcastFanout {
    pub fn new(registry: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// Fan `message` out to the room. Viewers whose push fails are pruned
    /// from the viewer set after the delivery pass completes; there are no
    /// retries. Delivery to an unknown or empty room is a no-op.
    pub async fn deliver(&self, room_id: &RoomId, message: &str) {
        let room = match self.registry.get(room_id).await {
            Ok(room) => room,
            Err(e) => {
                tracing::warn!("Dropping message for room '{}': {}", room_id, e);
                return;
            }
        };

        let mut stale: Vec<ConnectionId> = Vec::new();
        let mut sent_count = 0;
        for viewer in &room.viewers {
            match self.message_pusher.push_to(viewer, message).await {
                Ok(()) => sent_count += 1,
                Err(e) => {
                    tracing::warn!(
                        "Marking viewer '{}' in room '{}' for removal: {}",
                        viewer,
                        room_id,
                        e
                    );
                    stale.push(viewer.clone());
                }
            }
        }
        tracing::debug!(
            "Delivered message to {}/{} viewers in room '{}'",
            sent_count,
            room.viewer_count(),
            room_id
        );

        // Prune after the pass, never during it.
        for viewer in &stale {
            self.registry.remove_viewer(room_id, viewer).await;
            self.message_pusher.unregister(viewer).await;
            tracing::info!("Removed disconnected viewer from room '{}'", room_id);
        }

        // The broadcaster gets its captions echoed back on the same path.
        if let Some(broadcaster) = &room.broadcaster
            && let Err(e) = self.message_pusher.push_to(broadcaster, message).await
        {
            tracing::warn!(
                "Failed to echo message to broadcaster in room '{}': {}",
                room_id,
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MockMessagePusher;
    use crate::infrastructure::pusher::WebSocketMessagePusher;
    use crate::infrastructure::registry::InMemoryRoomRegistry;
    use tokio::sync::mpsc;

    async fn create_room_with_broadcaster(
        registry: &Arc<InMemoryRoomRegistry>,
        pusher: &Arc<WebSocketMessagePusher>,
        room_id: &RoomId,
    ) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let conn = ConnectionId::generate();
        let (tx, rx) = mpsc::unbounded_channel();
        pusher.register(conn.clone(), tx).await;
        registry.upsert_broadcaster(room_id, conn.clone()).await;
        (conn, rx)
    }

    async fn join_viewer(
        registry: &Arc<InMemoryRoomRegistry>,
        pusher: &Arc<WebSocketMessagePusher>,
        room_id: &RoomId,
    ) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let conn = ConnectionId::generate();
        let (tx, rx) = mpsc::unbounded_channel();
        pusher.register(conn.clone(), tx).await;
        registry.add_viewer(room_id, conn.clone()).await.unwrap();
        (conn, rx)
    }

    #[tokio::test]
    async fn test_deliver_to_empty_room_performs_zero_writes() {
        let registry = Arc::new(InMemoryRoomRegistry::new("ko", "en"));
        let room_id = RoomId::new("r1");
        let conn = ConnectionId::generate();
        registry.upsert_broadcaster(&room_id, conn.clone()).await;
        registry.clear_broadcaster(&room_id, &conn).await;

        let mut pusher = MockMessagePusher::new();
        pusher.expect_push_to().times(0);
        let fanout = BroadcastFanout::new(registry, Arc::new(pusher));

        fanout.deliver(&room_id, "caption").await;
    }

    #[tokio::test]
    async fn test_deliver_to_unknown_room_is_noop() {
        let registry = Arc::new(InMemoryRoomRegistry::new("ko", "en"));
        let mut pusher = MockMessagePusher::new();
        pusher.expect_push_to().times(0);
        let fanout = BroadcastFanout::new(registry, Arc::new(pusher));

        fanout.deliver(&RoomId::new("ghost"), "caption").await;
    }

    #[tokio::test]
    async fn test_deliver_reaches_every_viewer_and_the_broadcaster() {
        let registry = Arc::new(InMemoryRoomRegistry::new("ko", "en"));
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let room_id = RoomId::new("r1");
        let (_b, mut b_rx) = create_room_with_broadcaster(&registry, &pusher, &room_id).await;
        let (_v1, mut v1_rx) = join_viewer(&registry, &pusher, &room_id).await;
        let (_v2, mut v2_rx) = join_viewer(&registry, &pusher, &room_id).await;
        let fanout = BroadcastFanout::new(registry, pusher);

        fanout.deliver(&room_id, "caption").await;

        assert_eq!(v1_rx.recv().await, Some("caption".to_string()));
        assert_eq!(v2_rx.recv().await, Some("caption".to_string()));
        assert_eq!(b_rx.recv().await, Some("caption".to_string()));
    }

    #[tokio::test]
    async fn test_single_viewer_observes_delivery_order() {
        let registry = Arc::new(InMemoryRoomRegistry::new("ko", "en"));
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let room_id = RoomId::new("r1");
        let (_b, _b_rx) = create_room_with_broadcaster(&registry, &pusher, &room_id).await;
        let (_v, mut v_rx) = join_viewer(&registry, &pusher, &room_id).await;
        let fanout = BroadcastFanout::new(registry, pusher);

        fanout.deliver(&room_id, "first").await;
        fanout.deliver(&room_id, "second").await;

        assert_eq!(v_rx.recv().await, Some("first".to_string()));
        assert_eq!(v_rx.recv().await, Some("second".to_string()));
    }

    #[tokio::test]
    async fn test_failed_viewer_is_pruned_after_the_pass() {
        let registry = Arc::new(InMemoryRoomRegistry::new("ko", "en"));
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let room_id = RoomId::new("r1");
        let (_b, _b_rx) = create_room_with_broadcaster(&registry, &pusher, &room_id).await;
        let (alive, mut alive_rx) = join_viewer(&registry, &pusher, &room_id).await;
        let (dead, dead_rx) = join_viewer(&registry, &pusher, &room_id).await;
        // The dead viewer's task ended and dropped its receiver.
        drop(dead_rx);

        assert!(registry.get(&room_id).await.unwrap().has_viewer(&dead));
        let fanout = BroadcastFanout::new(registry.clone(), pusher);

        fanout.deliver(&room_id, "caption").await;

        let room = registry.get(&room_id).await.unwrap();
        assert!(!room.has_viewer(&dead));
        assert!(room.has_viewer(&alive));
        assert_eq!(alive_rx.recv().await, Some("caption".to_string()));
    }

    #[tokio::test]
    async fn test_dead_broadcaster_does_not_abort_delivery() {
        let registry = Arc::new(InMemoryRoomRegistry::new("ko", "en"));
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let room_id = RoomId::new("r1");
        let (_b, b_rx) = create_room_with_broadcaster(&registry, &pusher, &room_id).await;
        drop(b_rx);
        let (_v, mut v_rx) = join_viewer(&registry, &pusher, &room_id).await;
        let fanout = BroadcastFanout::new(registry, pusher);

        fanout.deliver(&room_id, "caption").await;

        assert_eq!(v_rx.recv().await, Some("caption".to_string()));
    }
}
