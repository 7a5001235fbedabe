//! WebSocket-backed message pusher.
//!
//! Holds the sending half of each connection's outbound channel. The
//! WebSocket itself is owned by the connection's pusher task in the UI
//! layer; this map only forwards strings into the channels, so a push to a
//! connection whose task has ended fails immediately and the caller can
//! treat the connection as dead.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, MessagePusher, PushError, PusherChannel};

pub struct WebSocketMessagePusher {
    /// connection_id -> sending half of the connection's outbound channel
    connections: Mutex<HashMap<String, PusherChannel>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register(&self, conn: ConnectionId, sender: PusherChannel) {
        let mut connections = self.connections.lock().await;
        connections.insert(conn.as_str().to_string(), sender);
        tracing::debug!("Connection '{}' registered", conn);
    }

    async fn unregister(&self, conn: &ConnectionId) {
        let mut connections = self.connections.lock().await;
        connections.remove(conn.as_str());
        tracing::debug!("Connection '{}' unregistered", conn);
    }

    async fn push_to(&self, conn: &ConnectionId, content: &str) -> Result<(), PushError> {
        let connections = self.connections.lock().await;

        let sender = connections
            .get(conn.as_str())
            .ok_or_else(|| PushError::ConnectionNotFound(conn.as_str().to_string()))?;

        sender
            .send(content.to_string())
            .map_err(|_| PushError::ChannelClosed(conn.as_str().to_string()))
    }
}
