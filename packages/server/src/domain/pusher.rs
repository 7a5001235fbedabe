//! Message pusher trait.
//!
//! Abstraction over per-connection outbound delivery. The WebSocket
//! implementation lives in the Infrastructure layer; the socket itself is
//! owned by the connection's pusher task, and this trait only sees the
//! sending half of its channel.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, PushError};

/// Sending half of a connection's outbound message channel.
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Register a connection's outbound channel.
    async fn register(&self, conn: ConnectionId, sender: PusherChannel);

    /// Unregister a connection. No-op if it was never registered.
    async fn unregister(&self, conn: &ConnectionId);

    /// Push one message to a single connection.
    ///
    /// # Errors
    ///
    /// Returns [`PushError::ConnectionNotFound`] for unknown connections and
    /// [`PushError::ChannelClosed`] when the connection's task has ended.
    async fn push_to(&self, conn: &ConnectionId, content: &str) -> Result<(), PushError>;
}
