//! HTTP and WebSocket endpoint handlers.

mod broadcast;
mod http;
mod viewer;

pub use broadcast::ws_stream;
pub use http::{debug_rooms, health_check};
pub use viewer::ws_view;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, stream::SplitSink};
use tokio::sync::mpsc;

/// Spawn a task that drains a connection's outbound channel into its
/// WebSocket sink. Ends when the channel closes or a send fails.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}
