//! Viewer WebSocket handler.
//!
//! Viewers receive captions through their pusher channel and speak a text
//! heartbeat protocol: the server pings every `ping_interval`, the client
//! answers with the literal `"pong"` frame, and a connection that stays
//! silent past `ping_interval + pong_timeout` is force-closed and evicted
//! from its room.

use std::sync::Arc;

use axum::{
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::time::Instant;

use babelcast_shared::time::now_millis;

use crate::domain::{ConnectionId, HeartbeatState, RoomId, ViewerHeartbeat};
use crate::infrastructure::dto::websocket::{
    ConnectionStatusMessage, MessageType, PING_FRAME, PONG_FRAME, ViewerCommand,
};
use crate::ui::state::AppState;

use super::pusher_loop;

pub async fn ws_view(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_view(socket, state, RoomId::new(room_id)))
}

async fn handle_view(socket: WebSocket, state: Arc<AppState>, room_id: RoomId) {
    let conn_id = ConnectionId::generate();
    let (mut sender, mut receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();

    if let Err(e) = state
        .join_viewer_usecase
        .execute(&room_id, conn_id.clone(), tx.clone())
        .await
    {
        tracing::warn!("Viewer rejected for room '{}': {}", room_id, e);
        let error_msg = ConnectionStatusMessage {
            r#type: MessageType::Error,
            room_id: room_id.as_str().to_string(),
            message: "Room not found".to_string(),
        };
        let _ = sender
            .send(Message::Text(serde_json::to_string(&error_msg).unwrap().into()))
            .await;
        let _ = sender.close().await;
        return;
    }

    let welcome = ConnectionStatusMessage {
        r#type: MessageType::ConnectionEstablished,
        room_id: room_id.as_str().to_string(),
        message: "Connected to viewing room".to_string(),
    };
    let _ = tx.send(serde_json::to_string(&welcome).unwrap());

    let push_task = pusher_loop(rx, sender);

    let liveness_window = state.settings.ping_interval + state.settings.pong_timeout;
    let mut heartbeat = ViewerHeartbeat::new(
        state.settings.pong_timeout.as_millis() as i64,
        now_millis(),
    );
    let mut ping_timer = tokio::time::interval(state.settings.ping_interval);
    // The liveness deadline restarts on inbound frames only; outgoing pings
    // must not push it forward or a silent peer would never expire.
    let mut deadline = Instant::now() + liveness_window;

    loop {
        tokio::select! {
            _ = ping_timer.tick() => {
                if tx.send(PING_FRAME.to_string()).is_err() {
                    break;
                }
                heartbeat.on_ping_sent(now_millis());
            }
            maybe_frame = receiver.next() => {
                deadline = Instant::now() + liveness_window;
                match maybe_frame {
                    Some(Ok(Message::Text(text))) => {
                        let text = text.as_str();
                        if text == PONG_FRAME {
                            heartbeat.on_pong(now_millis());
                        } else if text == PING_FRAME {
                            // Peer-initiated heartbeat: answer right away.
                            let _ = tx.send(PONG_FRAME.to_string());
                        } else {
                            handle_viewer_command(&state, &room_id, text).await;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::info!("Viewer '{}' disconnected from room '{}'", conn_id, room_id);
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::warn!("WebSocket error on viewer stream: {}", e);
                        break;
                    }
                }
            }
            _ = tokio::time::sleep_until(deadline) => {
                if heartbeat.check_liveness(now_millis()) == HeartbeatState::TimedOut {
                    tracing::info!("Viewer connection timed out for room '{}'", room_id);
                    break;
                }
                deadline = Instant::now() + liveness_window;
            }
        }
    }

    // Teardown is the same for timeout and peer disconnect: stop pushing,
    // leave the room, let the socket drop.
    state.leave_viewer_usecase.execute(&room_id, &conn_id).await;
    push_task.abort();
}

async fn handle_viewer_command(state: &Arc<AppState>, room_id: &RoomId, text: &str) {
    match serde_json::from_str::<ViewerCommand>(text) {
        Ok(ViewerCommand::SetLanguage { language }) => {
            if let Err(e) = state
                .change_language_usecase
                .execute(room_id, &language)
                .await
            {
                tracing::warn!("set_language for room '{}' failed: {}", room_id, e);
            }
        }
        Err(_) => {
            // Not a recognized command; ignore.
            tracing::debug!("Ignoring unrecognized viewer frame: {}", text);
        }
    }
}
