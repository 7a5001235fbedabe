//! Broadcaster WebSocket handler.
//!
//! Accepts binary audio frames, forwards them to the transcription bridge,
//! and feeds finalized transcripts into the caption pipeline. Audio arrival
//! and transcript arrival are multiplexed as two waitable sources over one
//! control loop; captions are echoed back to the broadcaster through the
//! same pusher channel viewers use.

use std::sync::Arc;

use axum::{
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::StreamExt;
use tokio::sync::mpsc;

use crate::domain::{ConnectionId, RoomId};
use crate::ui::state::AppState;

use super::pusher_loop;

pub async fn ws_stream(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_stream(socket, state, RoomId::new(room_id)))
}

async fn handle_stream(socket: WebSocket, state: Arc<AppState>, room_id: RoomId) {
    let conn_id = ConnectionId::generate();
    tracing::info!("Broadcaster '{}' connected to room '{}'", conn_id, room_id);

    let (sender, mut receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();

    state
        .attach_broadcaster_usecase
        .execute(&room_id, conn_id.clone(), tx)
        .await;
    let push_task = pusher_loop(rx, sender);

    let session_id = match state.bridge.open(&state.settings.audio_format()).await {
        Ok(session_id) => session_id,
        Err(e) => {
            tracing::error!(
                "Failed to start transcription for room '{}': {}",
                room_id,
                e
            );
            state
                .attach_broadcaster_usecase
                .detach(&room_id, &conn_id)
                .await;
            push_task.abort();
            return;
        }
    };

    loop {
        tokio::select! {
            maybe_frame = receiver.next() => {
                match maybe_frame {
                    Some(Ok(Message::Binary(bytes))) => {
                        if let Err(e) = state.bridge.send_audio(&session_id, &bytes).await {
                            tracing::error!(
                                "Audio forwarding for room '{}' failed, ending stream: {}",
                                room_id,
                                e
                            );
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::info!("Broadcaster for room '{}' disconnected", room_id);
                        break;
                    }
                    // Text and protocol frames carry no audio.
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::warn!("WebSocket error on broadcaster stream: {}", e);
                        break;
                    }
                }
            }
            maybe_record = state.bridge.next_transcript(&session_id) => {
                match maybe_record {
                    Some(record) => {
                        state.caption_pipeline.handle_transcript(&room_id, &record).await;
                    }
                    None => {
                        tracing::warn!("Transcript stream for session '{}' ended", session_id);
                        break;
                    }
                }
            }
        }
    }

    state.bridge.close(&session_id).await;
    state
        .attach_broadcaster_usecase
        .detach(&room_id, &conn_id)
        .await;
    push_task.abort();
    tracing::info!("Broadcaster connection for room '{}' closed", room_id);
}
