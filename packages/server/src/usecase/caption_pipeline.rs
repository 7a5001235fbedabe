//! UseCase: transcript-to-caption pipeline.

use std::sync::Arc;

use babelcast_shared::time::Clock;

use crate::domain::{RoomId, RoomRegistry, TranscriptRecord};
use crate::infrastructure::dto::websocket::{CaptionMessage, MessageType};
use crate::infrastructure::translation::TranslationGateway;
use crate::usecase::BroadcastFanout;

/// Turns each finalized transcript into a translated caption and fans it
/// out to the owning room. Runs once per transcript for the life of the
/// broadcaster connection.
pub struct CaptionPipeline {
    registry: Arc<dyn RoomRegistry>,
    translation: Arc<TranslationGateway>,
    fanout: Arc<BroadcastFanout>,
    clock: Arc<dyn Clock>,
}

impl CaptionPipeline {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        translation: Arc<TranslationGateway>,
        fanout: Arc<BroadcastFanout>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            translation,
            fanout,
            clock,
        }
    }

    /// Translate one finalized transcript and broadcast the caption.
    /// Empty or whitespace-only transcripts produce no message.
    pub async fn handle_transcript(&self, room_id: &RoomId, record: &TranscriptRecord) {
        let text = record.text.trim();
        if text.is_empty() {
            tracing::debug!("Empty transcript for room '{}', ignoring", room_id);
            return;
        }

        // The language pair is read per transcript so a set_language command
        // takes effect on the next caption.
        let (source, target) = match self.registry.get(room_id).await {
            Ok(room) => (room.source_language, room.target_language),
            Err(e) => {
                tracing::warn!("Dropping transcript: {}", e);
                return;
            }
        };

        tracing::debug!("Translating transcript from {} to {}", source, target);
        let translation = self.translation.translate(text, &source, &target).await;

        let message = CaptionMessage {
            r#type: MessageType::Caption,
            ts: self.clock.now_millis(),
            original: text.to_string(),
            translation,
        };
        let json = serde_json::to_string(&message).unwrap();

        self.fanout.deliver(room_id, &json).await;
    }
}
