//! WebSocket message DTOs.
//!
//! Heartbeat traffic uses the literal `"ping"` / `"pong"` text frames;
//! everything else on the viewer channel is JSON tagged by a `type` field.

use serde::{Deserialize, Serialize};

/// Literal heartbeat frames exchanged with viewers.
pub const PING_FRAME: &str = "ping";
pub const PONG_FRAME: &str = "pong";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Caption,
    ConnectionEstablished,
    Error,
}

/// Caption broadcast to every member of a room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionMessage {
    pub r#type: MessageType,
    /// Unix timestamp in milliseconds
    pub ts: i64,
    /// Original text in the source language
    pub original: String,
    /// Translated text in the target language
    pub translation: String,
}

/// Connection status notification sent to a single viewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionStatusMessage {
    pub r#type: MessageType,
    pub room_id: String,
    pub message: String,
}

/// Commands a viewer may send as JSON text frames.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewerCommand {
    SetLanguage { language: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caption_message_wire_shape() {
        let message = CaptionMessage {
            r#type: MessageType::Caption,
            ts: 1_700_000_000_000,
            original: "안녕하세요".to_string(),
            translation: "Hello".to_string(),
        };

        let json = serde_json::to_string(&message).unwrap();

        assert!(json.contains(r#""type":"caption""#));
        assert!(json.contains(r#""ts":1700000000000"#));
        assert!(json.contains(r#""original":"안녕하세요""#));
        assert!(json.contains(r#""translation":"Hello""#));
    }

    #[test]
    fn test_connection_status_wire_shape() {
        let message = ConnectionStatusMessage {
            r#type: MessageType::Error,
            room_id: "ghost".to_string(),
            message: "Room not found".to_string(),
        };

        let json = serde_json::to_string(&message).unwrap();

        assert!(json.contains(r#""type":"error""#));
        assert!(json.contains(r#""room_id":"ghost""#));
        assert!(json.contains(r#""message":"Room not found""#));
    }

    #[test]
    fn test_set_language_command_parses() {
        let command: ViewerCommand =
            serde_json::from_str(r#"{"type":"set_language","language":"ja"}"#).unwrap();

        let ViewerCommand::SetLanguage { language } = command;
        assert_eq!(language, "ja");
    }

    #[test]
    fn test_unknown_command_fails_to_parse() {
        let result = serde_json::from_str::<ViewerCommand>(r#"{"type":"dance"}"#);

        assert!(result.is_err());
    }
}
