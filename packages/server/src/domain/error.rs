//! Error types for the caption broadcast core.

use thiserror::Error;

/// Errors surfaced by the room registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Lookup or mutation against a room that was never created
    #[error("Room '{0}' not found")]
    RoomNotFound(String),
}

/// Errors surfaced when pushing a message to a single connection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PushError {
    /// Connection is not registered with the pusher
    #[error("Connection '{0}' is not registered")]
    ConnectionNotFound(String),

    /// The connection's outbound channel is gone (its task has ended)
    #[error("Connection '{0}' channel closed")]
    ChannelClosed(String),
}

/// Errors surfaced by the speech-to-text collaborator.
#[derive(Debug, Error)]
pub enum SttError {
    /// The external collaborator rejected session start. Terminal for the
    /// caller; no retry.
    #[error("Failed to start transcription session: {0}")]
    StartFailed(String),

    /// Bridge call against an unknown session id
    #[error("Transcription session '{0}' not found")]
    SessionNotFound(String),

    /// Transport error while forwarding audio upstream
    #[error("Failed to send audio upstream: {0}")]
    SendFailed(String),
}

/// Errors surfaced by the translation collaborator. These never escape the
/// translation gateway, which degrades to a marked passthrough.
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("Translation request failed: {0}")]
    RequestFailed(String),

    #[error("Malformed translation response: {0}")]
    MalformedResponse(String),
}
