//! Speech-to-text collaborator traits and values.
//!
//! The external engine delivers transcripts from its own reader context;
//! the sink channel is the synchronization boundary between that context
//! and the room's control loop.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::SttError;

/// A finalized transcript surfaced by the STT collaborator. Interim results
/// are discarded before they reach this type.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptRecord {
    pub text: String,
    pub confidence: f64,
}

/// Audio stream parameters forwarded to the STT collaborator.
#[derive(Debug, Clone)]
pub struct AudioFormat {
    pub encoding: String,
    pub sample_rate: u32,
    pub channels: u16,
}

/// Sending half of a session's transcript channel; the engine's reader
/// context pushes finalized records into it.
pub type TranscriptSink = mpsc::UnboundedSender<TranscriptRecord>;

/// Factory for streaming speech-to-text sessions.
#[async_trait]
pub trait SttEngine: Send + Sync {
    /// Open one streaming session. Finalized transcripts are delivered
    /// through `sink` for the life of the session.
    ///
    /// # Errors
    ///
    /// Returns [`SttError::StartFailed`] if the collaborator rejects
    /// session start.
    async fn open(
        &self,
        format: &AudioFormat,
        sink: TranscriptSink,
    ) -> Result<Box<dyn SttSession>, SttError>;
}

/// One open streaming session. Exclusively owned by its creator; `finish`
/// is called exactly once on teardown.
#[async_trait]
pub trait SttSession: Send {
    /// Forward raw audio bytes upstream.
    ///
    /// # Errors
    ///
    /// Returns [`SttError::SendFailed`] on transport error.
    async fn send_audio(&mut self, chunk: &[u8]) -> Result<(), SttError>;

    /// Close the upstream handle.
    async fn finish(&mut self) -> Result<(), SttError>;
}
