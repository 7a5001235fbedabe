//! Transcription session bridge.
//!
//! Wraps one streaming STT session per broadcaster connection and converts
//! the engine's asynchronous transcript delivery into an ordered channel the
//! room's control loop can drain or await. The channel is the
//! synchronization boundary between the engine's reader context and the
//! control loop.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use uuid::Uuid;

use crate::domain::{AudioFormat, SttEngine, SttError, SttSession, TranscriptRecord};

/// Audio chunks below this size are spurious empty/metadata frames and are
/// dropped instead of being forwarded upstream.
pub const MIN_AUDIO_CHUNK_BYTES: usize = 100;

/// Identifier of one open transcription session, scoped to a single
/// broadcaster connection's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

struct SessionEntry {
    /// Exclusively owned external handle; `finish` is called exactly once
    /// when the entry is removed.
    session: Mutex<Box<dyn SttSession>>,
    /// Receiving half of the session's transcript channel.
    pending: Mutex<mpsc::UnboundedReceiver<TranscriptRecord>>,
}

pub struct TranscriptionBridge {
    engine: Arc<dyn SttEngine>,
    sessions: Mutex<HashMap<String, Arc<SessionEntry>>>,
}

impl TranscriptionBridge {
    pub fn new(engine: Arc<dyn SttEngine>) -> Self {
        Self {
            engine,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Open a new streaming session against the STT collaborator.
    ///
    /// # Errors
    ///
    /// Returns [`SttError::StartFailed`] if the collaborator rejects session
    /// start. Terminal for the caller; no retry.
    pub async fn open(&self, format: &AudioFormat) -> Result<SessionId, SttError> {
        let (sink, pending) = mpsc::unbounded_channel();
        let session = self.engine.open(format, sink).await?;

        let session_id = SessionId::generate();
        let entry = Arc::new(SessionEntry {
            session: Mutex::new(session),
            pending: Mutex::new(pending),
        });

        let mut sessions = self.sessions.lock().await;
        sessions.insert(session_id.as_str().to_string(), entry);
        tracing::info!("Created new transcription session '{}'", session_id);

        Ok(session_id)
    }

    /// Forward raw audio bytes to the open session. Chunks below
    /// [`MIN_AUDIO_CHUNK_BYTES`] are silently dropped.
    ///
    /// # Errors
    ///
    /// Returns [`SttError::SessionNotFound`] for unknown sessions and
    /// [`SttError::SendFailed`] on upstream transport errors.
    pub async fn send_audio(&self, session_id: &SessionId, chunk: &[u8]) -> Result<(), SttError> {
        if chunk.len() < MIN_AUDIO_CHUNK_BYTES {
            tracing::debug!(
                "Skipping small audio chunk: {} bytes for session '{}'",
                chunk.len(),
                session_id
            );
            return Ok(());
        }

        let entry = self
            .entry(session_id)
            .await
            .ok_or_else(|| SttError::SessionNotFound(session_id.as_str().to_string()))?;

        let mut session = entry.session.lock().await;
        session.send_audio(chunk).await
    }

    /// Non-blocking drain of everything that accumulated since the last
    /// call, in arrival order. Empty for unknown or closed sessions, never
    /// an error.
    pub async fn drain_pending(&self, session_id: &SessionId) -> Vec<TranscriptRecord> {
        let Some(entry) = self.entry(session_id).await else {
            return Vec::new();
        };

        let mut pending = entry.pending.lock().await;
        let mut records = Vec::new();
        while let Ok(record) = pending.try_recv() {
            records.push(record);
        }
        records
    }

    /// Await the next finalized transcript. Returns `None` once the session
    /// is unknown or its producer side is gone.
    pub async fn next_transcript(&self, session_id: &SessionId) -> Option<TranscriptRecord> {
        let entry = self.entry(session_id).await?;

        let mut pending = entry.pending.lock().await;
        pending.recv().await
    }

    /// Close the session: the external handle is closed exactly once, any
    /// remaining pending transcripts are discarded, and the bookkeeping is
    /// removed. Closing an unknown or already-closed session is a no-op.
    pub async fn close(&self, session_id: &SessionId) {
        let entry = {
            let mut sessions = self.sessions.lock().await;
            sessions.remove(session_id.as_str())
        };

        let Some(entry) = entry else {
            return;
        };

        let mut session = entry.session.lock().await;
        if let Err(e) = session.finish().await {
            tracing::warn!("Error closing transcription session '{}': {}", session_id, e);
        }
        tracing::info!("Closed transcription session '{}'", session_id);
    }

    async fn entry(&self, session_id: &SessionId) -> Option<Arc<SessionEntry>> {
        let sessions = self.sessions.lock().await;
        sessions.get(session_id.as_str()).cloned()
    }
}
