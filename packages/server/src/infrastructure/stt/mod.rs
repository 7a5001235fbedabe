//! Speech-to-text session bridging and the Deepgram live client.

pub mod bridge;
pub mod deepgram;

pub use bridge::{SessionId, TranscriptionBridge};
pub use deepgram::DeepgramEngine;
