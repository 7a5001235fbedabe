//! Domain layer: entities, value objects, pure state machines, and the
//! service traits the application layer depends on.
//!
//! Concrete implementations of the traits live in the Infrastructure layer;
//! the UseCase layer depends only on the abstractions defined here.

mod error;
mod heartbeat;
mod pusher;
mod registry;
mod room;
mod stt;
mod translate;

pub use error::{PushError, RegistryError, SttError, TranslationError};
#[cfg(test)]
pub use pusher::MockMessagePusher;
#[cfg(test)]
pub use translate::MockTranslator;
pub use heartbeat::{HeartbeatState, ViewerHeartbeat};
pub use pusher::{MessagePusher, PusherChannel};
pub use registry::RoomRegistry;
pub use room::{ConnectionId, Room, RoomId};
pub use stt::{AudioFormat, SttEngine, SttSession, TranscriptRecord, TranscriptSink};
pub use translate::Translator;
