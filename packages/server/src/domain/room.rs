//! Room entity and connection identity.

use std::collections::HashSet;
use std::fmt;

use uuid::Uuid;

/// Room identifier. Caller-supplied and opaque: it arrives as the path
/// segment of the stream/view URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of one accepted WebSocket connection.
///
/// Generated server-side on accept. The registry stores ids; the message
/// pusher maps an id to its outbound channel. Removing the id from both is
/// the sole destruction signal for a connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// Generate a fresh connection identity.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One broadcast room: at most one broadcaster, its audience, and the
/// translation language pair applied to captions.
#[derive(Debug, Clone)]
pub struct Room {
    pub id: RoomId,
    /// The connection currently supplying audio. A reconnect overwrites the
    /// previous reference without requiring an explicit close first.
    pub broadcaster: Option<ConnectionId>,
    /// Viewer connections, unique by connection identity.
    pub viewers: HashSet<ConnectionId>,
    pub source_language: String,
    pub target_language: String,
}

impl Room {
    pub fn new(
        id: RoomId,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            id,
            broadcaster: None,
            viewers: HashSet::new(),
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }

    /// Add a viewer. Returns `false` if the connection was already present.
    pub fn add_viewer(&mut self, conn: ConnectionId) -> bool {
        self.viewers.insert(conn)
    }

    /// Remove a viewer. Returns `false` if the connection was not present.
    pub fn remove_viewer(&mut self, conn: &ConnectionId) -> bool {
        self.viewers.remove(conn)
    }

    pub fn has_viewer(&self, conn: &ConnectionId) -> bool {
        self.viewers.contains(conn)
    }

    pub fn viewer_count(&self) -> usize {
        self.viewers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_room() -> Room {
        Room::new(RoomId::new("r1"), "ko", "en")
    }

    #[test]
    fn test_new_room_is_empty() {
        let room = create_test_room();

        assert!(room.broadcaster.is_none());
        assert_eq!(room.viewer_count(), 0);
        assert_eq!(room.source_language, "ko");
        assert_eq!(room.target_language, "en");
    }

    #[test]
    fn test_add_viewer_is_idempotent() {
        let mut room = create_test_room();
        let conn = ConnectionId::generate();

        assert!(room.add_viewer(conn.clone()));
        // Re-adding the same connection is a no-op.
        assert!(!room.add_viewer(conn.clone()));
        assert_eq!(room.viewer_count(), 1);
        assert!(room.has_viewer(&conn));
    }

    #[test]
    fn test_remove_viewer() {
        let mut room = create_test_room();
        let conn = ConnectionId::generate();
        room.add_viewer(conn.clone());

        assert!(room.remove_viewer(&conn));
        assert_eq!(room.viewer_count(), 0);
    }

    #[test]
    fn test_remove_absent_viewer_is_noop() {
        let mut room = create_test_room();

        assert!(!room.remove_viewer(&ConnectionId::generate()));
    }

    #[test]
    fn test_generated_connection_ids_are_unique() {
        let a = ConnectionId::generate();
        let b = ConnectionId::generate();

        assert_ne!(a, b);
    }
}
