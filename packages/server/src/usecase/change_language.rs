//! UseCase: room target-language change.

use std::sync::Arc;

use crate::domain::{RegistryError, RoomId, RoomRegistry};

/// Applies a viewer's `set_language` command to the room. The caption
/// pipeline reads the room's language pair per transcript, so the change
/// takes effect on subsequent captions.
pub struct ChangeLanguageUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl ChangeLanguageUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// # Errors
    ///
    /// Returns [`RegistryError::RoomNotFound`] if the room does not exist.
    pub async fn execute(&self, room_id: &RoomId, language: &str) -> Result<(), RegistryError> {
        self.registry.set_target_language(room_id, language).await?;
        tracing::info!("Room '{}' target language set to '{}'", room_id, language);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConnectionId;
    use crate::infrastructure::registry::InMemoryRoomRegistry;

    #[tokio::test]
    async fn test_change_language_updates_room() {
        let registry = Arc::new(InMemoryRoomRegistry::new("ko", "en"));
        let room_id = RoomId::new("r1");
        registry
            .upsert_broadcaster(&room_id, ConnectionId::generate())
            .await;
        let usecase = ChangeLanguageUseCase::new(registry.clone());

        usecase.execute(&room_id, "ja").await.unwrap();

        assert_eq!(registry.get(&room_id).await.unwrap().target_language, "ja");
    }

    #[tokio::test]
    async fn test_change_language_unknown_room_fails() {
        let registry = Arc::new(InMemoryRoomRegistry::new("ko", "en"));
        let usecase = ChangeLanguageUseCase::new(registry);

        let result = usecase.execute(&RoomId::new("ghost"), "ja").await;

        assert!(matches!(result, Err(RegistryError::RoomNotFound(_))));
    }
}
