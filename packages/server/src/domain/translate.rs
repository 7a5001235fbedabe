//! Translation collaborator trait.

use async_trait::async_trait;

use super::TranslationError;

/// Stateless external translation call: text + language pair → translated
/// text. Callers go through the translation gateway, which turns failures
/// into a marked passthrough instead of propagating them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError>;
}
