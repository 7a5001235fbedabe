//! Boundary wrapper around the external translator.
//!
//! The caption pipeline must never stall on a translation outage, so any
//! backend failure degrades to a marked passthrough of the original text
//! instead of propagating.

use std::sync::Arc;

use crate::domain::Translator;

pub struct TranslationGateway {
    backend: Arc<dyn Translator>,
}

impl TranslationGateway {
    pub fn new(backend: Arc<dyn Translator>) -> Self {
        Self { backend }
    }

    /// Translate `text`, falling back to `"[Translation Error] {text}"` if
    /// the backend fails. Empty input short-circuits to an empty string
    /// without a call.
    pub async fn translate(&self, text: &str, source: &str, target: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        match self.backend.translate(text, source, target).await {
            Ok(translation) => translation,
            Err(e) => {
                tracing::error!("Translation error: {}", e);
                format!("[Translation Error] {}", text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MockTranslator, TranslationError};

    #[tokio::test]
    async fn test_translate_success_passes_through() {
        let mut backend = MockTranslator::new();
        backend
            .expect_translate()
            .withf(|text, source, target| text == "안녕하세요" && source == "ko" && target == "en")
            .returning(|_, _, _| Ok("Hello".to_string()));
        let gateway = TranslationGateway::new(Arc::new(backend));

        let result = gateway.translate("안녕하세요", "ko", "en").await;

        assert_eq!(result, "Hello");
    }

    #[tokio::test]
    async fn test_translate_failure_degrades_to_marked_passthrough() {
        let mut backend = MockTranslator::new();
        backend.expect_translate().returning(|_, _, _| {
            Err(TranslationError::RequestFailed("boom".to_string()))
        });
        let gateway = TranslationGateway::new(Arc::new(backend));

        let result = gateway.translate("안녕하세요", "ko", "en").await;

        assert_eq!(result, "[Translation Error] 안녕하세요");
    }

    #[tokio::test]
    async fn test_translate_empty_input_skips_backend() {
        let mut backend = MockTranslator::new();
        backend.expect_translate().times(0);
        let gateway = TranslationGateway::new(Arc::new(backend));

        let result = gateway.translate("", "ko", "en").await;

        assert_eq!(result, "");
    }
}
