//! OpenAI chat-completions translation backend.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{TranslationError, Translator};

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

pub struct OpenAiTranslator {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenAiTranslator {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

fn system_prompt(source: &str, target: &str) -> String {
    format!(
        "You are a professional translator. \n\
         Translate the following text from {} to {}.\n\
         Provide ONLY the translation, with no additional text, explanations, or notes.\n\
         Maintain the original meaning, tone, and style as closely as possible.\n",
        source, target
    )
}

#[async_trait]
impl Translator for OpenAiTranslator {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system_prompt(source, target)},
                {"role": "user", "content": text},
            ],
            // Lower temperature for more consistent translations
            "temperature": 0.3,
            "max_tokens": 1024,
        });

        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| TranslationError::RequestFailed(e.to_string()))?
            .error_for_status()
            .map_err(|e| TranslationError::RequestFailed(e.to_string()))?;

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::MalformedResponse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| {
                TranslationError::MalformedResponse("response contained no choices".to_string())
            })
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}
