//! Translation gateway and the OpenAI chat-completions backend.

pub mod gateway;
pub mod openai;

pub use gateway::TranslationGateway;
pub use openai::OpenAiTranslator;
