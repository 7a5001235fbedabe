//! Server settings.
//!
//! Credentials and tunables come from environment variables; the bind
//! address comes from CLI flags in the binary.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::AudioFormat;

#[derive(Debug, Clone)]
pub struct Settings {
    // API keys
    pub deepgram_api_key: String,
    pub openai_api_key: String,

    // Model settings
    pub openai_model: String,
    pub stt_model: String,
    /// Language tag the STT session listens for (e.g. "ko-KR")
    pub stt_language: String,

    // Translation settings
    pub source_language: String,
    pub target_language: String,

    // WebSocket heartbeat settings
    pub ping_interval: Duration,
    pub pong_timeout: Duration,

    // Audio settings
    pub sample_rate: u32,
    pub channels: u16,
    pub encoding: String,
}

impl Settings {
    /// Load settings from the environment, falling back to defaults for
    /// anything unset.
    pub fn from_env() -> Self {
        Self {
            deepgram_api_key: env::var("DEEPGRAM_API_KEY").unwrap_or_default(),
            openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            openai_model: env_or("OPENAI_MODEL", "gpt-4o"),
            stt_model: env_or("STT_MODEL", "nova-2"),
            stt_language: env_or("STT_LANGUAGE", "ko-KR"),
            source_language: env_or("SOURCE_LANGUAGE", "ko"),
            target_language: env_or("TARGET_LANGUAGE", "en"),
            ping_interval: Duration::from_secs(env_parse("WS_HEARTBEAT_INTERVAL", 30)),
            pong_timeout: Duration::from_secs(env_parse("WS_PONG_TIMEOUT", 15)),
            sample_rate: env_parse("AUDIO_SAMPLE_RATE", 16_000),
            channels: env_parse("AUDIO_CHANNELS", 1),
            encoding: env_or("AUDIO_ENCODING", "linear16"),
        }
    }

    /// Audio stream parameters handed to the STT collaborator.
    pub fn audio_format(&self) -> AudioFormat {
        AudioFormat {
            encoding: self.encoding.clone(),
            sample_rate: self.sample_rate,
            channels: self.channels,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: FromStr + Copy>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_falls_back_for_unset_variable() {
        assert_eq!(env_or("BABELCAST_TEST_UNSET_VAR", "fallback"), "fallback");
    }

    #[test]
    fn test_env_parse_falls_back_for_unset_variable() {
        assert_eq!(env_parse("BABELCAST_TEST_UNSET_VAR", 42u32), 42);
    }

    #[test]
    fn test_audio_format_mirrors_settings() {
        let mut settings = Settings::from_env();
        settings.encoding = "linear16".to_string();
        settings.sample_rate = 16_000;
        settings.channels = 1;

        let format = settings.audio_format();

        assert_eq!(format.encoding, "linear16");
        assert_eq!(format.sample_rate, 16_000);
        assert_eq!(format.channels, 1);
    }
}
