//! Deepgram live transcription client.
//!
//! Speaks the `wss://api.deepgram.com/v1/listen` streaming protocol: audio
//! goes upstream as binary frames, results come back as JSON text frames. A
//! reader task forwards final, non-empty transcripts into the session sink;
//! a keepalive task stops the upstream from closing the socket during gaps
//! in the audio.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt, stream::SplitSink};
use serde::Deserialize;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use crate::domain::{AudioFormat, SttEngine, SttError, SttSession, TranscriptRecord, TranscriptSink};

const DEEPGRAM_LIVE_URL: &str = "wss://api.deepgram.com/v1/listen";
const KEEPALIVE_FRAME: &str = "{\"type\":\"KeepAlive\"}";
const CLOSE_STREAM_FRAME: &str = "{\"type\":\"CloseStream\"}";
const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(5);

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Streaming STT engine backed by Deepgram's live API.
pub struct DeepgramEngine {
    api_key: String,
    model: String,
    language: String,
}

impl DeepgramEngine {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            language: language.into(),
        }
    }

    fn listen_url(&self, format: &AudioFormat) -> String {
        format!(
            "{}?model={}&language={}&punctuate=true&encoding={}&sample_rate={}&channels={}",
            DEEPGRAM_LIVE_URL,
            self.model,
            self.language,
            format.encoding,
            format.sample_rate,
            format.channels
        )
    }
}

#[async_trait]
impl SttEngine for DeepgramEngine {
    async fn open(
        &self,
        format: &AudioFormat,
        sink: TranscriptSink,
    ) -> Result<Box<dyn SttSession>, SttError> {
        let url = self.listen_url(format);
        let mut request = url
            .into_client_request()
            .map_err(|e| SttError::StartFailed(e.to_string()))?;
        request.headers_mut().insert(
            "Authorization",
            HeaderValue::from_str(&format!("Token {}", self.api_key))
                .map_err(|e| SttError::StartFailed(e.to_string()))?,
        );

        let (ws_stream, _response) = connect_async(request)
            .await
            .map_err(|e| SttError::StartFailed(e.to_string()))?;
        tracing::info!("Deepgram connection opened");

        let (ws_sink, mut ws_reader) = ws_stream.split();
        let ws_sink = Arc::new(Mutex::new(ws_sink));

        let reader = tokio::spawn(async move {
            while let Some(message) = ws_reader.next().await {
                match message {
                    Ok(Message::Text(text)) => {
                        if let Some(record) = extract_final_transcript(text.as_str()) {
                            tracing::debug!("Transcript received: {}", record.text);
                            if sink.send(record).is_err() {
                                // Consumer side is gone; the session is being
                                // torn down.
                                break;
                            }
                        }
                    }
                    Ok(Message::Close(_)) => {
                        tracing::info!("Deepgram connection closed");
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!("Deepgram read error: {}", e);
                        break;
                    }
                }
            }
        });

        let keepalive_sink = ws_sink.clone();
        let keepalive = tokio::spawn(async move {
            let mut timer = tokio::time::interval(KEEPALIVE_INTERVAL);
            loop {
                timer.tick().await;
                let mut guard = keepalive_sink.lock().await;
                if guard.send(Message::Text(KEEPALIVE_FRAME.into())).await.is_err() {
                    break;
                }
            }
        });

        Ok(Box::new(DeepgramSession {
            sink: ws_sink,
            reader,
            keepalive,
        }))
    }
}

/// One open Deepgram live session.
pub struct DeepgramSession {
    sink: Arc<Mutex<WsSink>>,
    reader: JoinHandle<()>,
    keepalive: JoinHandle<()>,
}

#[async_trait]
impl SttSession for DeepgramSession {
    async fn send_audio(&mut self, chunk: &[u8]) -> Result<(), SttError> {
        let mut sink = self.sink.lock().await;
        sink.send(Message::Binary(chunk.to_vec().into()))
            .await
            .map_err(|e| SttError::SendFailed(e.to_string()))
    }

    async fn finish(&mut self) -> Result<(), SttError> {
        self.keepalive.abort();

        let mut sink = self.sink.lock().await;
        // The upstream flushes remaining results on CloseStream; errors here
        // mean the socket is already gone, which is fine at teardown.
        let _ = sink.send(Message::Text(CLOSE_STREAM_FRAME.into())).await;
        let _ = sink.close().await;
        drop(sink);

        self.reader.abort();
        Ok(())
    }
}

impl Drop for DeepgramSession {
    fn drop(&mut self) {
        self.keepalive.abort();
        self.reader.abort();
    }
}

/// Parse one live-API text frame, returning the transcript only for final,
/// non-empty results.
fn extract_final_transcript(payload: &str) -> Option<TranscriptRecord> {
    let response: LiveResponse = match serde_json::from_str(payload) {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!("Ignoring unparseable Deepgram frame: {}", e);
            return None;
        }
    };

    if response.r#type != "Results" || !response.is_final.unwrap_or(true) {
        return None;
    }

    let alternative = response.channel?.alternatives.into_iter().next()?;
    if alternative.transcript.is_empty() {
        // Empty transcript received, ignore.
        return None;
    }

    Some(TranscriptRecord {
        text: alternative.transcript,
        confidence: alternative.confidence,
    })
}

#[derive(Debug, Deserialize)]
struct LiveResponse {
    #[serde(default)]
    r#type: String,
    is_final: Option<bool>,
    channel: Option<LiveChannel>,
}

#[derive(Debug, Deserialize)]
struct LiveChannel {
    #[serde(default)]
    alternatives: Vec<LiveAlternative>,
}

#[derive(Debug, Deserialize)]
struct LiveAlternative {
    #[serde(default)]
    transcript: String,
    #[serde(default)]
    confidence: f64,
}
