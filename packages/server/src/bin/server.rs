//! Live caption broadcast server.
//!
//! One broadcaster streams audio per room; viewers receive translated
//! captions over WebSocket.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin babelcast-server
//! cargo run --bin babelcast-server -- --host 0.0.0.0 --port 8000
//! ```

use std::sync::Arc;

use babelcast_server::{
    config::Settings,
    infrastructure::{
        pusher::WebSocketMessagePusher,
        registry::InMemoryRoomRegistry,
        stt::{DeepgramEngine, TranscriptionBridge},
        translation::{OpenAiTranslator, TranslationGateway},
    },
    ui::{AppState, Server},
    usecase::{
        AttachBroadcasterUseCase, BroadcastFanout, CaptionPipeline, ChangeLanguageUseCase,
        JoinViewerUseCase, LeaveViewerUseCase,
    },
};
use babelcast_shared::{logger::setup_logger, time::SystemClock};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "babelcast-server")]
#[command(about = "Live caption broadcast server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8000")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let settings = Settings::from_env();

    if settings.deepgram_api_key.is_empty() {
        tracing::warn!(
            "DEEPGRAM_API_KEY is not set; broadcaster streams will fail to start transcription"
        );
    }
    if settings.openai_api_key.is_empty() {
        tracing::warn!("OPENAI_API_KEY is not set; captions will carry the fallback translation");
    }

    // Initialize dependencies in order:
    // 1. Registry and pusher
    // 2. External collaborators (STT, translation)
    // 3. UseCases
    // 4. AppState
    // 5. Server

    // 1. Room registry and connection pusher
    let registry = Arc::new(InMemoryRoomRegistry::new(
        settings.source_language.clone(),
        settings.target_language.clone(),
    ));
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 2. External collaborators
    let stt_engine = Arc::new(DeepgramEngine::new(
        settings.deepgram_api_key.clone(),
        settings.stt_model.clone(),
        settings.stt_language.clone(),
    ));
    let bridge = Arc::new(TranscriptionBridge::new(stt_engine));
    let translator = Arc::new(OpenAiTranslator::new(
        settings.openai_api_key.clone(),
        settings.openai_model.clone(),
    ));
    let translation_gateway = Arc::new(TranslationGateway::new(translator));

    // 3. UseCases
    let fanout = Arc::new(BroadcastFanout::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let caption_pipeline = Arc::new(CaptionPipeline::new(
        registry.clone(),
        translation_gateway,
        fanout,
        Arc::new(SystemClock),
    ));
    let attach_broadcaster_usecase = Arc::new(AttachBroadcasterUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let join_viewer_usecase = Arc::new(JoinViewerUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let leave_viewer_usecase = Arc::new(LeaveViewerUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let change_language_usecase = Arc::new(ChangeLanguageUseCase::new(registry.clone()));

    // 4. AppState
    let state = Arc::new(AppState {
        settings,
        registry,
        bridge,
        attach_broadcaster_usecase,
        join_viewer_usecase,
        leave_viewer_usecase,
        change_language_usecase,
        caption_pipeline,
    });

    // 5. Create and run the server
    let server = Server::new(state);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
