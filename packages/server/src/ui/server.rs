//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use super::{
    handler::{debug_rooms, health_check, ws_stream, ws_view},
    signal::shutdown_signal,
    state::AppState,
};

/// Caption broadcast server.
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Build the application router. Exposed separately so tests can mount
    /// it on an ephemeral listener.
    pub fn router(state: Arc<AppState>) -> Router {
        Router::new()
            // WebSocket endpoints
            .route("/ws/stream/{room_id}", get(ws_stream))
            .route("/ws/view/{room_id}", get(ws_view))
            // HTTP endpoints
            .route("/debug/rooms", get(debug_rooms))
            .route("/api/health", get(health_check))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Run the caption broadcast server.
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8000)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address
    /// or if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = Self::router(self.state);

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!(
            "Caption broadcast server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Broadcast to: ws://{}/ws/stream/{{room_id}}", bind_addr);
        tracing::info!("View at:      ws://{}/ws/view/{{room_id}}", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
