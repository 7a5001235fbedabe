//! UI layer: axum router, HTTP and WebSocket handlers, shared state.

mod handler;
mod server;
mod signal;
mod state;

pub use server::Server;
pub use state::AppState;
