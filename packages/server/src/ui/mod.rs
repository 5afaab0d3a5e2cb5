//! UI layer: axum router, WebSocket / HTTP handlers and server runner.

pub mod config;
pub mod handler;
pub mod server;
pub mod signal;
pub mod state;

pub use config::{ConfigError, ServerArgs, ServerConfig};
pub use server::{Server, build_router};
pub use state::AppState;
