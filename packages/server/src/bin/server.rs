//! Hiroba room chat server.
//!
//! Clients join named rooms over WebSocket; rooms are created on the first
//! join and removed when the last participant leaves.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --host 0.0.0.0 --port 3000 --utc-offset-minutes 540
//! ```

use std::sync::Arc;

use clap::Parser;
use hiroba_server::{
    infrastructure::broadcaster::WebSocketBroadcaster,
    ui::{AppState, Server, ServerArgs, ServerConfig},
    usecase::new_coordinator,
};
use hiroba_shared::{logger::setup_logger, time::SystemClock};

#[tokio::main]
async fn main() {
    let args = ServerArgs::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let config = match ServerConfig::try_from(args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize dependencies in order:
    // 1. Coordinator (SessionRegistry + RoomDirectory)
    // 2. Broadcaster
    // 3. UseCases (AppState)
    // 4. Server
    let coordinator = new_coordinator();
    let broadcaster = Arc::new(WebSocketBroadcaster::new(config.utc_offset_minutes));
    let state = AppState::new(
        coordinator,
        broadcaster,
        Arc::new(SystemClock),
        config.utc_offset_minutes,
    );

    if let Err(e) = Server::new(state).run(&config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
