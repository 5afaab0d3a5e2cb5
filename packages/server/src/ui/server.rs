//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{
    config::ServerConfig,
    handler::{
        create_room, get_room_detail, get_rooms, health_check, not_found, root,
        websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Build the axum router with all routes.
///
/// 統合テストからも同じルーターを使う。
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // WebSocket エンドポイント
        .route("/ws", get(websocket_handler))
        // HTTP エンドポイント
        .route("/", get(root))
        .route("/api/health", get(health_check))
        .route("/api/rooms", get(get_rooms).post(create_room))
        .route("/api/rooms/{room_id}", get(get_room_detail))
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Real-time room chat server
///
/// # Example
///
/// ```ignore
/// let state = AppState::new(coordinator, broadcaster, clock, config.utc_offset_minutes);
/// Server::new(state).run(&config).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Run the server until a shutdown signal is received
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address or
    /// if there's an error during server execution.
    pub async fn run(self, config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
        let app = build_router(self.state);

        let bind_addr = config.bind_addr();
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Chat server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
