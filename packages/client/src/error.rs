//! Error types for the terminal client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server could not be reached
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// An established connection was closed by the server or the network
    #[error("Connection lost")]
    ConnectionLost,

    /// The server URL is not a WebSocket URL
    #[error("Invalid server URL '{0}': expected ws:// or wss://")]
    InvalidUrl(String),
}
