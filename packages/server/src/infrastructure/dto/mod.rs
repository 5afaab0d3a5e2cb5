//! Data Transfer Objects (DTOs) for the chat application.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket event DTOs (client → server and server → client)
//! - `http`: HTTP API request/response DTOs

pub mod conversion;
pub mod http;
pub mod websocket;
