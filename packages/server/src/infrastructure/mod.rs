//! Infrastructure layer: wire formats and delivery to WebSocket connections.

pub mod broadcaster;
pub mod dto;
