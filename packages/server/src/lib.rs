//! Hiroba room chat server.
//!
//! ```text
//! ui (axum handlers) → usecase → domain (SessionRegistry / RoomDirectory)
//!                          └──→ Broadcaster (infrastructure::WebSocketBroadcaster)
//! ```

pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
