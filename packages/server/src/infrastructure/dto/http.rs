//! HTTP API DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::MessageDto;

/// Summary of an active room (`GET /api/rooms`, `rooms` event)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub room_id: String,
    pub participant_count: usize,
    pub message_count: usize,
}

/// Room history and participants (`GET /api/rooms/{room_id}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSnapshotDto {
    pub room_id: String,
    /// RFC 3339
    pub created_at: String,
    pub messages: Vec<MessageDto>,
    pub participants: Vec<String>,
}

/// Request body of `POST /api/rooms`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRoomRequestDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Response body of `POST /api/rooms`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRoomResponseDto {
    pub message: String,
    pub room_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Error body returned by the HTTP API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub message: String,
}
