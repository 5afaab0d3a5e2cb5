//! WebSocket event DTOs.
//!
//! Every frame is a JSON object tagged by `type`:
//!
//! ```text
//! client → server: join, send_message, leave, typing, list_rooms
//! server → client: history, presence, message, typing, rooms, error
//! ```

use serde::{Deserialize, Serialize};

use super::http::RoomSummaryDto;

/// Inbound events sent by a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    Join { username: String, room_id: String },
    SendMessage { text: String },
    Leave,
    Typing { is_typing: bool },
    ListRooms,
}

/// A chat message as delivered to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDto {
    pub id: String,
    pub text: String,
    pub author: String,
    /// Display time, e.g. `3:07 pm`
    pub timestamp: String,
    #[serde(default)]
    pub is_system: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresenceKindDto {
    Joined,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCodeDto {
    Malformed,
}

/// Outbound events pushed to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEventDto {
    History {
        room_id: String,
        messages: Vec<MessageDto>,
        participants: Vec<String>,
    },
    Presence {
        kind: PresenceKindDto,
        room_id: String,
        username: String,
        participants: Vec<String>,
        timestamp: String,
    },
    Message(MessageDto),
    Typing {
        username: String,
        is_typing: bool,
    },
    Rooms {
        rooms: Vec<RoomSummaryDto>,
    },
    Error {
        code: ErrorCodeDto,
        message: String,
    },
}
