//! Conversion logic between domain types and DTOs.
//!
//! Timestamps are rendered here, so conversions that carry a timestamp take
//! the configured UTC offset (minutes) instead of implementing `From`.

use crate::domain::{
    Message, PresenceKind, RejectionCode, RoomSnapshot, RoomSummary, ServerEvent, Username,
};

use super::{
    http::{RoomSnapshotDto, RoomSummaryDto},
    websocket::{ErrorCodeDto, MessageDto, PresenceKindDto, ServerEventDto},
};

fn usernames(participants: &[Username]) -> Vec<String> {
    participants.iter().map(|u| u.as_str().to_string()).collect()
}

// ========================================
// Domain → DTO
// ========================================

impl From<PresenceKind> for PresenceKindDto {
    fn from(kind: PresenceKind) -> Self {
        match kind {
            PresenceKind::Joined => Self::Joined,
            PresenceKind::Left => Self::Left,
        }
    }
}

impl From<RejectionCode> for ErrorCodeDto {
    fn from(code: RejectionCode) -> Self {
        match code {
            RejectionCode::Malformed => Self::Malformed,
        }
    }
}

impl From<&RoomSummary> for RoomSummaryDto {
    fn from(summary: &RoomSummary) -> Self {
        Self {
            room_id: summary.room_id.as_str().to_string(),
            participant_count: summary.participant_count,
            message_count: summary.message_count,
        }
    }
}

impl MessageDto {
    pub fn from_message(message: &Message, offset_minutes: i32) -> Self {
        Self {
            id: message.id.to_string(),
            text: message.text.as_str().to_string(),
            author: message.author.as_str().to_string(),
            timestamp: message.created_at.to_display(offset_minutes),
            is_system: message.is_system,
        }
    }
}

impl RoomSnapshotDto {
    pub fn from_snapshot(snapshot: &RoomSnapshot, offset_minutes: i32) -> Self {
        Self {
            room_id: snapshot.room_id.as_str().to_string(),
            created_at: snapshot.created_at.to_rfc3339(offset_minutes),
            messages: snapshot
                .messages
                .iter()
                .map(|m| MessageDto::from_message(m, offset_minutes))
                .collect(),
            participants: usernames(&snapshot.participants),
        }
    }
}

impl ServerEventDto {
    pub fn from_event(event: &ServerEvent, offset_minutes: i32) -> Self {
        match event {
            ServerEvent::History {
                room_id,
                messages,
                participants,
            } => Self::History {
                room_id: room_id.as_str().to_string(),
                messages: messages
                    .iter()
                    .map(|m| MessageDto::from_message(m, offset_minutes))
                    .collect(),
                participants: usernames(participants),
            },
            ServerEvent::Presence {
                kind,
                room_id,
                username,
                participants,
                timestamp,
            } => Self::Presence {
                kind: (*kind).into(),
                room_id: room_id.as_str().to_string(),
                username: username.as_str().to_string(),
                participants: usernames(participants),
                timestamp: timestamp.to_display(offset_minutes),
            },
            ServerEvent::Message(message) => {
                Self::Message(MessageDto::from_message(message, offset_minutes))
            }
            ServerEvent::Typing {
                username,
                is_typing,
            } => Self::Typing {
                username: username.as_str().to_string(),
                is_typing: *is_typing,
            },
            ServerEvent::Rooms { rooms } => Self::Rooms {
                rooms: rooms.iter().map(RoomSummaryDto::from).collect(),
            },
            ServerEvent::Rejected { code, message } => Self::Error {
                code: (*code).into(),
                message: message.clone(),
            },
        }
    }
}
