//! Broadcast instructions
//!
//! コアの各操作は「何を・誰に」送るかだけを計算し、`BroadcastInstruction`
//! として返します。実際の配送は `Broadcaster` の実装が行います。

use super::{
    entity::Message,
    room_directory::RoomSummary,
    value_object::{ConnectionId, RoomId, Timestamp, Username},
};

/// presence イベントの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceKind {
    Joined,
    Left,
}

/// トランスポート層で入力を拒否した理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionCode {
    Malformed,
}

/// クライアントに配送されるイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    /// 参加直後の接続にのみ送る履歴
    History {
        room_id: RoomId,
        messages: Vec<Message>,
        participants: Vec<Username>,
    },
    Presence {
        kind: PresenceKind,
        room_id: RoomId,
        username: Username,
        participants: Vec<Username>,
        timestamp: Timestamp,
    },
    Message(Message),
    Typing {
        username: Username,
        is_typing: bool,
    },
    /// listRooms への応答（呼び出し元のみ）
    Rooms { rooms: Vec<RoomSummary> },
    /// 不正な入力の拒否（呼び出し元のみ）
    Rejected {
        code: RejectionCode,
        message: String,
    },
}

/// 配送指示: 宛先はコアが操作を返す時点で確定している
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastInstruction {
    pub room_id: Option<RoomId>,
    pub recipients: Vec<ConnectionId>,
    pub event: ServerEvent,
}

impl BroadcastInstruction {
    /// ルームの参加者（確定済みの宛先リスト）に送る
    pub fn to_room(room_id: RoomId, recipients: Vec<ConnectionId>, event: ServerEvent) -> Self {
        Self {
            room_id: Some(room_id),
            recipients,
            event,
        }
    }

    /// 単一の接続にのみ送る
    pub fn to_connection(connection_id: ConnectionId, event: ServerEvent) -> Self {
        Self {
            room_id: None,
            recipients: vec![connection_id],
            event,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty()
    }
}
