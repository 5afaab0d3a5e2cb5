//! Entities
//!
//! `Room` と `Message` のライフタイムは `RoomDirectory` が、`Session` の
//! ライフタイムは `SessionRegistry` が排他的に所有します。

use super::value_object::{ConnectionId, MessageId, MessageText, RoomId, Timestamp, Username};

/// 接続ごとのセッション
///
/// レジストリに存在する間は常にいずれかのルームに参加している。
/// ルームへの参照は `RoomId` のみを保持し、`Room` の内部には触れない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub connection_id: ConnectionId,
    pub username: Username,
    pub room_id: RoomId,
}

impl Session {
    pub fn new(connection_id: ConnectionId, username: Username, room_id: RoomId) -> Self {
        Self {
            connection_id,
            username,
            room_id,
        }
    }
}

/// ルームのメッセージログに追記されるメッセージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub text: MessageText,
    pub author: Username,
    pub created_at: Timestamp,
    pub is_system: bool,
}

impl Message {
    /// ユーザーが送信したメッセージを作成
    pub fn new(text: MessageText, author: Username, created_at: Timestamp) -> Self {
        Self {
            id: MessageId::generate(),
            text,
            author,
            created_at,
            is_system: false,
        }
    }
}

/// チャットルーム
///
/// 参加者は重複なしで参加順に保持する。メッセージは追記のみで、
/// 追記順がそのまま配信順になる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub created_at: Timestamp,
    participants: Vec<ConnectionId>,
    messages: Vec<Message>,
}

impl Room {
    pub fn new(id: RoomId, created_at: Timestamp) -> Self {
        Self {
            id,
            created_at,
            participants: Vec::new(),
            messages: Vec::new(),
        }
    }

    /// 参加者を追加。既に参加している場合は何もせず `false` を返す
    pub fn add_participant(&mut self, connection_id: ConnectionId) -> bool {
        if self.has_participant(&connection_id) {
            return false;
        }
        self.participants.push(connection_id);
        true
    }

    /// 参加者を削除。参加していなかった場合は `false` を返す
    pub fn remove_participant(&mut self, connection_id: &ConnectionId) -> bool {
        let before = self.participants.len();
        self.participants.retain(|id| id != connection_id);
        self.participants.len() != before
    }

    pub fn has_participant(&self, connection_id: &ConnectionId) -> bool {
        self.participants.contains(connection_id)
    }

    pub fn participants(&self) -> &[ConnectionId] {
        &self.participants
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// メッセージを追記し、追記後の件数を返す
    pub fn append_message(&mut self, message: Message) -> usize {
        self.messages.push(message);
        self.messages.len()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}
