//! SessionRegistry
//!
//! 接続 ID → セッション（ユーザー名・参加中のルーム）のマッピングを所有し、
//! ルームの変更は内部の `RoomDirectory` に委譲します。両方のマップを
//! このオブジェクトが持つため、1 つのロックで全操作を直列化できます。
//!
//! ## 接続ごとの状態遷移
//!
//! ```text
//! Unjoined --join--> Joined --leave/disconnect--> Unjoined
//!                    Joined --join(別ルーム)--> Joined（前のルームから自動で抜ける）
//! ```
//!
//! `Unjoined` での `send` / `typing_status` はエラーではなく no-op です。
//! 送信と切断の競合はよくあることとして扱います。

use std::collections::HashMap;

use super::{
    entity::{Message, Session},
    event::{BroadcastInstruction, PresenceKind, ServerEvent},
    room_directory::{AppendOutcome, RoomDirectory, RoomSnapshot, RoomSummary},
    value_object::{ConnectionId, MessageText, RoomId, Timestamp, Username},
};

/// join の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    pub connection_id: ConnectionId,
    pub username: Username,
    pub room_id: RoomId,
    /// 参加後の参加者（参加順）
    pub participants: Vec<Username>,
    /// 参加時点のメッセージログ
    pub messages: Vec<Message>,
    /// 参加後のルームの全接続（参加者自身を含む）
    pub audience: Vec<ConnectionId>,
    pub joined_at: Timestamp,
    /// 別のルームから移動した場合、そのルームからの離脱
    pub previous: Option<Departure>,
}

impl JoinOutcome {
    /// 配送指示: 旧ルームへの left → 参加者への history → ルームへの joined
    pub fn instructions(&self) -> Vec<BroadcastInstruction> {
        let mut instructions = Vec::with_capacity(3);
        if let Some(previous) = &self.previous {
            instructions.push(previous.instruction());
        }
        instructions.push(BroadcastInstruction::to_connection(
            self.connection_id.clone(),
            ServerEvent::History {
                room_id: self.room_id.clone(),
                messages: self.messages.clone(),
                participants: self.participants.clone(),
            },
        ));
        instructions.push(BroadcastInstruction::to_room(
            self.room_id.clone(),
            self.audience.clone(),
            ServerEvent::Presence {
                kind: PresenceKind::Joined,
                room_id: self.room_id.clone(),
                username: self.username.clone(),
                participants: self.participants.clone(),
                timestamp: self.joined_at,
            },
        ));
        instructions
    }
}

/// send の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub room_id: RoomId,
    pub message: Message,
    /// ルームの全接続（送信者を含む）
    pub audience: Vec<ConnectionId>,
}

impl SentMessage {
    pub fn instruction(&self) -> BroadcastInstruction {
        BroadcastInstruction::to_room(
            self.room_id.clone(),
            self.audience.clone(),
            ServerEvent::Message(self.message.clone()),
        )
    }
}

/// leave / disconnect の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub connection_id: ConnectionId,
    pub username: Username,
    pub room_id: RoomId,
    /// 残った参加者
    pub participants: Vec<Username>,
    pub room_removed: bool,
    /// 残った接続
    pub audience: Vec<ConnectionId>,
    pub left_at: Timestamp,
}

impl Departure {
    pub fn instruction(&self) -> BroadcastInstruction {
        BroadcastInstruction::to_room(
            self.room_id.clone(),
            self.audience.clone(),
            ServerEvent::Presence {
                kind: PresenceKind::Left,
                room_id: self.room_id.clone(),
                username: self.username.clone(),
                participants: self.participants.clone(),
                timestamp: self.left_at,
            },
        )
    }
}

/// typing インジケータの配送範囲
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingScope {
    pub room_id: RoomId,
    pub username: Username,
    /// 送信者を除くルームの接続
    pub audience: Vec<ConnectionId>,
}

impl TypingScope {
    pub fn instruction(&self, is_typing: bool) -> BroadcastInstruction {
        BroadcastInstruction::to_room(
            self.room_id.clone(),
            self.audience.clone(),
            ServerEvent::Typing {
                username: self.username.clone(),
                is_typing,
            },
        )
    }
}

/// 接続 ID → セッション、およびルームディレクトリ
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<ConnectionId, Session>,
    rooms: RoomDirectory,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// ルームに参加する
    ///
    /// 既に別のルームに参加している接続は、先にそのルームから抜ける。
    /// 同じルームへの再 join はユーザー名の更新のみ（参加者は重複しない）。
    pub fn join(
        &mut self,
        connection_id: ConnectionId,
        username: Username,
        room_id: RoomId,
        now: Timestamp,
    ) -> JoinOutcome {
        let moving = self
            .sessions
            .get(&connection_id)
            .is_some_and(|session| session.room_id != room_id);
        let previous = if moving {
            self.leave(&connection_id, now)
        } else {
            None
        };

        self.sessions.insert(
            connection_id.clone(),
            Session::new(connection_id.clone(), username.clone(), room_id.clone()),
        );

        let sessions = &self.sessions;
        let participants = self
            .rooms
            .join(&room_id, &connection_id, now, |id| resolve(sessions, id));
        let messages = self.rooms.messages(&room_id);
        let audience = self.rooms.connections(&room_id);

        tracing::info!(
            "'{}' ({}) joined room '{}' ({} participants)",
            username,
            connection_id,
            room_id,
            participants.len()
        );

        JoinOutcome {
            connection_id,
            username,
            room_id,
            participants,
            messages,
            audience,
            joined_at: now,
            previous,
        }
    }

    /// メッセージを送信者のルームに追記する
    ///
    /// セッションがない（未参加・切断済み）場合や、ルームが既に存在しない
    /// 場合は `None` を返し、何も追記しない。
    pub fn send(
        &mut self,
        connection_id: &ConnectionId,
        text: MessageText,
        now: Timestamp,
    ) -> Option<SentMessage> {
        let session = self.sessions.get(connection_id)?;
        let room_id = session.room_id.clone();
        let message = Message::new(text, session.username.clone(), now);

        match self.rooms.append_message(&room_id, message.clone()) {
            AppendOutcome::Appended { .. } => Some(SentMessage {
                audience: self.rooms.connections(&room_id),
                room_id,
                message,
            }),
            AppendOutcome::RoomNotFound => {
                tracing::warn!(
                    "Dropping message from '{}': room '{}' no longer exists",
                    connection_id,
                    room_id
                );
                None
            }
        }
    }

    /// ルームから抜ける
    ///
    /// セッションは無条件に削除される（ルームが既に存在しなくても）。
    pub fn leave(&mut self, connection_id: &ConnectionId, now: Timestamp) -> Option<Departure> {
        let session = self.sessions.remove(connection_id)?;

        let sessions = &self.sessions;
        let result = self
            .rooms
            .leave(&session.room_id, connection_id, |id| resolve(sessions, id));
        let audience = self.rooms.connections(&session.room_id);

        tracing::info!(
            "'{}' ({}) left room '{}'",
            session.username,
            connection_id,
            session.room_id
        );

        Some(Departure {
            connection_id: session.connection_id,
            username: session.username,
            room_id: session.room_id,
            participants: result.participants,
            room_removed: result.room_removed,
            audience,
            left_at: now,
        })
    }

    /// 切断。ブロードキャストとクリーンアップは leave と同じ
    pub fn disconnect(
        &mut self,
        connection_id: &ConnectionId,
        now: Timestamp,
    ) -> Option<Departure> {
        self.leave(connection_id, now)
    }

    /// typing インジケータを送るべきルームと宛先（送信者を除く）
    pub fn typing_status(&self, connection_id: &ConnectionId) -> Option<TypingScope> {
        let session = self.sessions.get(connection_id)?;
        let audience = self
            .rooms
            .connections(&session.room_id)
            .into_iter()
            .filter(|id| id != connection_id)
            .collect();

        Some(TypingScope {
            room_id: session.room_id.clone(),
            username: session.username.clone(),
            audience,
        })
    }

    pub fn snapshot(&self, room_id: &RoomId) -> Option<RoomSnapshot> {
        let sessions = &self.sessions;
        self.rooms.snapshot(room_id, |id| resolve(sessions, id))
    }

    pub fn list_rooms(&self) -> Vec<RoomSummary> {
        self.rooms.list_rooms()
    }

    #[cfg(test)]
    pub(crate) fn session(&self, connection_id: &ConnectionId) -> Option<&Session> {
        self.sessions.get(connection_id)
    }

    #[cfg(test)]
    pub(crate) fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

fn resolve(sessions: &HashMap<ConnectionId, Session>, id: &ConnectionId) -> Option<Username> {
    sessions.get(id).map(|session| session.username.clone())
}
