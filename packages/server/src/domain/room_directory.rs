//! RoomDirectory
//!
//! ルーム ID からルーム状態（参加者集合・メッセージログ）へのマッピングを
//! 所有する葉のコンポーネント。トランスポートについては何も知りません。
//!
//! ## 不変条件
//!
//! - ルームは参加者が一人以上いる間だけディレクトリに存在する
//! - 最後の参加者が抜けた瞬間に同期的に削除される
//! - 未知のルーム ID への join でルームが遅延生成される
//!
//! 参加者のユーザー名はディレクトリ自身は持たず、呼び出し側が渡す
//! `resolve` で接続 ID から解決します。

use std::collections::HashMap;

use super::{
    entity::{Message, Room},
    value_object::{ConnectionId, RoomId, Timestamp, Username},
};

/// leave の結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaveResult {
    /// 残った参加者のユーザー名
    pub participants: Vec<Username>,
    /// 最後の参加者が抜けてルームが削除されたか
    pub room_removed: bool,
}

/// append_message の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// 追記後のメッセージ件数
    Appended { count: usize },
    /// ルームが存在しない（送信者がライブなルームにいなかった）
    RoomNotFound,
}

/// ルームの履歴と参加者
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub room_id: RoomId,
    pub created_at: Timestamp,
    pub messages: Vec<Message>,
    pub participants: Vec<Username>,
}

/// listRooms の 1 要素
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub room_id: RoomId,
    pub participant_count: usize,
    pub message_count: usize,
}

/// ルーム ID → ルーム状態
#[derive(Debug, Default)]
pub struct RoomDirectory {
    rooms: HashMap<RoomId, Room>,
}

impl RoomDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// ルームに参加する（存在しなければ作成）。参加は冪等で、常に成功する
    ///
    /// # Returns
    ///
    /// 参加後の参加者のユーザー名（参加順）
    pub fn join<F>(
        &mut self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
        now: Timestamp,
        resolve: F,
    ) -> Vec<Username>
    where
        F: Fn(&ConnectionId) -> Option<Username>,
    {
        let room = self.rooms.entry(room_id.clone()).or_insert_with(|| {
            tracing::info!("Room '{}' created", room_id);
            Room::new(room_id.clone(), now)
        });
        room.add_participant(connection_id.clone());
        resolve_usernames(room, resolve)
    }

    /// ルームから抜ける。空になったルームはその場で削除される
    ///
    /// 参加していない接続や存在しないルームに対する leave は no-op で、
    /// 空のスナップショットと `room_removed = false` を返す。
    pub fn leave<F>(
        &mut self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
        resolve: F,
    ) -> LeaveResult
    where
        F: Fn(&ConnectionId) -> Option<Username>,
    {
        let Some(room) = self.rooms.get_mut(room_id) else {
            return LeaveResult::default();
        };
        if !room.remove_participant(connection_id) {
            return LeaveResult::default();
        }

        if room.is_empty() {
            self.rooms.remove(room_id);
            tracing::info!("Room '{}' removed as it has no participants", room_id);
            return LeaveResult {
                participants: Vec::new(),
                room_removed: true,
            };
        }

        LeaveResult {
            participants: resolve_usernames(room, resolve),
            room_removed: false,
        }
    }

    /// メッセージを追記する。ルームが存在しなければ `RoomNotFound` を返す
    pub fn append_message(&mut self, room_id: &RoomId, message: Message) -> AppendOutcome {
        match self.rooms.get_mut(room_id) {
            Some(room) => AppendOutcome::Appended {
                count: room.append_message(message),
            },
            None => AppendOutcome::RoomNotFound,
        }
    }

    pub fn snapshot<F>(&self, room_id: &RoomId, resolve: F) -> Option<RoomSnapshot>
    where
        F: Fn(&ConnectionId) -> Option<Username>,
    {
        self.rooms.get(room_id).map(|room| RoomSnapshot {
            room_id: room.id.clone(),
            created_at: room.created_at,
            messages: room.messages().to_vec(),
            participants: resolve_usernames(room, resolve),
        })
    }

    /// アクティブなルームの一覧。順序はディレクトリの反復順（不定）
    pub fn list_rooms(&self) -> Vec<RoomSummary> {
        self.rooms
            .values()
            .map(|room| RoomSummary {
                room_id: room.id.clone(),
                participant_count: room.participants().len(),
                message_count: room.messages().len(),
            })
            .collect()
    }

    /// ルームに現在参加している接続（配送の宛先）
    pub fn connections(&self, room_id: &RoomId) -> Vec<ConnectionId> {
        self.rooms
            .get(room_id)
            .map(|room| room.participants().to_vec())
            .unwrap_or_default()
    }

    /// ルームのメッセージログ。ルームが存在しなければ空
    pub fn messages(&self, room_id: &RoomId) -> Vec<Message> {
        self.rooms
            .get(room_id)
            .map(|room| room.messages().to_vec())
            .unwrap_or_default()
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, room_id: &RoomId) -> bool {
        self.rooms.contains_key(room_id)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.rooms.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

fn resolve_usernames<F>(room: &Room, resolve: F) -> Vec<Username>
where
    F: Fn(&ConnectionId) -> Option<Username>,
{
    room.participants().iter().filter_map(resolve).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::MessageText;

    fn room_id(value: &str) -> RoomId {
        RoomId::new(value.to_string()).unwrap()
    }

    fn connection(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string()).unwrap()
    }

    // 接続 ID をそのままユーザー名として解決する
    fn resolve_as_username(id: &ConnectionId) -> Option<Username> {
        Username::new(id.as_str().to_string()).ok()
    }

    fn message(author: &str, text: &str) -> Message {
        Message::new(
            MessageText::new(text.to_string()).unwrap(),
            Username::new(author.to_string()).unwrap(),
            Timestamp::new(2000),
        )
    }

    fn join(directory: &mut RoomDirectory, room: &str, connection_id: &str) -> Vec<Username> {
        directory.join(
            &room_id(room),
            &connection(connection_id),
            Timestamp::new(1000),
            resolve_as_username,
        )
    }

    fn names(usernames: &[Username]) -> Vec<&str> {
        usernames.iter().map(|u| u.as_str()).collect()
    }

    #[test]
    fn test_join_creates_room_lazily() {
        // テスト項目: 未知のルームへの join でルームが作成される
        // given (前提条件):
        let mut directory = RoomDirectory::new();

        // when (操作):
        let participants = directory.join(
            &room_id("r1"),
            &connection("alice"),
            Timestamp::new(1000),
            resolve_as_username,
        );

        // then (期待する結果):
        assert!(directory.contains(&room_id("r1")));
        assert_eq!(names(&participants), vec!["alice"]);
    }

    #[test]
    fn test_join_is_idempotent() {
        // テスト項目: 同じ接続の二重 join で参加者が重複しない
        // given (前提条件):
        let mut directory = RoomDirectory::new();
        join(&mut directory, "r1", "alice");

        // when (操作):
        let participants = directory.join(
            &room_id("r1"),
            &connection("alice"),
            Timestamp::new(2000),
            resolve_as_username,
        );

        // then (期待する結果):
        assert_eq!(names(&participants), vec!["alice"]);
        assert_eq!(directory.connections(&room_id("r1")).len(), 1);
    }

    #[test]
    fn test_join_skips_unresolvable_connections() {
        // テスト項目: ユーザー名を解決できない接続はスナップショットから除外される
        // given (前提条件):
        let mut directory = RoomDirectory::new();

        // when (操作):
        let participants = directory.join(
            &room_id("r1"),
            &connection("ghost"),
            Timestamp::new(1000),
            |_| None,
        );

        // then (期待する結果):
        assert!(participants.is_empty());
        assert_eq!(directory.connections(&room_id("r1")).len(), 1);
    }

    #[test]
    fn test_leave_last_participant_removes_room() {
        // テスト項目: 最後の参加者が抜けるとルームが削除される
        // given (前提条件):
        let mut directory = RoomDirectory::new();
        join(&mut directory, "solo", "x");

        // when (操作):
        let result = directory.leave(&room_id("solo"), &connection("x"), resolve_as_username);

        // then (期待する結果):
        assert!(result.room_removed);
        assert!(result.participants.is_empty());
        assert!(directory.list_rooms().is_empty());
        assert!(directory.snapshot(&room_id("solo"), resolve_as_username).is_none());
    }

    #[test]
    fn test_leave_keeps_room_with_remaining_participants() {
        // テスト項目: 参加者が残っていればルームは維持され、残りの参加者が返される
        // given (前提条件):
        let mut directory = RoomDirectory::new();
        join(&mut directory, "r1", "alice");
        join(&mut directory, "r1", "bob");

        // when (操作):
        let result = directory.leave(&room_id("r1"), &connection("alice"), resolve_as_username);

        // then (期待する結果):
        assert!(!result.room_removed);
        assert_eq!(names(&result.participants), vec!["bob"]);
    }

    #[test]
    fn test_leave_unknown_room_is_noop() {
        // テスト項目: 存在しないルームからの leave は no-op
        // given (前提条件):
        let mut directory = RoomDirectory::new();

        // when (操作):
        let result = directory.leave(
            &room_id("nowhere"),
            &connection("alice"),
            resolve_as_username,
        );

        // then (期待する結果):
        assert_eq!(result, LeaveResult::default());
    }

    #[test]
    fn test_leave_by_non_participant_is_noop() {
        // テスト項目: 参加していない接続の leave はルームに影響しない
        // given (前提条件):
        let mut directory = RoomDirectory::new();
        join(&mut directory, "r1", "alice");

        // when (操作):
        let result = directory.leave(
            &room_id("r1"),
            &connection("mallory"),
            resolve_as_username,
        );

        // then (期待する結果):
        assert_eq!(result, LeaveResult::default());
        assert!(directory.contains(&room_id("r1")));
    }

    #[test]
    fn test_append_message_to_missing_room_returns_sentinel() {
        // テスト項目: 存在しないルームへの追記は RoomNotFound を返す
        // given (前提条件):
        let mut directory = RoomDirectory::new();

        // when (操作):
        let outcome = directory.append_message(&room_id("r1"), message("alice", "hi"));

        // then (期待する結果):
        assert_eq!(outcome, AppendOutcome::RoomNotFound);
        assert!(directory.is_empty());
    }

    #[test]
    fn test_append_message_preserves_arrival_order() {
        // テスト項目: メッセージは到着順に追記され、件数が返される
        // given (前提条件):
        let mut directory = RoomDirectory::new();
        join(&mut directory, "r1", "alice");

        // when (操作):
        let first = directory.append_message(&room_id("r1"), message("alice", "one"));
        let second = directory.append_message(&room_id("r1"), message("alice", "two"));

        // then (期待する結果):
        assert_eq!(first, AppendOutcome::Appended { count: 1 });
        assert_eq!(second, AppendOutcome::Appended { count: 2 });
        let texts: Vec<String> = directory
            .messages(&room_id("r1"))
            .into_iter()
            .map(|m| m.text.into_string())
            .collect();
        assert_eq!(texts, vec!["one", "two"]);
    }

    #[test]
    fn test_list_rooms_reports_counts() {
        // テスト項目: ルーム一覧に参加者数とメッセージ数が含まれる
        // given (前提条件):
        let mut directory = RoomDirectory::new();
        join(&mut directory, "r1", "alice");
        join(&mut directory, "r1", "bob");
        join(&mut directory, "r2", "carol");
        directory.append_message(&room_id("r1"), message("alice", "hi"));

        // when (操作):
        let mut rooms = directory.list_rooms();
        rooms.sort_by(|a, b| a.room_id.cmp(&b.room_id));

        // then (期待する結果):
        assert_eq!(
            rooms,
            vec![
                RoomSummary {
                    room_id: room_id("r1"),
                    participant_count: 2,
                    message_count: 1,
                },
                RoomSummary {
                    room_id: room_id("r2"),
                    participant_count: 1,
                    message_count: 0,
                },
            ]
        );
    }

    #[test]
    fn test_snapshot_returns_messages_and_participants() {
        // テスト項目: スナップショットに履歴と参加者が含まれる
        // given (前提条件):
        let mut directory = RoomDirectory::new();
        join(&mut directory, "r1", "alice");
        directory.append_message(&room_id("r1"), message("alice", "hello"));

        // when (操作):
        let snapshot = directory.snapshot(&room_id("r1"), resolve_as_username).unwrap();

        // then (期待する結果):
        assert_eq!(snapshot.room_id, room_id("r1"));
        assert_eq!(snapshot.created_at, Timestamp::new(1000));
        assert_eq!(snapshot.messages.len(), 1);
        assert_eq!(names(&snapshot.participants), vec!["alice"]);
    }
}
