//! UseCase: ルーム詳細の取得

use crate::domain::{RoomId, RoomSnapshot};

use super::{Coordinator, error::GetRoomSnapshotError};

/// ルーム詳細取得のユースケース
pub struct GetRoomSnapshotUseCase {
    coordinator: Coordinator,
}

impl GetRoomSnapshotUseCase {
    pub fn new(coordinator: Coordinator) -> Self {
        Self { coordinator }
    }

    /// ルームのメッセージログと参加者を返す
    ///
    /// ルーム ID として不正な文字列は、存在しないルームとして扱う。
    pub async fn execute(&self, room_id: String) -> Result<RoomSnapshot, GetRoomSnapshotError> {
        let room_id = RoomId::new(room_id).map_err(|_| GetRoomSnapshotError::RoomNotFound)?;
        self.coordinator
            .lock()
            .await
            .snapshot(&room_id)
            .ok_or(GetRoomSnapshotError::RoomNotFound)
    }
}
