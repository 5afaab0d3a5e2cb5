//! UseCase: アクティブなルームの一覧

use std::sync::Arc;

use crate::domain::{BroadcastInstruction, Broadcaster, ConnectionId, RoomSummary, ServerEvent};

use super::{Coordinator, deliver_all, error::UseCaseError};

/// ルーム一覧取得のユースケース
///
/// HTTP API からは `execute`、WebSocket の `list_rooms` からは `reply` を使う。
pub struct ListRoomsUseCase {
    coordinator: Coordinator,
    broadcaster: Arc<dyn Broadcaster>,
}

impl ListRoomsUseCase {
    pub fn new(coordinator: Coordinator, broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self {
            coordinator,
            broadcaster,
        }
    }

    /// アクティブなルームの一覧。順序は不定
    pub async fn execute(&self) -> Vec<RoomSummary> {
        self.coordinator.lock().await.list_rooms()
    }

    /// 一覧を呼び出し元の接続にだけ返す
    pub async fn reply(&self, connection_id: &ConnectionId) -> Result<(), UseCaseError> {
        let registry = self.coordinator.lock().await;
        let instruction = BroadcastInstruction::to_connection(
            connection_id.clone(),
            ServerEvent::Rooms {
                rooms: registry.list_rooms(),
            },
        );
        deliver_all(self.broadcaster.as_ref(), &[instruction]).await
    }
}
