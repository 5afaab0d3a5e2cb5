//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 参加者への history 送信と、ルーム全体への joined 通知
//!
//! ### なぜこのテストが必要か
//! - 参加時の配送順序（history → joined）はクライアントの表示の前提
//! - 別のルームへの移動で旧ルームに left が届くことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規ルームへの参加、既存ルームへの参加
//! - エッジケース：別のルームへの移動、配送失敗

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{Broadcaster, ConnectionId, JoinOutcome, RoomId, Timestamp, Username};

use super::{Coordinator, deliver_all, error::UseCaseError};

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    coordinator: Coordinator,
    broadcaster: Arc<dyn Broadcaster>,
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
    pub fn new(
        coordinator: Coordinator,
        broadcaster: Arc<dyn Broadcaster>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            coordinator,
            broadcaster,
            clock,
        }
    }

    /// ルーム参加を実行
    ///
    /// 配送が失敗しても参加自体は確定している。エラーは呼び出し側でログに残す。
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        username: Username,
        room_id: RoomId,
    ) -> Result<JoinOutcome, UseCaseError> {
        let now = Timestamp::new(self.clock.now_millis());

        // 配送が終わるまでロックを保持し、ルーム内の順序を保つ
        let mut registry = self.coordinator.lock().await;
        let outcome = registry.join(connection_id, username, room_id, now);
        deliver_all(self.broadcaster.as_ref(), &outcome.instructions()).await?;

        Ok(outcome)
    }
}
