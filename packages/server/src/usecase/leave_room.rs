//! UseCase: ルーム退出処理

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{Broadcaster, ConnectionId, Departure, Timestamp};

use super::{Coordinator, deliver_all, error::UseCaseError};

/// 明示的なルーム退出のユースケース
///
/// 接続は維持されるため、後で別のルームに参加できる。
pub struct LeaveRoomUseCase {
    coordinator: Coordinator,
    broadcaster: Arc<dyn Broadcaster>,
    clock: Arc<dyn Clock>,
}

impl LeaveRoomUseCase {
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

    /// 退出を実行。参加していなければ `Ok(None)`
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Option<Departure>, UseCaseError> {
        let now = Timestamp::new(self.clock.now_millis());

        let mut registry = self.coordinator.lock().await;
        let Some(departure) = registry.leave(connection_id, now) else {
            return Ok(None);
        };
        deliver_all(self.broadcaster.as_ref(), &[departure.instruction()]).await?;

        Ok(Some(departure))
    }
}
