//! UseCase: 入力中インジケータの通知
//!
//! typing は一時的な状態のため、ログにもルームにも残さない。

use std::sync::Arc;

use crate::domain::{Broadcaster, ConnectionId, TypingScope};

use super::{Coordinator, deliver_all, error::UseCaseError};

/// 入力中インジケータ通知のユースケース
pub struct NotifyTypingUseCase {
    coordinator: Coordinator,
    broadcaster: Arc<dyn Broadcaster>,
}

impl NotifyTypingUseCase {
    pub fn new(coordinator: Coordinator, broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self {
            coordinator,
            broadcaster,
        }
    }

    /// 送信者を除くルームの参加者に typing を配送する。未参加なら `Ok(None)`
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        is_typing: bool,
    ) -> Result<Option<TypingScope>, UseCaseError> {
        let registry = self.coordinator.lock().await;
        let Some(scope) = registry.typing_status(connection_id) else {
            return Ok(None);
        };
        deliver_all(self.broadcaster.as_ref(), &[scope.instruction(is_typing)]).await?;

        Ok(Some(scope))
    }
}
