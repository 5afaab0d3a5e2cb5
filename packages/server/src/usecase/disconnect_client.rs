//! UseCase: クライアント切断処理

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{Broadcaster, ConnectionId, Departure, Timestamp};

use super::{Coordinator, deliver_all, error::UseCaseError};

/// クライアント切断のユースケース
///
/// 送信チャンネルの登録を解除し、参加中のルームがあれば leave と同じ
/// 通知とクリーンアップを行う。2 回呼ばれても 2 回目は no-op。
pub struct DisconnectClientUseCase {
    coordinator: Coordinator,
    broadcaster: Arc<dyn Broadcaster>,
    clock: Arc<dyn Clock>,
}

impl DisconnectClientUseCase {
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

    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Option<Departure>, UseCaseError> {
        let now = Timestamp::new(self.clock.now_millis());

        let mut registry = self.coordinator.lock().await;
        self.broadcaster.unregister_connection(connection_id).await;

        let Some(departure) = registry.disconnect(connection_id, now) else {
            tracing::debug!("Connection '{}' closed without joining a room", connection_id);
            return Ok(None);
        };
        deliver_all(self.broadcaster.as_ref(), &[departure.instruction()]).await?;

        Ok(Some(departure))
    }
}
