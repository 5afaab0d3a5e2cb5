//! UseCase: 不正な入力の拒否を呼び出し元に返す

use std::sync::Arc;

use crate::domain::{BroadcastInstruction, Broadcaster, ConnectionId, RejectionCode, ServerEvent};

use super::{deliver_all, error::UseCaseError};

/// 不正な入力を受け取った接続に `error` イベントを返すユースケース
///
/// コーディネータの状態には触れない。
pub struct RejectInputUseCase {
    broadcaster: Arc<dyn Broadcaster>,
}

impl RejectInputUseCase {
    pub fn new(broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self { broadcaster }
    }

    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        reason: String,
    ) -> Result<(), UseCaseError> {
        tracing::debug!("Rejecting input from '{}': {}", connection_id, reason);
        let instruction = BroadcastInstruction::to_connection(
            connection_id.clone(),
            ServerEvent::Rejected {
                code: RejectionCode::Malformed,
                message: reason,
            },
        );
        deliver_all(self.broadcaster.as_ref(), &[instruction]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{BroadcastError, MockBroadcaster},
        infrastructure::broadcaster::WebSocketBroadcaster,
        usecase::test_support::*,
    };

    #[tokio::test]
    async fn test_reject_replies_error_event() {
        // テスト項目: 拒否理由が error イベントとして呼び出し元に届く
        // given (前提条件):
        let broadcaster = Arc::new(WebSocketBroadcaster::new(0));
        let mut rx = register(&broadcaster, "c1").await;
        let usecase = RejectInputUseCase::new(broadcaster);

        // when (操作):
        usecase
            .execute(&connection("c1"), "username cannot be empty".to_string())
            .await
            .unwrap();

        // then (期待する結果):
        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["type"], "error");
        assert_eq!(events[0]["code"], "malformed");
        assert_eq!(events[0]["message"], "username cannot be empty");
    }

    #[tokio::test]
    async fn test_reject_to_closed_connection_fails() {
        // テスト項目: 宛先の接続がなければエラーを返す
        // given (前提条件):
        let mut broadcaster = MockBroadcaster::new();
        broadcaster
            .expect_deliver()
            .times(1)
            .returning(|_| Err(BroadcastError::ConnectionNotFound("c1".to_string())));
        let usecase = RejectInputUseCase::new(Arc::new(broadcaster));

        // when (操作):
        let result = usecase
            .execute(&connection("c1"), "bad".to_string())
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(UseCaseError::BroadcastFailed(_))));
    }
}
