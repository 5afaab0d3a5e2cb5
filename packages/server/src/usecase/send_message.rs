//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - メッセージログへの追記と、送信者を含むルーム全体への配送
//!
//! ### なぜこのテストが必要か
//! - 送信者自身にもメッセージが届くことがクライアントの表示の前提
//! - 未参加の接続からの送信が黙って捨てられることを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージ送信とブロードキャスト
//! - エッジケース：未参加の接続からの送信、他のルームへの漏れ

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{Broadcaster, ConnectionId, MessageText, SentMessage, Timestamp};

use super::{Coordinator, deliver_all, error::UseCaseError};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    coordinator: Coordinator,
    broadcaster: Arc<dyn Broadcaster>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
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

    /// メッセージ送信を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Some(SentMessage))` - 追記して配送した
    /// * `Ok(None)` - 送信者がどのルームにも参加していない（no-op）
    /// * `Err(UseCaseError)` - 配送失敗
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        text: MessageText,
    ) -> Result<Option<SentMessage>, UseCaseError> {
        let now = Timestamp::new(self.clock.now_millis());

        let mut registry = self.coordinator.lock().await;
        let Some(sent) = registry.send(connection_id, text, now) else {
            tracing::debug!(
                "Ignoring message from '{}': not joined to any room",
                connection_id
            );
            return Ok(None);
        };
        deliver_all(self.broadcaster.as_ref(), &[sent.instruction()]).await?;

        Ok(Some(sent))
    }
}
