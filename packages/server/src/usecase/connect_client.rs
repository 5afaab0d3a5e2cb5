//! UseCase: クライアント接続処理

use std::sync::Arc;

use crate::domain::{Broadcaster, ConnectionId, PusherChannel};

/// クライアント接続のユースケース
///
/// 接続 ID を払い出し、送信チャンネルを Broadcaster に登録する。
/// ルームへの参加は `JoinRoomUseCase` が行う。
pub struct ConnectClientUseCase {
    broadcaster: Arc<dyn Broadcaster>,
}

impl ConnectClientUseCase {
    pub fn new(broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self { broadcaster }
    }

    /// 接続を登録し、払い出した接続 ID を返す
    pub async fn execute(&self, sender: PusherChannel) -> ConnectionId {
        let connection_id = ConnectionId::generate();
        self.broadcaster
            .register_connection(connection_id.clone(), sender)
            .await;
        connection_id
    }
}
