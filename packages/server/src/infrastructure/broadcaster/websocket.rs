//! WebSocket を使った Broadcaster 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - 配送指示のイベントを JSON にエンコードし、宛先のチャンネルに積む
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! 実際のソケットへの書き込みは接続ごとの writer タスクが行うため、
//! `deliver` はチャンネルに積むだけで完了します。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{BroadcastError, BroadcastInstruction, Broadcaster, ConnectionId, PusherChannel},
    infrastructure::dto::websocket::ServerEventDto,
};

/// WebSocket を使った Broadcaster 実装
///
/// ## 使用例
///
/// ```ignore
/// let broadcaster = WebSocketBroadcaster::new(0);
/// broadcaster.register_connection(connection_id, tx).await;
/// broadcaster.deliver(&instruction).await?;
/// ```
pub struct WebSocketBroadcaster {
    /// 接続中のクライアントの送信チャンネル
    connections: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>,
    /// 表示用時刻の UTC オフセット（分）
    utc_offset_minutes: i32,
}

impl WebSocketBroadcaster {
    pub fn new(utc_offset_minutes: i32) -> Self {
        Self {
            connections: Arc::new(Mutex::new(HashMap::new())),
            utc_offset_minutes,
        }
    }

    /// 登録中の接続数
    #[cfg(test)]
    pub(crate) async fn connection_count(&self) -> usize {
        self.connections.lock().await.len()
    }
}

#[async_trait]
impl Broadcaster for WebSocketBroadcaster {
    async fn register_connection(&self, connection_id: ConnectionId, channel: PusherChannel) {
        let mut connections = self.connections.lock().await;
        tracing::debug!("Connection '{}' registered to Broadcaster", connection_id);
        connections.insert(connection_id, channel);
    }

    async fn unregister_connection(&self, connection_id: &ConnectionId) {
        let mut connections = self.connections.lock().await;
        connections.remove(connection_id);
        tracing::debug!("Connection '{}' unregistered from Broadcaster", connection_id);
    }

    async fn deliver(&self, instruction: &BroadcastInstruction) -> Result<(), BroadcastError> {
        if instruction.is_empty() {
            return Ok(());
        }

        let dto = ServerEventDto::from_event(&instruction.event, self.utc_offset_minutes);
        let payload =
            serde_json::to_string(&dto).map_err(|e| BroadcastError::EncodeFailed(e.to_string()))?;

        let connections = self.connections.lock().await;

        // 呼び出し元への直接の応答は、宛先がなければエラー
        if instruction.room_id.is_none() && instruction.recipients.len() == 1 {
            let recipient = &instruction.recipients[0];
            let sender = connections
                .get(recipient)
                .ok_or_else(|| BroadcastError::ConnectionNotFound(recipient.to_string()))?;
            sender
                .send(payload)
                .map_err(|e| BroadcastError::PushFailed(e.to_string()))?;
            tracing::debug!("Pushed event to connection '{}'", recipient);
            return Ok(());
        }

        for recipient in &instruction.recipients {
            match connections.get(recipient) {
                Some(sender) => {
                    // ブロードキャストでは一部の送信失敗を許容
                    if let Err(e) = sender.send(payload.clone()) {
                        tracing::warn!("Failed to push event to connection '{}': {}", recipient, e);
                    } else {
                        tracing::debug!("Broadcasted event to connection '{}'", recipient);
                    }
                }
                None => {
                    tracing::warn!(
                        "Connection '{}' not found during broadcast, skipping",
                        recipient
                    );
                }
            }
        }

        Ok(())
    }
}
