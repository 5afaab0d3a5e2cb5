//! Broadcaster trait 定義
//!
//! コアが計算した配送指示を実際の接続に届けるためのインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{BroadcastError, BroadcastInstruction, ConnectionId};

/// 接続ごとの送信チャンネル（エンコード済みのイベントを運ぶ）
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Broadcaster trait
///
/// ## 配送の順序
///
/// `deliver` は呼び出し順にキューへ積むだけで、ネットワーク I/O を待たない。
/// UseCase 層はコーディネータのロックを保持したまま `deliver` を呼ぶため、
/// 同じルームのイベントは全ての受信者に同じ順序で届く。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Broadcaster: Send + Sync {
    /// 接続の送信チャンネルを登録
    async fn register_connection(&self, connection_id: ConnectionId, channel: PusherChannel);

    /// 接続の送信チャンネルを登録解除
    async fn unregister_connection(&self, connection_id: &ConnectionId);

    /// 配送指示に従ってイベントを届ける
    ///
    /// 宛先の一部に届かなくても配送全体は失敗としない。
    async fn deliver(&self, instruction: &BroadcastInstruction) -> Result<(), BroadcastError>;
}
