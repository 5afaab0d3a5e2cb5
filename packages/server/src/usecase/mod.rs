//! UseCase layer
//!
//! 各 UseCase はコーディネータ（`SessionRegistry`）のロックを取り、
//! コアの操作が返した配送指示をロックを保持したまま `Broadcaster` に渡します。
//! これにより、同じルームのイベントは全ての参加者に同じ順序で届きます。

mod connect_client;
mod disconnect_client;
mod error;
mod get_room_snapshot;
mod join_room;
mod leave_room;
mod list_rooms;
mod notify_typing;
mod reject_input;
mod send_message;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{BroadcastInstruction, Broadcaster, SessionRegistry};

pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{GetRoomSnapshotError, UseCaseError};
pub use get_room_snapshot::GetRoomSnapshotUseCase;
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use list_rooms::ListRoomsUseCase;
pub use notify_typing::NotifyTypingUseCase;
pub use reject_input::RejectInputUseCase;
pub use send_message::SendMessageUseCase;

/// プロセスに 1 つだけ存在するコーディネータへのハンドル
///
/// 全ての操作はこのロックで直列化される。
pub type Coordinator = Arc<Mutex<SessionRegistry>>;

/// 空のコーディネータを作成
pub fn new_coordinator() -> Coordinator {
    Arc::new(Mutex::new(SessionRegistry::new()))
}

/// 配送指示を順番に全て配送する
///
/// 途中で失敗しても残りの指示は配送し、最初のエラーを返す。
async fn deliver_all(
    broadcaster: &dyn Broadcaster,
    instructions: &[BroadcastInstruction],
) -> Result<(), UseCaseError> {
    let mut first_error = None;
    for instruction in instructions {
        if let Err(e) = broadcaster.deliver(instruction).await {
            tracing::warn!("Failed to deliver event: {}", e);
            first_error.get_or_insert(e);
        }
    }
    match first_error {
        Some(e) => Err(UseCaseError::BroadcastFailed(e.to_string())),
        None => Ok(()),
    }
}
