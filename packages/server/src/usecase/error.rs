//! UseCase 層のエラー型

use thiserror::Error;

/// コーディネータ操作の UseCase が返すエラー
///
/// コア自体は失敗しない（not found は no-op）ため、失敗するのは配送のみ。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UseCaseError {
    #[error("Failed to broadcast: {0}")]
    BroadcastFailed(String),
}

/// ルーム詳細取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomSnapshotError {
    #[error("Room not found")]
    RoomNotFound,
}
