//! Shared application state.

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::{
    domain::Broadcaster,
    usecase::{
        ConnectClientUseCase, Coordinator, DisconnectClientUseCase, GetRoomSnapshotUseCase,
        JoinRoomUseCase, LeaveRoomUseCase, ListRoomsUseCase, NotifyTypingUseCase,
        RejectInputUseCase, SendMessageUseCase,
    },
};

/// Shared application state
///
/// ハンドラは UseCase だけに依存し、コーディネータや Broadcaster を直接触らない。
pub struct AppState {
    /// ConnectClientUseCase（接続登録のユースケース）
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// DisconnectClientUseCase（切断のユースケース）
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// JoinRoomUseCase（ルーム参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// LeaveRoomUseCase（ルーム退出のユースケース）
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// NotifyTypingUseCase（入力中通知のユースケース）
    pub notify_typing_usecase: Arc<NotifyTypingUseCase>,
    /// ListRoomsUseCase（ルーム一覧のユースケース）
    pub list_rooms_usecase: Arc<ListRoomsUseCase>,
    /// GetRoomSnapshotUseCase（ルーム詳細のユースケース）
    pub get_room_snapshot_usecase: Arc<GetRoomSnapshotUseCase>,
    /// RejectInputUseCase（不正な入力の拒否）
    pub reject_input_usecase: Arc<RejectInputUseCase>,
    pub clock: Arc<dyn Clock>,
    /// HTTP API の時刻に使う UTC オフセット（分）
    pub utc_offset_minutes: i32,
}

impl AppState {
    /// コーディネータと Broadcaster から全ての UseCase を組み立てる
    pub fn new(
        coordinator: Coordinator,
        broadcaster: Arc<dyn Broadcaster>,
        clock: Arc<dyn Clock>,
        utc_offset_minutes: i32,
    ) -> Self {
        Self {
            connect_client_usecase: Arc::new(ConnectClientUseCase::new(broadcaster.clone())),
            disconnect_client_usecase: Arc::new(DisconnectClientUseCase::new(
                coordinator.clone(),
                broadcaster.clone(),
                clock.clone(),
            )),
            join_room_usecase: Arc::new(JoinRoomUseCase::new(
                coordinator.clone(),
                broadcaster.clone(),
                clock.clone(),
            )),
            send_message_usecase: Arc::new(SendMessageUseCase::new(
                coordinator.clone(),
                broadcaster.clone(),
                clock.clone(),
            )),
            leave_room_usecase: Arc::new(LeaveRoomUseCase::new(
                coordinator.clone(),
                broadcaster.clone(),
                clock.clone(),
            )),
            notify_typing_usecase: Arc::new(NotifyTypingUseCase::new(
                coordinator.clone(),
                broadcaster.clone(),
            )),
            list_rooms_usecase: Arc::new(ListRoomsUseCase::new(
                coordinator.clone(),
                broadcaster.clone(),
            )),
            get_room_snapshot_usecase: Arc::new(GetRoomSnapshotUseCase::new(coordinator)),
            reject_input_usecase: Arc::new(RejectInputUseCase::new(broadcaster)),
            clock,
            utc_offset_minutes,
        }
    }
}
