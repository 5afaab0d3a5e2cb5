//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, Uri},
};
use hiroba_shared::time::Clock;

use crate::{
    infrastructure::dto::http::{
        CreateRoomRequestDto, CreateRoomResponseDto, ErrorResponseDto, RoomSnapshotDto,
        RoomSummaryDto,
    },
    ui::state::AppState,
    usecase::GetRoomSnapshotError,
};

type ErrorResponse = (StatusCode, Json<ErrorResponseDto>);

fn error_response(status: StatusCode, message: impl Into<String>) -> ErrorResponse {
    (
        status,
        Json(ErrorResponseDto {
            message: message.into(),
        }),
    )
}

/// Liveness banner for `GET /`
pub async fn root() -> &'static str {
    "Hiroba chat backend is running"
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of active rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.list_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(rooms.iter().map(RoomSummaryDto::from).collect())
}

/// Get room history and participants by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomSnapshotDto>, ErrorResponse> {
    match state.get_room_snapshot_usecase.execute(room_id).await {
        Ok(snapshot) => Ok(Json(RoomSnapshotDto::from_snapshot(
            &snapshot,
            state.utc_offset_minutes,
        ))),
        Err(GetRoomSnapshotError::RoomNotFound) => {
            Err(error_response(StatusCode::NOT_FOUND, "Room not found"))
        }
    }
}

/// Acknowledge a room creation request
///
/// ルームは最初の join で作られるため、ここではコーディネータに触れず
/// `room_<millis>` 形式の ID を返すだけ。
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    request: Option<Json<CreateRoomRequestDto>>,
) -> (StatusCode, Json<CreateRoomResponseDto>) {
    // JSON の Content-Type がなければ空のリクエストとして扱う
    let request = request.map(|Json(request)| request).unwrap_or_default();

    let response = CreateRoomResponseDto {
        message: "Room created successfully".to_string(),
        room_id: format!("room_{}", state.clock.now_millis()),
        name: request.name,
        description: request.description,
    };

    (StatusCode::CREATED, Json(response))
}

/// Fallback for unknown paths
pub async fn not_found(uri: Uri) -> ErrorResponse {
    error_response(StatusCode::NOT_FOUND, format!("Not Found - {}", uri.path()))
}
