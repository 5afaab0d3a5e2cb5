//! WebSocket connection handlers.
//!
//! 受信したフレームを `ClientEvent` にデコードし、値オブジェクトへの検証を
//! 通ったものだけを UseCase に渡します。不正な入力は呼び出し元にだけ
//! `error` イベントを返し、コーディネータには触れません。

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, MessageText, RoomId, Username, ValueObjectError},
    infrastructure::dto::websocket::ClientEvent,
    ui::state::AppState,
};

/// 検証済みのクライアントからの要求
#[derive(Debug, Clone, PartialEq, Eq)]
enum ClientCommand {
    Join { username: Username, room_id: RoomId },
    SendMessage(MessageText),
    Leave,
    Typing(bool),
    ListRooms,
}

impl TryFrom<ClientEvent> for ClientCommand {
    type Error = ValueObjectError;

    fn try_from(event: ClientEvent) -> Result<Self, Self::Error> {
        Ok(match event {
            ClientEvent::Join { username, room_id } => ClientCommand::Join {
                username: Username::new(username)?,
                room_id: RoomId::new(room_id)?,
            },
            ClientEvent::SendMessage { text } => {
                ClientCommand::SendMessage(MessageText::new(text)?)
            }
            ClientEvent::Leave => ClientCommand::Leave,
            ClientEvent::Typing { is_typing } => ClientCommand::Typing(is_typing),
            ClientEvent::ListRooms => ClientCommand::ListRooms,
        })
    }
}

/// テキストフレームを要求にデコードする。失敗時は拒否理由を返す
fn decode_command(text: &str) -> Result<ClientCommand, String> {
    let event = serde_json::from_str::<ClientEvent>(text)
        .map_err(|e| format!("invalid message: {}", e))?;
    ClientCommand::try_from(event).map_err(|e| e.to_string())
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives events from the rx channel and pushes them to the WebSocket sender.
///
/// Broadcaster はチャンネルに積むだけなので、ソケットへの書き込みはこのタスクだけが行う。
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            if sender.send(Message::Text(payload.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();

    let (tx, rx) = mpsc::unbounded_channel();
    let connection_id = state.connect_client_usecase.execute(tx).await;
    tracing::info!("Connection '{}' opened", connection_id);

    let mut send_task = pusher_loop(rx, sender);

    let recv_state = state.clone();
    let recv_connection_id = connection_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", recv_connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received from '{}': {}", recv_connection_id, text.as_str());
                    handle_text(&recv_state, &recv_connection_id, text.as_str()).await;
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", recv_connection_id);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    match state
        .disconnect_client_usecase
        .execute(&connection_id)
        .await
    {
        Ok(Some(departure)) => tracing::info!(
            "Connection '{}' closed, left room '{}'",
            connection_id,
            departure.room_id
        ),
        Ok(None) => tracing::info!("Connection '{}' closed", connection_id),
        Err(e) => tracing::warn!("Failed to notify disconnect of '{}': {}", connection_id, e),
    }
}

async fn handle_text(state: &AppState, connection_id: &ConnectionId, text: &str) {
    let command = match decode_command(text) {
        Ok(command) => command,
        Err(reason) => {
            tracing::warn!("Malformed input from '{}': {}", connection_id, reason);
            if let Err(e) = state
                .reject_input_usecase
                .execute(connection_id, reason)
                .await
            {
                tracing::warn!("Failed to reply error to '{}': {}", connection_id, e);
            }
            return;
        }
    };

    let result = match command {
        ClientCommand::Join { username, room_id } => state
            .join_room_usecase
            .execute(connection_id.clone(), username, room_id)
            .await
            .map(|_| ()),
        ClientCommand::SendMessage(text) => state
            .send_message_usecase
            .execute(connection_id, text)
            .await
            .map(|_| ()),
        ClientCommand::Leave => state
            .leave_room_usecase
            .execute(connection_id)
            .await
            .map(|_| ()),
        ClientCommand::Typing(is_typing) => state
            .notify_typing_usecase
            .execute(connection_id, is_typing)
            .await
            .map(|_| ()),
        ClientCommand::ListRooms => state.list_rooms_usecase.reply(connection_id).await,
    };

    if let Err(e) = result {
        tracing::warn!("Failed to handle event from '{}': {}", connection_id, e);
    }
}
