//! WebSocket client session management.
//!
//! One session is one WebSocket connection. Every session starts by joining
//! the configured room, so a reconnect re-joins automatically.

use futures_util::{SinkExt, StreamExt};
use hiroba_server::infrastructure::dto::websocket::{ClientEvent, PresenceKindDto, ServerEventDto};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::{
    domain::{InputCommand, TypingTracker, parse_input},
    error::ClientError,
    formatter::MessageFormatter,
    ui::redisplay_prompt,
};

/// Encode a client event as a text frame
fn encode(event: &ClientEvent) -> Result<Message, ClientError> {
    serde_json::to_string(event)
        .map(|json| Message::Text(json.into()))
        .map_err(|e| ClientError::ConnectionError(e.to_string()))
}

/// Map an input command to the event sent to the server
fn to_client_event(command: InputCommand) -> ClientEvent {
    match command {
        InputCommand::ListRooms => ClientEvent::ListRooms,
        InputCommand::Leave => ClientEvent::Leave,
        InputCommand::StartTyping => ClientEvent::Typing { is_typing: true },
        InputCommand::StopTyping => ClientEvent::Typing { is_typing: false },
        InputCommand::Message(text) => ClientEvent::SendMessage { text },
    }
}

/// Render one server event, updating the typing indicator state.
///
/// Returns `None` when there is nothing to show.
fn render_event(text: &str, username: &str, typing: &mut TypingTracker) -> Option<String> {
    let event = match serde_json::from_str::<ServerEventDto>(text) {
        Ok(event) => event,
        Err(_) => return Some(MessageFormatter::format_raw_message(text)),
    };

    match event {
        ServerEventDto::History {
            room_id,
            messages,
            participants,
        } => {
            typing.clear();
            Some(MessageFormatter::format_history(
                &room_id,
                &messages,
                &participants,
                username,
            ))
        }
        ServerEventDto::Presence {
            kind,
            username: who,
            participants,
            timestamp,
            ..
        } => {
            if kind == PresenceKindDto::Left {
                typing.remove(&who);
            }
            Some(MessageFormatter::format_presence(
                kind,
                &who,
                &participants,
                &timestamp,
            ))
        }
        ServerEventDto::Message(message) => {
            typing.remove(&message.author);
            Some(MessageFormatter::format_message(&message))
        }
        ServerEventDto::Typing {
            username: who,
            is_typing,
        } => {
            if typing.update(&who, is_typing) {
                MessageFormatter::format_typing(typing.usernames())
            } else {
                None
            }
        }
        ServerEventDto::Rooms { rooms } => Some(MessageFormatter::format_rooms(&rooms)),
        ServerEventDto::Error { message, .. } => Some(MessageFormatter::format_error(&message)),
    }
}

/// Run one WebSocket client session
///
/// # Returns
///
/// * `Ok(())` - the user left (`/leave`, Ctrl+C or Ctrl+D)
/// * `Err(ClientError)` - the connection failed or was lost
pub async fn run_client_session(
    url: &str,
    username: &str,
    room_id: &str,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to chat server!");
    println!(
        "\nYou are '{}' in '{}'. Type messages and press Enter to send.\n\
         Commands: /rooms, /typing, /stop-typing, /leave. Press Ctrl+C to exit.\n",
        username, room_id
    );

    let (mut write, mut read) = ws_stream.split();

    let join = ClientEvent::Join {
        username: username.to_string(),
        room_id: room_id.to_string(),
    };
    write
        .send(encode(&join)?)
        .await
        .map_err(|_| ClientError::ConnectionLost)?;

    let mut typing = TypingTracker::new();

    loop {
        tokio::select! {
            frame = read.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    if let Some(output) = render_event(text.as_str(), username, &mut typing) {
                        print!("{}", output);
                        redisplay_prompt(username);
                    }
                }
                Some(Ok(Message::Close(_))) | None => {
                    tracing::info!("Server closed the connection");
                    return Err(ClientError::ConnectionLost);
                }
                Some(Err(e)) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return Err(ClientError::ConnectionLost);
                }
                Some(Ok(_)) => {}
            },
            line = input_rx.recv() => {
                let command = match line {
                    Some(line) => parse_input(&line),
                    // Ctrl+C / Ctrl+D
                    None => InputCommand::Leave,
                };
                let leaving = command == InputCommand::Leave;

                if let Err(e) = write.send(encode(&to_client_event(command))?).await {
                    tracing::warn!("Failed to send message: {}", e);
                    return Err(ClientError::ConnectionLost);
                }

                if leaving {
                    write.close().await.ok();
                    println!("\nLeft '{}'. Bye!", room_id);
                    return Ok(());
                }
            }
        }
    }
}
