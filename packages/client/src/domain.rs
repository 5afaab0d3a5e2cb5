//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use crate::error::ClientError;

/// A line typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// `/rooms`
    ListRooms,
    /// `/leave`
    Leave,
    /// `/typing`
    StartTyping,
    /// `/stop-typing`
    StopTyping,
    /// Anything else is sent as a chat message
    Message(String),
}

/// Interpret one input line.
///
/// Unknown slash commands are sent as plain messages, so `/shrug` still works.
pub fn parse_input(line: &str) -> InputCommand {
    match line.trim() {
        "/rooms" => InputCommand::ListRooms,
        "/leave" => InputCommand::Leave,
        "/typing" => InputCommand::StartTyping,
        "/stop-typing" => InputCommand::StopTyping,
        _ => InputCommand::Message(line.to_string()),
    }
}

/// Validate the server URL before any connection attempt.
///
/// Only `ws://` and `wss://` are accepted; retrying cannot fix anything else.
pub fn validate_server_url(url: &str) -> Result<(), ClientError> {
    if url.starts_with("ws://") || url.starts_with("wss://") {
        Ok(())
    } else {
        Err(ClientError::InvalidUrl(url.to_string()))
    }
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(current_attempt: u32, max_attempts: u32) -> bool {
    current_attempt < max_attempts
}

/// Usernames currently typing in the room, in the order they started
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypingTracker {
    typing: Vec<String>,
}

impl TypingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a typing signal. Returns `true` if the set changed
    pub fn update(&mut self, username: &str, is_typing: bool) -> bool {
        let position = self.typing.iter().position(|name| name == username);
        match (is_typing, position) {
            (true, None) => {
                self.typing.push(username.to_string());
                true
            }
            (false, Some(index)) => {
                self.typing.remove(index);
                true
            }
            _ => false,
        }
    }

    /// Forget a user, e.g. after they sent a message or left
    pub fn remove(&mut self, username: &str) -> bool {
        self.update(username, false)
    }

    pub fn clear(&mut self) {
        self.typing.clear();
    }

    pub fn usernames(&self) -> &[String] {
        &self.typing
    }
}
