//! Message formatting utilities for client display.

use hiroba_server::infrastructure::dto::{
    http::RoomSummaryDto,
    websocket::{MessageDto, PresenceKindDto},
};

const RULE: &str = "============================================================";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the history received right after joining a room
    ///
    /// # Arguments
    ///
    /// * `room_id` - The joined room
    /// * `messages` - The room's message log, oldest first
    /// * `participants` - Participants in join order
    /// * `current_username` - The current user's name (to mark as "me")
    pub fn format_history(
        room_id: &str,
        messages: &[MessageDto],
        participants: &[String],
        current_username: &str,
    ) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n\n{}\n", RULE));
        output.push_str(&format!("Room: {}\n", room_id));
        output.push_str("Participants:\n");
        for participant in participants {
            let me_suffix = if participant == current_username {
                " (me)"
            } else {
                ""
            };
            output.push_str(&format!("  {}{}\n", participant, me_suffix));
        }
        output.push_str(&format!("{}\n", RULE));

        if messages.is_empty() {
            output.push_str("(No messages yet)\n");
        } else {
            for message in messages {
                output.push_str(&Self::format_message_line(message));
            }
        }
        output
    }

    /// Format a presence notice (join / leave)
    pub fn format_presence(
        kind: PresenceKindDto,
        username: &str,
        participants: &[String],
        timestamp: &str,
    ) -> String {
        let (mark, verb) = match kind {
            PresenceKindDto::Joined => ('+', "joined"),
            PresenceKindDto::Left => ('-', "left"),
        };
        format!(
            "\n{} {} {} the room at {} ({} online)\n",
            mark,
            username,
            verb,
            timestamp,
            participants.len()
        )
    }

    /// Format a chat message
    pub fn format_message(message: &MessageDto) -> String {
        format!("\n{}", Self::format_message_line(message))
    }

    fn format_message_line(message: &MessageDto) -> String {
        format!(
            "[{}] @{}: {}\n",
            message.timestamp, message.author, message.text
        )
    }

    /// Format the typing indicator
    ///
    /// # Returns
    ///
    /// `None` when nobody is typing
    pub fn format_typing(usernames: &[String]) -> Option<String> {
        let text = match usernames {
            [] => return None,
            [one] => format!("{} is typing", one),
            [first, second] => format!("{} and {} are typing", first, second),
            many => format!("{} people are typing", many.len()),
        };
        Some(format!("\n... {}\n", text))
    }

    /// Format the list of active rooms
    pub fn format_rooms(rooms: &[RoomSummaryDto]) -> String {
        let mut output = String::from("\nActive rooms:\n");
        if rooms.is_empty() {
            output.push_str("(No active rooms)\n");
        }
        for room in rooms {
            output.push_str(&format!(
                "  {} - {} online, {} messages\n",
                room.room_id, room.participant_count, room.message_count
            ));
        }
        output
    }

    /// Format an error reported by the server
    pub fn format_error(message: &str) -> String {
        format!("\n! {}\n", message)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}
