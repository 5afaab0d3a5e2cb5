//! Domain layer: the room membership and broadcast coordinator.
//!
//! Everything here is synchronous and performs no I/O. The coordinator
//! computes what must be broadcast and to whom; delivery goes through the
//! [`Broadcaster`] port.

pub mod broadcaster;
pub mod entity;
pub mod error;
pub mod event;
pub mod room_directory;
pub mod session_registry;
pub mod value_object;

pub use broadcaster::{Broadcaster, PusherChannel};
#[cfg(test)]
pub use broadcaster::MockBroadcaster;
pub use entity::{Message, Room, Session};
pub use error::{BroadcastError, ValueObjectError};
pub use event::{BroadcastInstruction, PresenceKind, RejectionCode, ServerEvent};
pub use room_directory::{AppendOutcome, LeaveResult, RoomDirectory, RoomSnapshot, RoomSummary};
pub use session_registry::{Departure, JoinOutcome, SentMessage, SessionRegistry, TypingScope};
pub use value_object::{ConnectionId, MessageId, MessageText, RoomId, Timestamp, Username};
