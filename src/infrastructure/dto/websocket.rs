//! WebSocket event DTOs for the note relay.
//!
//! The `type` tags and field names are the wire vocabulary the display
//! clients speak (`joinRoom`, `noteUpdate`, `userTyping`, ...). Identifier
//! payloads on outbound presence/typing events are stamped by the server
//! from the connection binding, never echoed from client input.

use serde::{Deserialize, Serialize};

use crate::domain::RoomEvent;

/// Events a client may send to the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientEvent {
    /// Enter a room, creating it on first reference
    JoinRoom { room_id: String },
    /// Leave the room this connection is currently in
    LeaveRoom { room_id: String },
    /// Replace the room note with new content (last write wins)
    UpdateNote { room_id: String, content: String },
    /// Transient typing signal, relayed to the rest of the room
    UserTyping { room_id: String },
}

/// Events the relay pushes to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    /// Current or updated note content
    NoteUpdate { content: String },
    /// Member snapshot, sent once at join time
    RoomUsers { users: Vec<String> },
    /// A member entered the room
    UserJoined { connection_id: String },
    /// A member left the room
    UserLeft { connection_id: String },
    /// A member is typing
    UserTyping { connection_id: String },
}

impl From<RoomEvent> for ServerEvent {
    fn from(event: RoomEvent) -> Self {
        match event {
            RoomEvent::NoteUpdated { content } => ServerEvent::NoteUpdate { content },
            RoomEvent::RoomUsers { users } => ServerEvent::RoomUsers { users },
            RoomEvent::MemberJoined { connection_id } => ServerEvent::UserJoined { connection_id },
            RoomEvent::MemberLeft { connection_id } => ServerEvent::UserLeft { connection_id },
            RoomEvent::MemberTyping { connection_id } => ServerEvent::UserTyping { connection_id },
        }
    }
}
