//! Outbound room events.
//!
//! Events are queued to each member connection over its delivery channel and
//! serialized to the wire format at the transport edge. Queueing happens
//! under the owning room's lock, so for any one room every member observes
//! the same event order.

/// An event delivered to a member of a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEvent {
    /// Current or updated note content
    NoteUpdated { content: String },
    /// Membership snapshot, sent to a connection when it joins
    RoomUsers { users: Vec<String> },
    /// A member entered the room (delivered to the whole room, joiner included)
    MemberJoined { connection_id: String },
    /// A member left the room (delivered to the membership as of before removal)
    MemberLeft { connection_id: String },
    /// Transient typing signal (delivered to the room minus the typist)
    MemberTyping { connection_id: String },
}
