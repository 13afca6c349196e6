//! Registry trait: the storage and fan-out abstraction the use cases
//! depend on.
//!
//! Implementations own both relay state (rooms, membership, connected
//! clients) and event delivery. Delivery is part of the contract on purpose:
//! a room mutation and the enqueue of its resulting broadcast must happen
//! atomically with respect to other events for the same room, otherwise two
//! near-simultaneous updates could reach members in an order that disagrees
//! with the final note state.

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use super::{
    entity::Room,
    error::RegistryError,
    event::RoomEvent,
    value_object::{ConnectionId, NoteContent, RoomId, Timestamp},
};
use crate::ui::state::ClientInfo;

/// What a join delivered to the joining connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedRoom {
    /// Note content queued to the joiner, when one has been written
    pub note: Option<String>,
    /// Member ids after the join (sorted), as queued in the member snapshot
    pub users: Vec<String>,
}

/// Result of removing a connection from the room it was in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartedRoom {
    pub room_id: RoomId,
    /// The membership right before removal — the ids the departure
    /// notification was addressed to
    pub members_before: Vec<String>,
}

#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// Register a connection's delivery channel.
    ///
    /// Fails with [`RegistryError::DuplicateConnection`] when another open
    /// stream already uses the id.
    async fn register_connection(
        &self,
        connection_id: ConnectionId,
        sender: UnboundedSender<RoomEvent>,
        connected_at: Timestamp,
    ) -> Result<(), RegistryError>;

    /// Drop a connection's delivery channel.
    async fn unregister_connection(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<(), RegistryError>;

    /// Look up a registered connection.
    async fn get_client_info(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<ClientInfo, RegistryError>;

    /// Join `connection_id` to `room_id`, creating the room on first
    /// reference. Idempotent for an existing member. Under the room's lock:
    /// queues the current note (when written) and the member snapshot to the
    /// joiner, then `MemberJoined` to every member including the joiner.
    async fn join_room(
        &self,
        room_id: RoomId,
        connection_id: ConnectionId,
        joined_at: Timestamp,
    ) -> JoinedRoom;

    /// Remove `connection_id` from the room the reverse index says it is in.
    /// Queues `MemberLeft` to the membership as of before removal (departing
    /// connection included, when still registered) and evicts the room once
    /// its membership drops to zero. Returns None when the connection was in
    /// no room.
    async fn leave_room(&self, connection_id: &ConnectionId) -> Option<DepartedRoom>;

    /// Overwrite the room's note (last write wins; the room is created if
    /// unseen) and queue `NoteUpdated` to every member except `sender`.
    /// Returns the ids the update was queued to.
    async fn set_note(
        &self,
        room_id: RoomId,
        content: NoteContent,
        sender: &ConnectionId,
        written_at: Timestamp,
    ) -> Vec<String>;

    /// Queue `MemberTyping` to every member of `room_id` except `sender`.
    /// Stateless; a no-op for an unseen room. Returns the ids notified.
    async fn notify_typing(&self, room_id: &RoomId, sender: &ConnectionId) -> Vec<String>;

    /// Room the connection is currently joined to, if any.
    async fn room_of(&self, connection_id: &ConnectionId) -> Option<RoomId>;

    /// Snapshot of a single room.
    async fn get_room(&self, room_id: &RoomId) -> Option<Room>;

    /// Snapshot of all live rooms.
    async fn list_rooms(&self) -> Vec<Room>;

    /// Number of registered connections.
    async fn count_connections(&self) -> usize;
}
