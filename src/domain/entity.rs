//! Core domain models for the note relay.

use super::value_object::{ConnectionId, NoteContent, RoomId, Timestamp};

/// A synchronization scope: one shared note and one membership set.
///
/// Rooms are created implicitly on first reference and hold no history —
/// `note` is a single mutable value overwritten by every update.
#[derive(Debug, Clone)]
pub struct Room {
    /// Room identifier
    pub id: RoomId,
    /// Current note content; None until the first update arrives
    pub note: Option<NoteContent>,
    /// Connections currently joined; insertion keeps set semantics
    pub members: Vec<Member>,
    /// Timestamp when the room was created
    pub created_at: Timestamp,
}

impl Room {
    /// Create a new empty room with the given ID and creation timestamp
    pub fn new(id: RoomId, created_at: Timestamp) -> Self {
        Self {
            id,
            note: None,
            members: Vec::new(),
            created_at,
        }
    }

    /// Add a member to the room.
    ///
    /// Re-adding an existing member is a no-op. Returns whether the
    /// membership set changed.
    pub fn add_member(&mut self, member: Member) -> bool {
        if self.members.iter().any(|m| m.id == member.id) {
            return false;
        }
        self.members.push(member);
        true
    }

    /// Remove a member from the room by ID; no-op when absent.
    /// Returns whether the membership set changed.
    pub fn remove_member(&mut self, member_id: &ConnectionId) -> bool {
        let before = self.members.len();
        self.members.retain(|m| &m.id != member_id);
        self.members.len() != before
    }

    /// Get a member by ID
    pub fn get_member(&self, member_id: &ConnectionId) -> Option<&Member> {
        self.members.iter().find(|m| &m.id == member_id)
    }

    /// Member ids in join order
    pub fn member_ids(&self) -> Vec<ConnectionId> {
        self.members.iter().map(|m| m.id.clone()).collect()
    }

    /// Overwrite the note unconditionally (last write wins)
    pub fn set_note(&mut self, content: NoteContent) {
        self.note = Some(content);
    }

    /// Note to seed a joining member with.
    ///
    /// An empty note counts as not yet written, so a fresh member starts
    /// from a blank editor instead of receiving an empty update.
    pub fn current_note(&self) -> Option<&NoteContent> {
        self.note.as_ref().filter(|n| !n.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// A connection currently associated with a room
#[derive(Debug, Clone)]
pub struct Member {
    /// Member identifier (connection_id)
    pub id: ConnectionId,
    /// Timestamp when the member joined the room
    pub joined_at: Timestamp,
}

impl Member {
    /// Create a new member
    pub fn new(id: ConnectionId, joined_at: Timestamp) -> Self {
        Self { id, joined_at }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: &str) -> Room {
        Room::new(RoomId::new(id.to_string()).unwrap(), Timestamp::new(0))
    }

    fn member(id: &str, joined_at: i64) -> Member {
        Member::new(
            ConnectionId::new(id.to_string()).unwrap(),
            Timestamp::new(joined_at),
        )
    }

    #[test]
    fn test_room_new() {
        // テスト項目: 新しい Room が空の状態で作成される
        // when (操作):
        let room = room("r1");

        // then (期待する結果):
        assert_eq!(room.id.as_str(), "r1");
        assert!(room.note.is_none());
        assert_eq!(room.members.len(), 0);
        assert!(room.is_empty());
    }

    #[test]
    fn test_room_add_member() {
        // テスト項目: メンバーを追加できる
        // given (前提条件):
        let mut room = room("r1");

        // when (操作):
        let changed = room.add_member(member("alice", 1000));

        // then (期待する結果):
        assert!(changed);
        assert_eq!(room.members.len(), 1);
        assert_eq!(room.members[0].id.as_str(), "alice");
    }

    #[test]
    fn test_room_add_member_is_idempotent() {
        // テスト項目: 既存メンバーの再追加は no-op（集合のセマンティクス）
        // given (前提条件):
        let mut room = room("r1");
        room.add_member(member("alice", 1000));

        // when (操作):
        let changed = room.add_member(member("alice", 2000));

        // then (期待する結果):
        assert!(!changed);
        assert_eq!(room.members.len(), 1);
        // 最初の参加時刻が保持される
        assert_eq!(room.members[0].joined_at, Timestamp::new(1000));
    }

    #[test]
    fn test_room_remove_member() {
        // テスト項目: メンバーを削除できる
        // given (前提条件):
        let mut room = room("r1");
        room.add_member(member("alice", 1000));
        room.add_member(member("bob", 2000));

        // when (操作):
        let alice_id = ConnectionId::new("alice".to_string()).unwrap();
        let changed = room.remove_member(&alice_id);

        // then (期待する結果):
        assert!(changed);
        assert_eq!(room.members.len(), 1);
        assert_eq!(room.members[0].id.as_str(), "bob");
    }

    #[test]
    fn test_room_remove_absent_member_is_noop() {
        // テスト項目: 存在しないメンバーの削除は no-op
        // given (前提条件):
        let mut room = room("r1");
        room.add_member(member("alice", 1000));

        // when (操作):
        let bob_id = ConnectionId::new("bob".to_string()).unwrap();
        let changed = room.remove_member(&bob_id);

        // then (期待する結果):
        assert!(!changed);
        assert_eq!(room.members.len(), 1);
    }

    #[test]
    fn test_room_set_note_overwrites() {
        // テスト項目: ノートは無条件に上書きされる（last-write-wins）
        // given (前提条件):
        let mut room = room("r1");

        // when (操作):
        room.set_note(NoteContent::new("hello".to_string()));
        room.set_note(NoteContent::new("hello world".to_string()));

        // then (期待する結果):
        assert_eq!(room.note.as_ref().unwrap().as_str(), "hello world");
    }

    #[test]
    fn test_room_current_note_hides_empty() {
        // テスト項目: 空のノートは未記入として扱われ、参加者に配られない
        // given (前提条件):
        let mut room = room("r1");

        // then (期待する結果): 未記入
        assert!(room.current_note().is_none());

        // when (操作): 空文字で上書き
        room.set_note(NoteContent::new("".to_string()));

        // then (期待する結果): やはり未記入扱い
        assert!(room.current_note().is_none());

        // when (操作): 内容のある上書き
        room.set_note(NoteContent::new("memo".to_string()));

        // then (期待する結果):
        assert_eq!(room.current_note().unwrap().as_str(), "memo");
    }

    #[test]
    fn test_room_get_member() {
        // テスト項目: ID でメンバーを取得できる
        // given (前提条件):
        let mut room = room("r1");
        let alice_id = ConnectionId::new("alice".to_string()).unwrap();
        room.add_member(Member::new(alice_id.clone(), Timestamp::new(1000)));

        // when (操作):
        let found = room.get_member(&alice_id);

        // then (期待する結果):
        assert!(found.is_some());
        assert_eq!(found.unwrap().id, alice_id);
    }
}
