//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ValueObjectError;

/// Connection identifier value object.
///
/// Represents the identifier bound to one WebSocket stream for its lifetime.
/// The value is supplied by the client at stream establishment and must be
/// unique among concurrently open streams.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// Create a new ConnectionId.
    ///
    /// # Arguments
    ///
    /// * `id` - The connection identifier string
    ///
    /// # Returns
    ///
    /// A Result containing the ConnectionId or an error if validation fails
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::ConnectionIdEmpty);
        }
        let len = id.len();
        if len > 100 {
            return Err(ValueObjectError::ConnectionIdTooLong {
                max: 100,
                actual: len,
            });
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ConnectionId {
    type Error = ValueObjectError;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Room identifier value object.
///
/// Represents the name of a synchronization scope. Rooms are addressed by
/// whatever opaque string clients agree on; there is no server-side
/// allocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(String);

impl RoomId {
    /// Create a new RoomId.
    ///
    /// # Arguments
    ///
    /// * `id` - The room identifier string
    ///
    /// # Returns
    ///
    /// A Result containing the RoomId or an error if validation fails
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::RoomIdEmpty);
        }
        let len = id.len();
        if len > 100 {
            return Err(ValueObjectError::RoomIdTooLong {
                max: 100,
                actual: len,
            });
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = ValueObjectError;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Note content value object.
///
/// Any content is accepted, including the empty string: the relay applies
/// last-write-wins without inspecting the value, so there is no rejection
/// path here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteContent(String);

impl NoteContent {
    /// Create a new NoteContent. Never fails.
    pub fn new(content: String) -> Self {
        Self(content)
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NoteContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timestamp value object.
///
/// Represents a Unix timestamp in milliseconds (JST).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a new Timestamp.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the inner i64 value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_id_new_success() {
        // テスト項目: 有効な接続 ID を作成できる
        // given (前提条件):
        let id = "alice".to_string();

        // when (操作):
        let result = ConnectionId::new(id);

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "alice");
    }

    #[test]
    fn test_connection_id_new_empty_fails() {
        // テスト項目: 空の接続 ID は作成できない
        // given (前提条件):
        let id = "".to_string();

        // when (操作):
        let result = ConnectionId::new(id);

        // then (期待する結果):
        assert!(result.is_err());
        assert_eq!(result.unwrap_err(), ValueObjectError::ConnectionIdEmpty);
    }

    #[test]
    fn test_connection_id_new_too_long_fails() {
        // テスト項目: 101 文字以上の接続 ID は作成できない
        // given (前提条件):
        let id = "a".repeat(101);

        // when (操作):
        let result = ConnectionId::new(id);

        // then (期待する結果):
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::ConnectionIdTooLong {
                max: 100,
                actual: 101
            }
        );
    }

    #[test]
    fn test_connection_id_equality() {
        // テスト項目: 同じ値を持つ ConnectionId は等価
        // given (前提条件):
        let id1 = ConnectionId::new("alice".to_string()).unwrap();
        let id2 = ConnectionId::new("alice".to_string()).unwrap();
        let id3 = ConnectionId::new("bob".to_string()).unwrap();

        // then (期待する結果):
        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_room_id_new_success() {
        // テスト項目: 有効なルーム ID を作成できる
        // given (前提条件):
        let id = "room-1".to_string();

        // when (操作):
        let result = RoomId::new(id);

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "room-1");
    }

    #[test]
    fn test_room_id_new_empty_fails() {
        // テスト項目: 空のルーム ID は作成できない
        // given (前提条件):
        let id = "".to_string();

        // when (操作):
        let result = RoomId::new(id);

        // then (期待する結果):
        assert!(result.is_err());
        assert_eq!(result.unwrap_err(), ValueObjectError::RoomIdEmpty);
    }

    #[test]
    fn test_note_content_accepts_empty() {
        // テスト項目: 空のノート内容も受け付ける（last-write-wins に拒否経路はない）
        // when (操作):
        let content = NoteContent::new("".to_string());

        // then (期待する結果):
        assert!(content.is_empty());
        assert_eq!(content.as_str(), "");
    }

    #[test]
    fn test_note_content_round_trip() {
        // テスト項目: ノート内容が値として保持される
        // given (前提条件):
        let content = NoteContent::new("Hello, world!".to_string());

        // then (期待する結果):
        assert_eq!(content.as_str(), "Hello, world!");
        assert_eq!(content.into_string(), "Hello, world!");
    }

    #[test]
    fn test_timestamp_ordering() {
        // テスト項目: タイムスタンプは順序付けできる
        // given (前提条件):
        let ts1 = Timestamp::new(1000);
        let ts2 = Timestamp::new(2000);

        // then (期待する結果):
        assert!(ts1 < ts2);
        assert!(ts2 > ts1);
    }
}
