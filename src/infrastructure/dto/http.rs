//! HTTP API response DTOs for the note relay.

use serde::{Deserialize, Serialize};

/// Room summary for list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub id: String,
    pub users: Vec<String>,
    pub created_at: String, // ISO 8601
}

/// Room detail for detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub id: String,
    pub users: Vec<MemberDetailDto>,
    /// Current note content; null until the first update
    pub note: Option<String>,
    pub created_at: String, // ISO 8601
}

/// Member detail for room detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDetailDto {
    pub connection_id: String,
    pub joined_at: String, // ISO 8601
}
