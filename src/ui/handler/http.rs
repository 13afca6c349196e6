//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    common::time::timestamp_to_jst_rfc3339,
    domain::RoomId,
    infrastructure::dto::http::{MemberDetailDto, RoomDetailDto, RoomSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of live rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let mut rooms = state.registry.list_rooms().await;
    rooms.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));

    let summaries = rooms
        .iter()
        .map(|room| {
            let mut users: Vec<String> = room
                .members
                .iter()
                .map(|m| m.id.as_str().to_string())
                .collect();
            users.sort();
            RoomSummaryDto {
                id: room.id.as_str().to_string(),
                users,
                created_at: timestamp_to_jst_rfc3339(room.created_at.value()),
            }
        })
        .collect();

    Json(summaries)
}

/// Get room detail by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    let room_id = RoomId::new(room_id).map_err(|_| StatusCode::NOT_FOUND)?;
    let room = state
        .registry
        .get_room(&room_id)
        .await
        .ok_or(StatusCode::NOT_FOUND)?;

    let room_detail = RoomDetailDto {
        id: room.id.as_str().to_string(),
        users: room
            .members
            .iter()
            .map(|m| MemberDetailDto {
                connection_id: m.id.as_str().to_string(),
                joined_at: timestamp_to_jst_rfc3339(m.joined_at.value()),
            })
            .collect(),
        note: room.note.map(|n| n.into_string()),
        created_at: timestamp_to_jst_rfc3339(room.created_at.value()),
    };

    Ok(Json(room_detail))
}
