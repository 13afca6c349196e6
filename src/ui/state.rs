//! Server state and connection management.

use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::domain::{RoomEvent, RoomRegistry, Timestamp};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub connection_id: String,
}

/// Client connection information
#[derive(Debug, Clone)]
pub struct ClientInfo {
    /// Event delivery channel; the send loop serializes to the wire
    pub sender: mpsc::UnboundedSender<RoomEvent>,
    /// Unix timestamp when connected (in JST, milliseconds)
    pub connected_at: Timestamp,
}

/// Shared application state
pub struct AppState {
    /// Registry（リレー状態とイベント配送の抽象化）
    pub registry: Arc<dyn RoomRegistry>,
}
