//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, NoteContent, RoomEvent, RoomId},
    infrastructure::dto::websocket::{ClientEvent, ServerEvent},
    ui::state::{AppState, ConnectQuery},
    usecase::{
        ConnectClientUseCase, DisconnectClientUseCase, JoinRoomUseCase, LeaveRoomUseCase,
        NotifyTypingUseCase, UpdateNoteUseCase,
    },
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let connection_id_str = query.connection_id;

    // Convert String -> ConnectionId (Domain Model)
    let connection_id = match ConnectionId::try_from(connection_id_str.clone()) {
        Ok(id) => id,
        Err(_) => {
            tracing::warn!("Invalid connection_id format: '{}'", connection_id_str);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    // Create a channel for this connection to receive events
    let (tx, rx) = mpsc::unbounded_channel();

    // Use ConnectClientUseCase to handle connection
    let connect_usecase = ConnectClientUseCase::new(state.registry.clone());

    match connect_usecase.execute(connection_id.clone(), tx).await {
        Ok(_) => {
            tracing::info!("Connection '{}' established and registered", connection_id_str);
            Ok(ws.on_upgrade(|socket| handle_socket(socket, state, connection_id, rx)))
        }
        Err(crate::usecase::ConnectError::DuplicateConnectionId(_)) => {
            tracing::warn!(
                "Connection id '{}' is already in use. Rejecting connection.",
                connection_id_str
            );
            Err(StatusCode::CONFLICT)
        }
    }
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    connection_id: ConnectionId,
    mut rx: mpsc::UnboundedReceiver<RoomEvent>,
) {
    let (mut sender, mut receiver) = socket.split();

    let recv_state = state.clone();
    let recv_connection_id = connection_id.clone();

    // Spawn a task to receive events from this connection.
    // Each event is dispatched to completion before the next one is read,
    // so a single connection's events keep their order.
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => match serde_json::from_str::<ClientEvent>(&text) {
                    Ok(event) => dispatch_event(&recv_state, &recv_connection_id, event).await,
                    Err(e) => {
                        tracing::warn!(
                            "Ignoring unparsable event from '{}': {}",
                            recv_connection_id,
                            e
                        );
                    }
                },
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", recv_connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to drain this connection's event channel into the socket
    let mut send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let payload = serde_json::to_string(&ServerEvent::from(event)).unwrap();
            if sender.send(Message::Text(payload.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Stream closure counts as departure, so a silent disconnect does not
    // leak its id into the room's member set.
    let disconnect_usecase = DisconnectClientUseCase::new(state.registry.clone());
    match disconnect_usecase.execute(&connection_id).await {
        Some(departure) => {
            tracing::info!(
                "Connection '{}' disconnected, room '{}' notified",
                connection_id,
                departure.room_id
            );
        }
        None => {
            tracing::info!("Connection '{}' disconnected", connection_id);
        }
    }
}

/// Dispatch one inbound event to its use case. Delivery of the resulting
/// broadcasts happens inside the registry, in per-room order.
async fn dispatch_event(state: &Arc<AppState>, connection_id: &ConnectionId, event: ClientEvent) {
    match event {
        ClientEvent::JoinRoom { room_id } => {
            let room_id = match RoomId::try_from(room_id) {
                Ok(id) => id,
                Err(e) => {
                    tracing::warn!("Ignoring joinRoom from '{}': {}", connection_id, e);
                    return;
                }
            };

            let join_usecase = JoinRoomUseCase::new(state.registry.clone());
            let outcome = join_usecase.execute(room_id.clone(), connection_id.clone()).await;

            if let Some(previous) = outcome.departed_room {
                tracing::info!(
                    "Connection '{}' switched rooms: left '{}'",
                    connection_id,
                    previous
                );
            }
            tracing::info!(
                "Connection '{}' joined room '{}' ({} members)",
                connection_id,
                room_id,
                outcome.users.len()
            );
        }
        ClientEvent::LeaveRoom { room_id } => {
            let leave_usecase = LeaveRoomUseCase::new(state.registry.clone());
            match leave_usecase.execute(connection_id).await {
                Some(departure) => {
                    if departure.room_id.as_str() != room_id {
                        tracing::warn!(
                            "Connection '{}' asked to leave room '{}' but was in '{}'",
                            connection_id,
                            room_id,
                            departure.room_id
                        );
                    }
                    tracing::info!(
                        "Connection '{}' left room '{}'",
                        connection_id,
                        departure.room_id
                    );
                }
                None => {
                    tracing::debug!(
                        "Connection '{}' sent leaveRoom while in no room",
                        connection_id
                    );
                }
            }
        }
        ClientEvent::UpdateNote { room_id, content } => {
            let room_id = match RoomId::try_from(room_id) {
                Ok(id) => id,
                Err(e) => {
                    tracing::warn!("Ignoring updateNote from '{}': {}", connection_id, e);
                    return;
                }
            };

            let update_usecase = UpdateNoteUseCase::new(state.registry.clone());
            let targets = update_usecase
                .execute(room_id.clone(), connection_id, NoteContent::new(content))
                .await;
            tracing::info!(
                "Connection '{}' updated note in room '{}' ({} recipients)",
                connection_id,
                room_id,
                targets.len()
            );
        }
        ClientEvent::UserTyping { room_id } => {
            let room_id = match RoomId::try_from(room_id) {
                Ok(id) => id,
                Err(e) => {
                    tracing::warn!("Ignoring userTyping from '{}': {}", connection_id, e);
                    return;
                }
            };

            let typing_usecase = NotifyTypingUseCase::new(state.registry.clone());
            let targets = typing_usecase.execute(&room_id, connection_id).await;
            tracing::debug!(
                "Connection '{}' typing in room '{}' ({} recipients)",
                connection_id,
                room_id,
                targets.len()
            );
        }
    }
}
