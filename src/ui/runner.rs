//! Server bootstrap: routes, middleware, listener.

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header::InvalidHeaderValue},
    routing::get,
};
use thiserror::Error;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::Config,
    domain::RoomRegistry,
    infrastructure::registry::InMemoryRoomRegistry,
    ui::{
        handler::{get_room_detail, get_rooms, health_check, websocket_handler},
        signal::shutdown_signal,
        state::AppState,
    },
};

/// Errors that can stop the server from starting or running
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configured CORS origin is not a valid header value
    #[error("invalid cors origin '{origin}': {source}")]
    InvalidCorsOrigin {
        origin: String,
        source: InvalidHeaderValue,
    },

    /// Binding the listen address failed
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    /// The accept loop failed
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Run the relay server until a shutdown signal arrives.
pub async fn run_server(config: Config) -> Result<(), ServerError> {
    let registry: Arc<dyn RoomRegistry> = Arc::new(InMemoryRoomRegistry::new());
    let state = Arc::new(AppState { registry });

    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .map_err(|source| ServerError::InvalidCorsOrigin {
            origin: config.cors_origin.clone(),
            source,
        })?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST]);

    let app = Router::new()
        .route("/ws", get(websocket_handler))
        .route("/api/health", get(health_check))
        .route("/api/rooms", get(get_rooms))
        .route("/api/rooms/{room_id}", get(get_room_detail))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = config.server_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;

    tracing::info!("Server running on http://{}", addr);
    tracing::info!("WebSocket available at ws://{}/ws", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
