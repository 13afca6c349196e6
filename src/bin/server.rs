//! Real-time shared note relay server.
//!
//! Relays note edits, presence and typing events between the members of a
//! room over WebSocket.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin server
//! ```

use fusen_rs::{Config, logger::setup_logger};

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger("fusen_rs", "debug");

    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load configuration: {} -- using defaults", e);
        Config::default()
    });

    // Run the server
    if let Err(e) = fusen_rs::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
