//! Real-time shared note relay.
//!
//! This library provides the server implementation for a WebSocket-based
//! collaborative note application: each room holds one shared note, edits
//! are relayed to the rest of the room with last-write-wins semantics, and
//! presence/typing events are propagated alongside.

pub mod common;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logger;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::Config;
pub use ui::run_server;
