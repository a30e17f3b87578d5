//! Roomlink client library.
//!
//! A real-time chat-room client (join, send, receive, leave over a WebSocket
//! channel) and a registration-form client (validate, then POST to `/submit`),
//! both rendered to a terminal.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use ui::{run_chat, run_register};
