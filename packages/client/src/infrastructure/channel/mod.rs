//! Real-time channel implementations.

pub mod websocket;

pub use websocket::{ChannelTasks, WebSocketChannel};
