//! Real-time channel frames.
//!
//! Every frame is a JSON text message of the form
//! `{ "event": "<name>", "data": { ... } }`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    config::{IdentityKey, SendEvent},
    domain::{ChannelError, ChatEvent, OutboundEvent},
};

/// Inbound event carrying a chat line
pub const EVENT_MESSAGE: &str = "message";
/// Inbound event carrying a status line
pub const EVENT_STATUS: &str = "status";

/// A named event with its payload, as sent over the socket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelFrame {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

impl ChannelFrame {
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Payload of an inbound `message` event.
///
/// Senders are labelled `handle` by one server generation and `username` by
/// another; both are accepted. Missing fields render as empty strings.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageData {
    #[serde(rename = "handle", alias = "username", default)]
    pub sender_label: String,
    #[serde(default)]
    pub message: String,
}

impl From<MessageData> for ChatEvent {
    fn from(data: MessageData) -> Self {
        ChatEvent::Message {
            sender_label: data.sender_label,
            message: data.message,
        }
    }
}

/// Payload of an inbound `status` event
#[derive(Debug, Clone, Deserialize)]
pub struct StatusData {
    #[serde(default)]
    pub msg: String,
}

impl From<StatusData> for ChatEvent {
    fn from(data: StatusData) -> Self {
        ChatEvent::Status { msg: data.msg }
    }
}

/// Naming used when encoding outbound events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireFormat {
    pub send_event: SendEvent,
    pub identity_key: IdentityKey,
}

impl WireFormat {
    pub fn new(send_event: SendEvent, identity_key: IdentityKey) -> Self {
        Self {
            send_event,
            identity_key,
        }
    }

    /// Event name `event` is announced under.
    pub fn event_name(&self, event: &OutboundEvent) -> &'static str {
        match event {
            OutboundEvent::Join { .. } => "join",
            OutboundEvent::Send { .. } => self.send_event.as_str(),
            OutboundEvent::Leave { .. } => "leave",
        }
    }

    pub fn to_frame(&self, event: &OutboundEvent) -> ChannelFrame {
        let mut data = Map::new();
        let (identity, room) = match event {
            OutboundEvent::Join { identity, room } | OutboundEvent::Leave { identity, room } => {
                (identity, room)
            }
            OutboundEvent::Send {
                identity,
                room,
                message,
            } => {
                data.insert(
                    "message".to_string(),
                    Value::String(message.as_str().to_string()),
                );
                (identity, room)
            }
        };
        data.insert(
            self.identity_key.as_str().to_string(),
            Value::String(identity.as_str().to_string()),
        );
        data.insert("room".to_string(), Value::String(room.as_str().to_string()));

        ChannelFrame {
            event: self.event_name(event).to_string(),
            data: Value::Object(data),
        }
    }

    /// Encode `event` as a JSON text frame.
    pub fn encode(&self, event: &OutboundEvent) -> Result<String, ChannelError> {
        serde_json::to_string(&self.to_frame(event)).map_err(|e| ChannelError::Encode(e.to_string()))
    }
}

impl Default for WireFormat {
    fn default() -> Self {
        Self::new(SendEvent::ChatMessage, IdentityKey::Handle)
    }
}
