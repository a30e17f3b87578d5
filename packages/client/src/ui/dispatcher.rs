//! Event queue items and the inbound handler table.
//!
//! Everything that can happen to a chat session (a frame from the server, a
//! line typed by the user, shutdown) is queued as a [`ClientEvent`] and handled
//! one at a time, in arrival order, by [`ChatSessionController::run`].
//!
//! [`ChatSessionController::run`]: super::session::ChatSessionController::run

use std::collections::HashMap;

use serde_json::Value;

use crate::{
    domain::ChatEvent,
    infrastructure::dto::channel::{
        ChannelFrame, EVENT_MESSAGE, EVENT_STATUS, MessageData, StatusData,
    },
};

/// One unit of work for the session dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    /// Frame received from the channel
    Inbound(ChannelFrame),
    /// Line submitted on the send form
    Submit(String),
    /// The user is leaving
    Unload,
    /// The server side of the channel went away
    ChannelClosed,
}

type Decoder = Box<dyn Fn(Value) -> Result<ChatEvent, serde_json::Error> + Send + Sync>;

/// Inbound event name -> payload decoder.
pub struct HandlerTable {
    handlers: HashMap<String, Decoder>,
}

impl HandlerTable {
    /// Empty table: every inbound event is ignored.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Table handling `message` and `status`.
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.register(EVENT_MESSAGE, |data| {
            serde_json::from_value::<MessageData>(data).map(ChatEvent::from)
        });
        table.register(EVENT_STATUS, |data| {
            serde_json::from_value::<StatusData>(data).map(ChatEvent::from)
        });
        table
    }

    /// Register (or replace) the decoder for `event`.
    pub fn register<F>(&mut self, event: impl Into<String>, decoder: F)
    where
        F: Fn(Value) -> Result<ChatEvent, serde_json::Error> + Send + Sync + 'static,
    {
        self.handlers.insert(event.into(), Box::new(decoder));
    }

    pub fn handles(&self, event: &str) -> bool {
        self.handlers.contains_key(event)
    }

    /// Decode `frame` with its registered handler.
    ///
    /// Unknown events and undecodable payloads yield `None`.
    pub fn decode(&self, frame: ChannelFrame) -> Option<ChatEvent> {
        let Some(decoder) = self.handlers.get(&frame.event) else {
            tracing::debug!("No handler for inbound event '{}'", frame.event);
            return None;
        };
        match decoder(frame.data) {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::warn!("Failed to decode '{}' payload: {}", frame.event, e);
                None
            }
        }
    }
}

impl Default for HandlerTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn frame(event: &str, data: Value) -> ChannelFrame {
        ChannelFrame {
            event: event.to_string(),
            data,
        }
    }

    #[test]
    fn test_default_table_decodes_message_and_status() {
        // テスト項目: デフォルトのテーブルは message と status を解釈する
        // given (前提条件):
        let table = HandlerTable::with_defaults();

        // when (操作):
        let message = table.decode(frame("message", json!({"handle": "bob", "message": "hi"})));
        let status = table.decode(frame("status", json!({"msg": "bob has entered the room."})));

        // then (期待する結果):
        assert_eq!(
            message,
            Some(ChatEvent::Message {
                sender_label: "bob".to_string(),
                message: "hi".to_string()
            })
        );
        assert_eq!(
            status,
            Some(ChatEvent::Status {
                msg: "bob has entered the room.".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_event_is_ignored() {
        // テスト項目: 未登録のイベントは無視される
        // given (前提条件):
        let table = HandlerTable::with_defaults();

        // when (操作):
        let result = table.decode(frame("typing", json!({"handle": "bob"})));

        // then (期待する結果):
        assert!(result.is_none());
        assert!(!table.handles("typing"));
    }

    #[test]
    fn test_malformed_payload_is_ignored() {
        // テスト項目: 解釈できないペイロードは無視される
        // given (前提条件):
        let table = HandlerTable::with_defaults();

        // when (操作):
        let result = table.decode(frame("status", json!("just a string")));

        // then (期待する結果):
        assert!(result.is_none());
    }

    #[test]
    fn test_register_custom_handler() {
        // テスト項目: 独自のイベントハンドラを登録できる
        // given (前提条件):
        let mut table = HandlerTable::new();
        table.register("announcement", |data| {
            serde_json::from_value::<String>(data).map(|msg| ChatEvent::Status { msg })
        });

        // when (操作):
        let result = table.decode(frame("announcement", json!("maintenance at 10:00")));

        // then (期待する結果):
        assert_eq!(
            result,
            Some(ChatEvent::Status {
                msg: "maintenance at 10:00".to_string()
            })
        );
        assert!(!table.handles("message"));
    }
}
