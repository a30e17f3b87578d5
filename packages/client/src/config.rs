//! Chat client configuration.
//!
//! The two historical page scripts differ only in where the identity comes
//! from, what the send event is called, which key carries the identity, and
//! whether an unverified status closes the send form. [`ChatConfig`] captures
//! those as options, with [`ChatConfig::classic`] and [`ChatConfig::verified`]
//! reproducing each script.

use clap::ValueEnum;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{Identity, RoomName},
    error::ClientError,
};

/// Where the participant identity is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum IdentitySource {
    /// Supplied directly by the host (the `data-handle` attribute on a page, `--handle` here)
    Attribute,
    /// Read from the query string of the page URL
    Query,
}

/// Name of the outbound event carrying a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SendEvent {
    ChatMessage,
    Message,
}

impl SendEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            SendEvent::ChatMessage => "chat_message",
            SendEvent::Message => "message",
        }
    }
}

/// Payload key under which the identity travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum IdentityKey {
    Handle,
    Username,
}

impl IdentityKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityKey::Handle => "handle",
            IdentityKey::Username => "username",
        }
    }
}

/// Preset selecting one of the two known page variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ChatVariant {
    #[default]
    Classic,
    Verified,
}

/// Chat client options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatConfig {
    pub identity_source: IdentitySource,
    pub send_event: SendEvent,
    pub identity_key: IdentityKey,
    pub verification_gate: bool,
    /// Room used when the host supplies none
    pub default_room: String,
}

impl ChatConfig {
    /// Handle from the host, `chat_message` sends, no verification gate.
    pub fn classic() -> Self {
        Self {
            identity_source: IdentitySource::Attribute,
            send_event: SendEvent::ChatMessage,
            identity_key: IdentityKey::Handle,
            verification_gate: false,
            default_room: crate::domain::value_object::DEFAULT_ROOM_NAME.to_string(),
        }
    }

    /// Username and room from the page URL, `message` sends, verification gate on.
    pub fn verified() -> Self {
        Self {
            identity_source: IdentitySource::Query,
            send_event: SendEvent::Message,
            identity_key: IdentityKey::Username,
            verification_gate: true,
            default_room: crate::domain::value_object::DEFAULT_ROOM_NAME.to_string(),
        }
    }

    pub fn for_variant(variant: ChatVariant) -> Self {
        match variant {
            ChatVariant::Classic => Self::classic(),
            ChatVariant::Verified => Self::verified(),
        }
    }

    /// Resolve the participant identity and room from what the host supplied.
    ///
    /// With [`IdentitySource::Attribute`] the identity is `handle` (empty when
    /// absent) and the room is the default room. With [`IdentitySource::Query`]
    /// both come from the query of `page_url` (`username`, falling back to
    /// `handle`, and `room`); a missing page URL yields an empty identity.
    pub fn resolve_identity(
        &self,
        handle: Option<&str>,
        page_url: Option<&str>,
    ) -> Result<(Identity, RoomName), ClientError> {
        let (identity, room) = match self.identity_source {
            IdentitySource::Attribute => (handle.unwrap_or_default().to_string(), String::new()),
            IdentitySource::Query => match page_url {
                Some(page_url) => query_identity(page_url)?,
                None => (String::new(), String::new()),
            },
        };

        let room = if room.is_empty() {
            self.default_room.clone()
        } else {
            room
        };
        Ok((Identity::new(identity), RoomName::new(room)))
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::classic()
    }
}

fn query_identity(page_url: &str) -> Result<(String, String), ClientError> {
    let url = Url::parse(page_url).map_err(|e| ClientError::InvalidPageUrl {
        url: page_url.to_string(),
        reason: e.to_string(),
    })?;

    let mut username = None;
    let mut handle = None;
    let mut room = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "username" if username.is_none() => username = Some(value.into_owned()),
            "handle" if handle.is_none() => handle = Some(value.into_owned()),
            "room" if room.is_none() => room = Some(value.into_owned()),
            _ => {}
        }
    }

    Ok((
        username.or(handle).unwrap_or_default(),
        room.unwrap_or_default(),
    ))
}
