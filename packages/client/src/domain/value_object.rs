//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{fmt, sync::LazyLock};

use super::error::ValueObjectError;

/// Room joined when the host does not supply one.
pub const DEFAULT_ROOM_NAME: &str = "general";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Participant identity value object.
///
/// The handle or username a participant is displayed under, taken from the
/// host as-is. An empty identity is allowed: a host that supplies none still
/// gets a session, and the empty string is sent to the channel unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity(String);

impl Identity {
    pub fn new(identity: String) -> Self {
        Self(identity)
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Identity {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Room name value object.
///
/// An empty name falls back to [`DEFAULT_ROOM_NAME`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomName(String);

impl RoomName {
    /// Create a new RoomName, falling back to the default room when `name` is empty.
    pub fn new(name: String) -> Self {
        if name.is_empty() {
            return Self::default();
        }
        Self(name)
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RoomName {
    fn default() -> Self {
        Self(DEFAULT_ROOM_NAME.to_string())
    }
}

impl From<String> for RoomName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outbound chat text value object.
///
/// Rejects input that is empty after trimming. The text itself is kept as typed,
/// surrounding whitespace included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatText(String);

impl ChatText {
    pub fn new(raw: String) -> Result<Self, ValueObjectError> {
        if raw.trim().is_empty() {
            return Err(ValueObjectError::ChatTextBlank);
        }
        Ok(Self(raw))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ChatText {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Registrant name value object (trimmed, non-empty).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName(String);

impl PersonName {
    pub fn new(raw: &str) -> Result<Self, ValueObjectError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(ValueObjectError::RegistrationFieldsMissing);
        }
        Ok(Self(name.to_string()))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Registrant email value object.
///
/// Trimmed, non-empty, and shaped like `local@domain.suffix` where no part
/// contains whitespace or a second `@`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(raw: &str) -> Result<Self, ValueObjectError> {
        let email = raw.trim();
        if email.is_empty() {
            return Err(ValueObjectError::RegistrationFieldsMissing);
        }
        if !EMAIL_RE.is_match(email) {
            return Err(ValueObjectError::EmailInvalid(email.to_string()));
        }
        Ok(Self(email.to_string()))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Timestamp value object.
///
/// Represents a Unix timestamp in milliseconds (JST).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Current time.
    pub fn now() -> Self {
        Self(roomlink_shared::time::get_jst_timestamp())
    }

    /// Get the inner i64 value.
    pub fn value(&self) -> i64 {
        self.0
    }
}
