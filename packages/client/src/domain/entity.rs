//! Core domain models for the Roomlink client.

use serde::{Deserialize, Serialize};

use super::{
    error::{SessionError, ValueObjectError},
    value_object::{ChatText, EmailAddress, Identity, PersonName, RoomName, Timestamp},
};

/// Substring of a status message that marks the participant as unverified.
pub const NOT_VERIFIED_MARKER: &str = "not verified";

/// Warning shown once the verification gate closes the send form.
pub const VERIFICATION_WARNING: &str =
    "Please verify your email address to send messages. Check your inbox for the verification link.";

/// Lifecycle of a chat session.
///
/// `Idle -> Joined -> [FormHidden] -> Left`. `FormHidden` never returns to
/// `Joined`, and `Left` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Idle,
    Joined,
    FormHidden,
    Left,
}

/// Per-page chat session: who is talking, where, and how far the lifecycle has got.
#[derive(Debug, Clone)]
pub struct ChatSession {
    identity: Identity,
    room: RoomName,
    state: SessionState,
}

impl ChatSession {
    /// Create an idle session for `identity` in `room`.
    pub fn new(identity: Identity, room: RoomName) -> Self {
        Self {
            identity,
            room,
            state: SessionState::Idle,
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn room(&self) -> &RoomName {
        &self.room
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Check that the session may still join.
    ///
    /// # Errors
    ///
    /// `SessionError::AlreadyJoined` unless the session is idle.
    pub fn ensure_can_join(&self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Idle => Ok(()),
            SessionState::Left => Err(SessionError::AlreadyLeft),
            SessionState::Joined | SessionState::FormHidden => {
                Err(SessionError::AlreadyJoined(self.room.as_str().to_string()))
            }
        }
    }

    /// Move `Idle -> Joined`.
    ///
    /// # Errors
    ///
    /// Same as [`ChatSession::ensure_can_join`].
    pub fn mark_joined(&mut self) -> Result<(), SessionError> {
        self.ensure_can_join()?;
        self.state = SessionState::Joined;
        Ok(())
    }

    /// Close the send form. Returns `true` only on the first call while joined.
    pub fn hide_form(&mut self) -> bool {
        if self.state == SessionState::Joined {
            self.state = SessionState::FormHidden;
            true
        } else {
            false
        }
    }

    /// Whether the send form is visible and accepting input.
    pub fn can_send(&self) -> bool {
        self.state == SessionState::Joined
    }

    /// Move to `Left`. Returns `false` if the session never joined or already left.
    pub fn mark_left(&mut self) -> bool {
        match self.state {
            SessionState::Joined | SessionState::FormHidden => {
                self.state = SessionState::Left;
                true
            }
            SessionState::Idle | SessionState::Left => false,
        }
    }
}

/// Event announced to the real-time channel.
///
/// The wire name of `Send` and the key used for the identity are a channel
/// concern, see `infrastructure::dto::channel::WireFormat`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundEvent {
    Join {
        identity: Identity,
        room: RoomName,
    },
    Send {
        identity: Identity,
        room: RoomName,
        message: ChatText,
    },
    Leave {
        identity: Identity,
        room: RoomName,
    },
}

impl OutboundEvent {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            OutboundEvent::Join { .. } => "join",
            OutboundEvent::Send { .. } => "send",
            OutboundEvent::Leave { .. } => "leave",
        }
    }
}

/// Event received from the real-time channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatEvent {
    Message { sender_label: String, message: String },
    Status { msg: String },
}

impl ChatEvent {
    /// Whether this is a status event reporting an unverified participant.
    pub fn reports_unverified(&self) -> bool {
        matches!(self, ChatEvent::Status { msg } if msg.contains(NOT_VERIFIED_MARKER))
    }
}

/// Presentation of a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineKind {
    /// `"<sender>: <text>"`
    Message,
    /// Rendered in italics
    Status,
    /// Persistent verification warning
    Warning,
}

/// One line appended to the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptLine {
    pub kind: LineKind,
    pub text: String,
    pub received_at: Timestamp,
}

impl TranscriptLine {
    pub fn message(sender_label: &str, message: &str) -> Self {
        Self {
            kind: LineKind::Message,
            text: format!("{sender_label}: {message}"),
            received_at: Timestamp::now(),
        }
    }

    pub fn status(msg: &str) -> Self {
        Self {
            kind: LineKind::Status,
            text: msg.to_string(),
            received_at: Timestamp::now(),
        }
    }

    pub fn verification_warning() -> Self {
        Self {
            kind: LineKind::Warning,
            text: VERIFICATION_WARNING.to_string(),
            received_at: Timestamp::now(),
        }
    }
}

impl From<&ChatEvent> for TranscriptLine {
    fn from(event: &ChatEvent) -> Self {
        match event {
            ChatEvent::Message {
                sender_label,
                message,
            } => TranscriptLine::message(sender_label, message),
            ChatEvent::Status { msg } => TranscriptLine::status(msg),
        }
    }
}

/// Tone of a banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BannerKind {
    Success,
    Danger,
}

impl BannerKind {
    /// CSS-style class suffix, e.g. `alert-success`.
    pub fn as_str(&self) -> &'static str {
        match self {
            BannerKind::Success => "success",
            BannerKind::Danger => "danger",
        }
    }
}

/// Outcome of the last user action on the registration form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

impl Banner {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Success,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Danger,
            message: message.into(),
        }
    }
}

/// A validated registration form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub name: PersonName,
    pub email: EmailAddress,
}

impl Registration {
    /// Validate the raw form fields.
    ///
    /// # Errors
    ///
    /// `RegistrationFieldsMissing` if either field is blank (checked first),
    /// otherwise `EmailInvalid` if the email does not match.
    pub fn new(name: &str, email: &str) -> Result<Self, ValueObjectError> {
        if name.trim().is_empty() || email.trim().is_empty() {
            return Err(ValueObjectError::RegistrationFieldsMissing);
        }
        Ok(Self {
            name: PersonName::new(name)?,
            email: EmailAddress::new(email)?,
        })
    }
}

/// Server's answer to a registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOutcome {
    pub success: bool,
    pub message: String,
}
