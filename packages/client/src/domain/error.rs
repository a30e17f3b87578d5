//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// Chat input is empty or whitespace only
    #[error("Chat message cannot be blank")]
    ChatTextBlank,

    /// Name or email left empty on the registration form
    #[error("Please fill in all fields")]
    RegistrationFieldsMissing,

    /// Email does not look like `local@domain.suffix`
    #[error("Please enter a valid email address")]
    EmailInvalid(String),
}

/// Errors related to the chat session lifecycle
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session has already joined room '{0}'")]
    AlreadyJoined(String),

    #[error("Session has already left the room")]
    AlreadyLeft,
}

/// Errors raised by a real-time channel implementation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// The outbound half of the channel is gone
    #[error("Channel is closed")]
    Closed,

    /// Event could not be encoded for the wire
    #[error("Failed to encode channel event: {0}")]
    Encode(String),
}

/// Errors raised by a registration gateway implementation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Request never produced a response
    #[error("Registration request failed: {0}")]
    Transport(String),

    /// Response body was not the expected JSON
    #[error("Registration response could not be decoded: {0}")]
    Decode(String),
}

/// Errors raised by a view
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("Banner container is not available")]
    MissingBannerContainer,

    #[error("Failed to write to the view: {0}")]
    Write(String),
}
