//! Ports implemented by the infrastructure layer.
//!
//! The use cases depend on these traits only, never on the WebSocket, HTTP
//! or terminal implementations (依存性の逆転).

use async_trait::async_trait;

use super::{
    entity::{Banner, OutboundEvent, Registration, SubmitOutcome, TranscriptLine},
    error::{ChannelError, GatewayError, ViewError},
};

/// Outbound half of the real-time channel.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatChannel: Send + Sync {
    /// Queue an event for delivery. Delivery itself is not acknowledged.
    async fn emit(&self, event: OutboundEvent) -> Result<(), ChannelError>;
}

/// Endpoint that accepts registration form submissions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationGateway: Send + Sync {
    async fn submit(&self, registration: &Registration) -> Result<SubmitOutcome, GatewayError>;
}

/// Where the chat transcript and send form are rendered.
#[cfg_attr(test, mockall::automock)]
pub trait ChatView: Send {
    fn append_line(&mut self, line: TranscriptLine) -> Result<(), ViewError>;

    fn scroll_to_bottom(&mut self) -> Result<(), ViewError>;

    fn hide_send_form(&mut self) -> Result<(), ViewError>;

    fn clear_input(&mut self);
}

/// Where the registration form and its banner are rendered.
#[cfg_attr(test, mockall::automock)]
pub trait FormView: Send {
    /// Replace whatever banner is currently shown.
    fn show_banner(&mut self, banner: Banner) -> Result<(), ViewError>;

    fn reset_form(&mut self);
}
