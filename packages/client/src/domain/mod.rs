//! Domain layer for the Roomlink client.
//!
//! Value objects, the chat session state machine, and the ports (traits)
//! that the infrastructure layer implements: the real-time channel, the
//! registration gateway, and the two views.

pub mod entity;
pub mod error;
pub mod port;
pub mod value_object;

pub use entity::{
    Banner, BannerKind, ChatEvent, ChatSession, LineKind, OutboundEvent, Registration,
    SessionState, SubmitOutcome, TranscriptLine,
};
pub use error::{ChannelError, GatewayError, SessionError, ValueObjectError, ViewError};
pub use port::{ChatChannel, ChatView, FormView, RegistrationGateway};
pub use value_object::{ChatText, EmailAddress, Identity, PersonName, RoomName, Timestamp};
