//! Data transfer objects for the channel and HTTP wire formats.

pub mod channel;
pub mod http;
