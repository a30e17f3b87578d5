//! Infrastructure layer: wire DTOs and the port implementations.

pub mod channel;
pub mod dto;
pub mod gateway;
pub mod view;
