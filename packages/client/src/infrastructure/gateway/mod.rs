//! Registration gateway implementations.

pub mod http;

pub use http::HttpRegistrationGateway;
