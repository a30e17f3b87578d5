//! Shared utilities for Roomlink packages.

pub mod logger;
pub mod time;
