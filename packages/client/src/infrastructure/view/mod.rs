//! View implementations.

pub mod terminal;

pub use terminal::{SendForm, TerminalChatView, TerminalFormView};
