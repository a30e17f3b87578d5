//! UI layer: session wiring, event dispatch, and the CLI runners.

pub mod chat;
pub mod dispatcher;
pub mod register;
pub mod session;

pub use chat::{ChatOptions, forward_lines, run_chat, run_session};
pub use dispatcher::{ClientEvent, HandlerTable};
pub use register::{RegisterOptions, run_register};
pub use session::ChatSessionController;
