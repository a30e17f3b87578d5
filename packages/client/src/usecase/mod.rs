//! UseCase 層
//!
//! チャットセッションと登録フォームの操作を実装するレイヤー。
//! UI 層から呼び出され、Domain 層のポート（trait）を通じて外部とやり取りします。

pub mod error;
pub mod join_room;
pub mod leave_room;
pub mod receive_event;
pub mod send_message;
pub mod submit_registration;

pub use error::{JoinError, SendMessageError};
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use receive_event::ReceiveEventUseCase;
pub use send_message::{SendMessageUseCase, SendOutcome};
pub use submit_registration::{SubmitRegistrationUseCase, SubmitResult};
