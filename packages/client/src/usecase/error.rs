//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{ChannelError, SessionError};

/// ルーム参加時のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Failed to announce join: {0}")]
    Channel(#[from] ChannelError),
}

/// メッセージ送信時のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    #[error("Failed to send message: {0}")]
    Channel(#[from] ChannelError),
}
