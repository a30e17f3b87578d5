//! UseCase: ルーム退出処理
//!
//! 終了時に `leave { identity, room }` を通知する。通知はベストエフォートで、
//! 失敗してもログに残すだけでエラーにはしない。

use std::sync::Arc;

use crate::domain::{ChatChannel, ChatSession, OutboundEvent};

/// ルーム退出のユースケース
pub struct LeaveRoomUseCase {
    channel: Arc<dyn ChatChannel>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(channel: Arc<dyn ChatChannel>) -> Self {
        Self { channel }
    }

    /// ルーム退出を実行
    ///
    /// # Returns
    ///
    /// leave イベントを送信しようとした場合 `true`。未参加・退出済みなら `false`。
    pub async fn execute(&self, session: &mut ChatSession) -> bool {
        if !session.mark_left() {
            tracing::debug!("Session is {:?}, not announcing leave", session.state());
            return false;
        }

        let event = OutboundEvent::Leave {
            identity: session.identity().clone(),
            room: session.room().clone(),
        };
        match self.channel.emit(event).await {
            Ok(()) => tracing::info!(
                "Left room '{}' as '{}'",
                session.room(),
                session.identity()
            ),
            Err(e) => tracing::warn!("Failed to announce leave: {}", e),
        }
        true
    }
}
