//! UseCase: ルーム参加処理
//!
//! `join { identity, room }` をチャンネルに通知し、成功したらセッションを Joined に遷移させる。
//! ID が空でもそのまま送信する（ホストが ID を渡さなかった場合の挙動）。

use std::sync::Arc;

use crate::domain::{ChatChannel, ChatSession, OutboundEvent};

use super::error::JoinError;

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    channel: Arc<dyn ChatChannel>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(channel: Arc<dyn ChatChannel>) -> Self {
        Self { channel }
    }

    /// ルーム参加を実行
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 参加通知をキューに積んだ
    /// * `Err(JoinError)` - 既に参加済み、またはチャンネルが閉じている
    pub async fn execute(&self, session: &mut ChatSession) -> Result<(), JoinError> {
        session.ensure_can_join()?;

        if session.identity().is_empty() {
            tracing::warn!("Joining room '{}' without an identity", session.room());
        }

        self.channel
            .emit(OutboundEvent::Join {
                identity: session.identity().clone(),
                room: session.room().clone(),
            })
            .await?;
        session.mark_joined()?;

        tracing::info!(
            "Joined room '{}' as '{}'",
            session.room(),
            session.identity()
        );
        Ok(())
    }
}
