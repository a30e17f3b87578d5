//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 入力テキストの検証、送信イベントの発行、入力欄のクリア
//!
//! ### なぜこのテストが必要か
//! - 空白のみの入力が送信されないことを保証
//! - 送信成功時にだけ入力欄がクリアされることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：テキストの送信
//! - 異常系：チャンネルが閉じている
//! - エッジケース：空白のみの入力、認証ゲートでフォームが閉じた後の入力

use std::sync::Arc;

use crate::domain::{ChatChannel, ChatSession, ChatText, ChatView, OutboundEvent};

use super::error::SendMessageError;

/// 送信処理の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// イベントを送信し、入力欄をクリアした
    Sent,
    /// 空白のみの入力のため破棄した
    Blank,
    /// フォームが表示されていないため破棄した
    FormClosed,
}

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    channel: Arc<dyn ChatChannel>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(channel: Arc<dyn ChatChannel>) -> Self {
        Self { channel }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `session` - 送信元のセッション
    /// * `view` - 入力欄を持つビュー
    /// * `input` - 入力欄のテキスト（トリム前）
    ///
    /// # Returns
    ///
    /// * `Ok(SendOutcome)` - 送信したか、どの理由で破棄したか
    /// * `Err(SendMessageError)` - チャンネルへの送信失敗（入力欄はそのまま）
    pub async fn execute(
        &self,
        session: &ChatSession,
        view: &mut dyn ChatView,
        input: String,
    ) -> Result<SendOutcome, SendMessageError> {
        if !session.can_send() {
            tracing::debug!("Send form is closed ({:?}), dropping input", session.state());
            return Ok(SendOutcome::FormClosed);
        }

        let message = match ChatText::new(input) {
            Ok(message) => message,
            Err(_) => {
                tracing::debug!("Dropping blank chat input");
                return Ok(SendOutcome::Blank);
            }
        };

        self.channel
            .emit(OutboundEvent::Send {
                identity: session.identity().clone(),
                room: session.room().clone(),
                message,
            })
            .await?;

        view.clear_input();
        Ok(SendOutcome::Sent)
    }
}
