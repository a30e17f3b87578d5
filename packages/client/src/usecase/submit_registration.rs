//! UseCase: 登録フォーム送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SubmitRegistrationUseCase::execute() メソッド
//! - 入力検証、ゲートウェイ呼び出し、バナー表示、フォームのリセット
//!
//! ### なぜこのテストが必要か
//! - 検証エラー時にネットワーク呼び出しが発生しないことを保証
//! - サーバーの成功/失敗メッセージがそのままバナーに表示されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：登録成功（フォームがリセットされる）
//! - 異常系：未入力、メール形式不正、サーバーによる拒否、通信エラー
//! - エッジケース：バナーの表示先が存在しない

use std::sync::Arc;

use crate::domain::{
    Banner, FormView, GatewayError, Registration, RegistrationGateway, ValueObjectError,
};

/// 通信・解析エラー時に表示する汎用メッセージ
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred. Please try again later.";

/// 登録フォーム送信の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResult {
    /// 入力検証で拒否した（リクエストは送信していない）
    Invalid(ValueObjectError),
    /// サーバーが登録を受け付けた
    Accepted(String),
    /// サーバーが登録を拒否した
    Refused(String),
    /// 通信または応答の解析に失敗した
    Failed(GatewayError),
}

impl SubmitResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitResult::Accepted(_))
    }
}

/// 登録フォーム送信のユースケース
pub struct SubmitRegistrationUseCase {
    gateway: Arc<dyn RegistrationGateway>,
}

impl SubmitRegistrationUseCase {
    /// 新しい SubmitRegistrationUseCase を作成
    pub fn new(gateway: Arc<dyn RegistrationGateway>) -> Self {
        Self { gateway }
    }

    /// 登録フォーム送信を実行
    ///
    /// # Arguments
    ///
    /// * `view` - バナーとフォームを持つビュー
    /// * `name` - 名前欄の入力（トリム前）
    /// * `email` - メール欄の入力（トリム前）
    pub async fn execute(&self, view: &mut dyn FormView, name: &str, email: &str) -> SubmitResult {
        // 1. 入力検証（失敗時はリクエストを送信しない）
        let registration = match Registration::new(name, email) {
            Ok(registration) => registration,
            Err(e) => {
                tracing::debug!("Registration rejected by validation: {:?}", e);
                render_banner(view, Banner::danger(e.to_string()));
                return SubmitResult::Invalid(e);
            }
        };

        // 2. ゲートウェイ経由で送信
        match self.gateway.submit(&registration).await {
            Ok(outcome) if outcome.success => {
                tracing::info!("Registration accepted for '{}'", registration.email.as_str());
                render_banner(view, Banner::success(outcome.message.clone()));
                view.reset_form();
                SubmitResult::Accepted(outcome.message)
            }
            Ok(outcome) => {
                tracing::info!("Registration refused: {}", outcome.message);
                render_banner(view, Banner::danger(outcome.message.clone()));
                SubmitResult::Refused(outcome.message)
            }
            Err(e) => {
                tracing::error!("Registration failed: {}", e);
                render_banner(view, Banner::danger(GENERIC_FAILURE_MESSAGE));
                SubmitResult::Failed(e)
            }
        }
    }
}

/// バナーを表示する。表示先が無い場合はログに残すだけ。
fn render_banner(view: &mut dyn FormView, banner: Banner) {
    if let Err(e) = view.show_banner(banner) {
        tracing::warn!("Banner not shown: {}", e);
    }
}
