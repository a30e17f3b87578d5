//! UseCase: 受信イベントの描画処理
//!
//! チャンネルから届いた `message` / `status` をトランスクリプトに追記し、
//! 末尾までスクロールする。認証ゲートが有効な場合、"not verified" を含む
//! ステータスで送信フォームを一度だけ閉じ、警告を表示する。
//!
//! ビューへの書き込み失敗はログに残して処理を続ける。

use crate::domain::{ChatEvent, ChatSession, ChatView, TranscriptLine, ViewError};

/// 受信イベント描画のユースケース
pub struct ReceiveEventUseCase {
    verification_gate: bool,
}

impl ReceiveEventUseCase {
    /// 新しい ReceiveEventUseCase を作成
    ///
    /// * `verification_gate` - 未認証ステータスで送信フォームを閉じるかどうか
    pub fn new(verification_gate: bool) -> Self {
        Self { verification_gate }
    }

    /// 受信イベントの描画を実行
    pub fn execute(&self, session: &mut ChatSession, view: &mut dyn ChatView, event: ChatEvent) {
        log_view_error("append line", view.append_line(TranscriptLine::from(&event)));

        if self.verification_gate && event.reports_unverified() && session.hide_form() {
            tracing::info!(
                "Participant '{}' is not verified, closing the send form",
                session.identity()
            );
            log_view_error("hide send form", view.hide_send_form());
            log_view_error(
                "append warning",
                view.append_line(TranscriptLine::verification_warning()),
            );
        }

        log_view_error("scroll", view.scroll_to_bottom());
    }
}

fn log_view_error(action: &str, result: Result<(), ViewError>) {
    if let Err(e) = result {
        tracing::warn!("Failed to {}: {}", action, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Identity, LineKind, RoomName, SessionState, entity::VERIFICATION_WARNING,
        port::MockChatView,
    };
    use mockall::Sequence;

    fn joined_session() -> ChatSession {
        let mut session = ChatSession::new(
            Identity::new("alice".to_string()),
            RoomName::default(),
        );
        session.mark_joined().unwrap();
        session
    }

    fn status(msg: &str) -> ChatEvent {
        ChatEvent::Status {
            msg: msg.to_string(),
        }
    }

    #[test]
    fn test_receive_message_appends_line_and_scrolls() {
        // テスト項目: メッセージ受信で "<label>: <text>" の行が1行追加され、末尾にスクロールされる
        // given (前提条件):
        let mut seq = Sequence::new();
        let mut view = MockChatView::new();
        view.expect_append_line()
            .withf(|line| line.kind == LineKind::Message && line.text == "bob: hi")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        view.expect_scroll_to_bottom()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));
        view.expect_hide_send_form().never();
        let usecase = ReceiveEventUseCase::new(true);
        let mut session = joined_session();

        // when (操作):
        usecase.execute(
            &mut session,
            &mut view,
            ChatEvent::Message {
                sender_label: "bob".to_string(),
                message: "hi".to_string(),
            },
        );

        // then (期待する結果): モックの期待値で検証
        assert_eq!(session.state(), SessionState::Joined);
    }

    #[test]
    fn test_receive_status_without_marker_keeps_form() {
        // テスト項目: "not verified" を含まないステータスはフォームの表示を変えない
        // given (前提条件):
        let mut view = MockChatView::new();
        view.expect_append_line()
            .withf(|line| line.kind == LineKind::Status && line.text == "bob has entered the room.")
            .times(1)
            .returning(|_| Ok(()));
        view.expect_scroll_to_bottom().times(1).returning(|| Ok(()));
        view.expect_hide_send_form().never();
        let usecase = ReceiveEventUseCase::new(true);
        let mut session = joined_session();

        // when (操作):
        usecase.execute(&mut session, &mut view, status("bob has entered the room."));

        // then (期待する結果):
        assert!(session.can_send());
    }

    #[test]
    fn test_receive_unverified_status_closes_form_once() {
        // テスト項目: 未認証ステータスでフォームが閉じ、警告は一度だけ追加される
        // given (前提条件):
        let mut view = MockChatView::new();
        view.expect_append_line()
            .withf(|line| line.kind == LineKind::Status)
            .times(2)
            .returning(|_| Ok(()));
        view.expect_append_line()
            .withf(|line| line.kind == LineKind::Warning && line.text == VERIFICATION_WARNING)
            .times(1)
            .returning(|_| Ok(()));
        view.expect_hide_send_form().times(1).returning(|| Ok(()));
        view.expect_scroll_to_bottom().times(2).returning(|| Ok(()));
        let usecase = ReceiveEventUseCase::new(true);
        let mut session = joined_session();

        // when (操作): 未認証ステータスを2回受信
        usecase.execute(&mut session, &mut view, status("alice is not verified"));
        usecase.execute(&mut session, &mut view, status("alice is not verified"));

        // then (期待する結果):
        assert_eq!(session.state(), SessionState::FormHidden);
    }

    #[test]
    fn test_receive_unverified_status_with_gate_disabled() {
        // テスト項目: 認証ゲート無効時は未認証ステータスでもフォームは閉じない
        // given (前提条件):
        let mut view = MockChatView::new();
        view.expect_append_line()
            .withf(|line| line.kind == LineKind::Status)
            .times(1)
            .returning(|_| Ok(()));
        view.expect_scroll_to_bottom().times(1).returning(|| Ok(()));
        view.expect_hide_send_form().never();
        let usecase = ReceiveEventUseCase::new(false);
        let mut session = joined_session();

        // when (操作):
        usecase.execute(&mut session, &mut view, status("alice is not verified"));

        // then (期待する結果):
        assert_eq!(session.state(), SessionState::Joined);
    }

    #[test]
    fn test_receive_view_failure_does_not_abort() {
        // テスト項目: ビューへの書き込みが失敗してもスクロールまで処理が続く
        // given (前提条件):
        let mut view = MockChatView::new();
        view.expect_append_line()
            .times(1)
            .returning(|_| Err(ViewError::Write("broken pipe".to_string())));
        view.expect_scroll_to_bottom().times(1).returning(|| Ok(()));
        let usecase = ReceiveEventUseCase::new(false);
        let mut session = joined_session();

        // when (操作):
        usecase.execute(&mut session, &mut view, status("hello"));

        // then (期待する結果): パニックせずに完了する
        assert_eq!(session.state(), SessionState::Joined);
    }
}
