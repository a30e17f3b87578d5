//! Registration form integration tests.
//!
//! Submits through the real HTTP gateway to the fixture `/submit` endpoint.

mod fixtures;
use fixtures::{BROKEN_EMAIL, SharedBuffer, TAKEN_EMAIL, TestServer};

use std::sync::Arc;

use roomlink_client::{
    domain::{Banner, GatewayError},
    infrastructure::{
        gateway::HttpRegistrationGateway,
        view::{TerminalFormView, terminal::FormFields},
    },
    ui::RegisterOptions,
    usecase::{SubmitRegistrationUseCase, SubmitResult},
};

fn usecase_for(base_url: &str) -> SubmitRegistrationUseCase {
    let gateway = HttpRegistrationGateway::new(base_url).expect("Invalid base URL");
    SubmitRegistrationUseCase::new(Arc::new(gateway))
}

fn filled_view(name: &str, email: &str) -> (TerminalFormView<SharedBuffer>, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let mut view = TerminalFormView::new(Some(buffer.clone()), false);
    view.fields = FormFields {
        name: name.to_string(),
        email: email.to_string(),
    };
    (view, buffer)
}

#[tokio::test]
async fn test_register_success() {
    // テスト項目: 登録成功時に成功バナーが表示され、フォームがリセットされる
    // given (前提条件):
    let server = TestServer::start().await;
    let usecase = usecase_for(&server.base_url());
    let (mut view, buffer) = filled_view("Alice", "alice@example.com");

    // when (操作):
    let result = usecase
        .execute(&mut view, "Alice", "alice@example.com")
        .await;

    // then (期待する結果):
    assert_eq!(result, SubmitResult::Accepted("OK".to_string()));
    assert_eq!(view.banner(), Some(&Banner::success("OK")));
    assert_eq!(view.fields, FormFields::default());
    assert_eq!(buffer.contents(), "[success] OK\n");
    assert_eq!(server.submissions(), 1);
}

#[tokio::test]
async fn test_register_refused_with_error_status() {
    // テスト項目: 400 応答でも JSON のメッセージが危険バナーに表示され、フォームは残る
    // given (前提条件):
    let server = TestServer::start().await;
    let usecase = usecase_for(&server.base_url());
    let (mut view, buffer) = filled_view("Alice", TAKEN_EMAIL);

    // when (操作):
    let result = usecase.execute(&mut view, "Alice", TAKEN_EMAIL).await;

    // then (期待する結果):
    assert_eq!(result, SubmitResult::Refused("Email taken".to_string()));
    assert_eq!(view.banner(), Some(&Banner::danger("Email taken")));
    assert_eq!(view.fields.email, TAKEN_EMAIL);
    assert_eq!(buffer.contents(), "[danger] Email taken\n");
}

#[tokio::test]
async fn test_register_invalid_input_sends_nothing() {
    // テスト項目: 入力検証で拒否された場合、サーバーにリクエストが届かない
    // given (前提条件):
    let server = TestServer::start().await;
    let usecase = usecase_for(&server.base_url());
    let (mut view, _buffer) = filled_view("", "");

    // when (操作):
    let missing = usecase.execute(&mut view, "  ", "alice@example.com").await;
    let malformed = usecase.execute(&mut view, "Alice", "alice.example.com").await;

    // then (期待する結果):
    assert!(matches!(missing, SubmitResult::Invalid(_)));
    assert!(matches!(malformed, SubmitResult::Invalid(_)));
    assert_eq!(
        view.banner(),
        Some(&Banner::danger("Please enter a valid email address"))
    );
    assert_eq!(server.submissions(), 0);
}

#[tokio::test]
async fn test_register_undecodable_response() {
    // テスト項目: JSON でない応答は汎用エラーのバナーになる
    // given (前提条件):
    let server = TestServer::start().await;
    let usecase = usecase_for(&server.base_url());
    let (mut view, _buffer) = filled_view("Alice", BROKEN_EMAIL);

    // when (操作):
    let result = usecase.execute(&mut view, "Alice", BROKEN_EMAIL).await;

    // then (期待する結果):
    assert!(matches!(result, SubmitResult::Failed(GatewayError::Decode(_))));
    assert_eq!(
        view.banner(),
        Some(&Banner::danger("An error occurred. Please try again later."))
    );
}

#[tokio::test]
async fn test_register_server_unreachable() {
    // テスト項目: サーバーに接続できない場合は汎用エラーのバナーになる
    // given (前提条件):
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let usecase = usecase_for(&format!("http://{addr}"));
    let (mut view, _buffer) = filled_view("Alice", "alice@example.com");

    // when (操作):
    let result = usecase
        .execute(&mut view, "Alice", "alice@example.com")
        .await;

    // then (期待する結果):
    assert!(matches!(
        result,
        SubmitResult::Failed(GatewayError::Transport(_))
    ));
    assert_eq!(view.fields.name, "Alice");
}

#[tokio::test]
async fn test_run_register_one_shot() {
    // テスト項目: 名前とメールを指定した場合は一度だけ送信して結果を返す
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let result = roomlink_client::run_register(RegisterOptions {
        base_url: server.base_url(),
        name: Some("Alice".to_string()),
        email: Some("alice@example.com".to_string()),
        styled: false,
    })
    .await
    .expect("run_register failed");

    // then (期待する結果):
    assert_eq!(result, Some(SubmitResult::Accepted("OK".to_string())));
    assert_eq!(server.submissions(), 1);
}
