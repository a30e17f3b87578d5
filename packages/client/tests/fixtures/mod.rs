//! In-process test server for integration tests.
//!
//! Serves `POST /submit` and a WebSocket endpoint at `/ws` on an ephemeral
//! port, recording what clients send.

#![allow(dead_code)]

use std::{
    io::Write,
    net::SocketAddr,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{
    Form, Json, Router,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Email the fixture reports as already registered
pub const TAKEN_EMAIL: &str = "taken@example.com";
/// Email the fixture answers with a non-JSON body
pub const BROKEN_EMAIL: &str = "broken@example.com";

#[derive(Default)]
struct Recorded {
    submissions: AtomicUsize,
    frames: Mutex<Vec<Value>>,
    closes: AtomicUsize,
}

pub struct TestServer {
    addr: SocketAddr,
    recorded: Arc<Recorded>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        let recorded = Arc::new(Recorded::default());
        let app = Router::new()
            .route("/submit", post(submit))
            .route("/ws", get(websocket))
            .with_state(recorded.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test server");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });

        Self {
            addr,
            recorded,
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    /// Number of `POST /submit` requests received
    pub fn submissions(&self) -> usize {
        self.recorded.submissions.load(Ordering::SeqCst)
    }

    /// Every channel frame received so far, in order
    pub fn frames(&self) -> Vec<Value> {
        self.recorded.frames.lock().unwrap().clone()
    }

    /// Number of close frames received from clients
    pub fn closes(&self) -> usize {
        self.recorded.closes.load(Ordering::SeqCst)
    }

    /// Event names of [`TestServer::frames`]
    pub fn frame_events(&self) -> Vec<String> {
        self.frames()
            .iter()
            .map(|frame| frame["event"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[derive(Deserialize)]
struct SubmitForm {
    name: String,
    email: String,
}

async fn submit(State(recorded): State<Arc<Recorded>>, Form(form): Form<SubmitForm>) -> Response {
    recorded.submissions.fetch_add(1, Ordering::SeqCst);

    if form.name.is_empty() || form.email.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "message": "Name and email are required"})),
        )
            .into_response();
    }
    match form.email.as_str() {
        TAKEN_EMAIL => (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "message": "Email taken"})),
        )
            .into_response(),
        BROKEN_EMAIL => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response(),
        _ => Json(json!({"success": true, "message": "OK"})).into_response(),
    }
}

async fn websocket(ws: WebSocketUpgrade, State(recorded): State<Arc<Recorded>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, recorded))
}

/// Identity key and value of a client payload
fn identity_of(data: &Value) -> (&'static str, String) {
    for key in ["handle", "username"] {
        if let Some(identity) = data.get(key).and_then(Value::as_str) {
            return (key, identity.to_string());
        }
    }
    ("handle", String::new())
}

async fn handle_socket(mut socket: WebSocket, recorded: Arc<Recorded>) {
    while let Some(Ok(msg)) = socket.recv().await {
        let text = match msg {
            Message::Text(text) => text,
            Message::Close(_) => {
                recorded.closes.fetch_add(1, Ordering::SeqCst);
                break;
            }
            _ => continue,
        };
        let Ok(frame) = serde_json::from_str::<Value>(text.as_str()) else {
            continue;
        };
        recorded.frames.lock().unwrap().push(frame.clone());

        let data = &frame["data"];
        let (key, identity) = identity_of(data);
        let reply = match frame["event"].as_str() {
            Some("join") if identity.contains("unverified") => Some(json!({
                "event": "status",
                "data": {"msg": format!("{identity} is not verified")}
            })),
            Some("join") => Some(json!({
                "event": "status",
                "data": {"msg": format!("{identity} has entered the room.")}
            })),
            Some("chat_message" | "message") => Some(json!({
                "event": "message",
                "data": {key: identity, "message": data["message"].clone()}
            })),
            _ => None,
        };

        if let Some(reply) = reply {
            if socket
                .send(Message::Text(reply.to_string().into()))
                .await
                .is_err()
            {
                break;
            }
        }
    }
}

/// `Write` sink that can be inspected while a view owns it.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Poll `condition` until it holds, failing the test after five seconds.
pub async fn wait_until(what: &str, condition: impl Fn() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while !condition() {
        if tokio::time::Instant::now() > deadline {
            panic!("Timed out waiting for {what}");
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
