//! Chat runner: connects, joins, and pumps terminal input and channel frames
//! through a [`ChatSessionController`].

use std::{sync::Arc, thread, time::Duration};

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

use crate::{
    config::ChatConfig,
    domain::ChatSession,
    error::ClientError,
    infrastructure::{
        channel::{ChannelTasks, WebSocketChannel},
        dto::channel::WireFormat,
        view::{SendForm, TerminalChatView},
    },
};

use super::{dispatcher::ClientEvent, session::ChatSessionController};

/// How long queued frames (the `leave` in particular) get to reach the server on exit.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(1);

/// Everything `run_chat` needs to know.
#[derive(Debug, Clone)]
pub struct ChatOptions {
    /// WebSocket URL of the chat server
    pub url: String,
    /// Identity supplied by the host, used with `IdentitySource::Attribute`
    pub handle: Option<String>,
    /// Page URL whose query carries the identity, used with `IdentitySource::Query`
    pub page_url: Option<String>,
    pub config: ChatConfig,
    /// Use ANSI styling in the transcript
    pub styled: bool,
}

/// Run an interactive chat session until the user quits or the server hangs up.
pub async fn run_chat(options: ChatOptions) -> Result<(), ClientError> {
    let ChatOptions {
        url,
        handle,
        page_url,
        config,
        styled,
    } = options;

    let (identity, room) = config.resolve_identity(handle.as_deref(), page_url.as_deref())?;
    let wire = WireFormat::new(config.send_event, config.identity_key);
    let (channel, tasks, mut frames) = WebSocketChannel::connect(&url, wire).await?;

    let (events_tx, events_rx) = mpsc::unbounded_channel();

    // Channel frames
    {
        let events_tx = events_tx.clone();
        tokio::spawn(async move {
            while let Some(frame) = frames.recv().await {
                if events_tx.send(ClientEvent::Inbound(frame)).is_err() {
                    return;
                }
            }
            let _ = events_tx.send(ClientEvent::ChannelClosed);
        });
    }

    // Ctrl-C outside the line editor
    {
        let events_tx = events_tx.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                let _ = events_tx.send(ClientEvent::Unload);
            }
        });
    }

    let view = TerminalChatView::new(std::io::stdout(), styled);
    spawn_line_reader(events_tx, view.send_form(), format!("{}@{}> ", identity, room))?;

    let controller = ChatSessionController::new(
        ChatSession::new(identity, room),
        Arc::new(channel),
        Box::new(view),
        &config,
    );
    let session = run_session(controller, events_rx, tasks).await?;
    tracing::debug!("Session finished in state {:?}", session.state());
    Ok(())
}

/// Join, handle queued events until the session ends, then close the socket.
///
/// The socket is closed on a failed join too.
pub async fn run_session(
    mut controller: ChatSessionController,
    events: mpsc::UnboundedReceiver<ClientEvent>,
    tasks: ChannelTasks,
) -> Result<ChatSession, ClientError> {
    if let Err(e) = controller.start().await {
        tasks.shutdown(SHUTDOWN_TIMEOUT).await;
        return Err(e.into());
    }
    let session = controller.run(events).await;
    tasks.shutdown(SHUTDOWN_TIMEOUT).await;
    Ok(session)
}

/// Read lines on a dedicated thread and queue them as submissions.
///
/// A plain thread rather than `spawn_blocking`: a pending `readline` must not
/// keep the runtime from shutting down.
fn spawn_line_reader(
    events_tx: mpsc::UnboundedSender<ClientEvent>,
    send_form: SendForm,
    prompt: String,
) -> Result<(), ClientError> {
    let mut editor = DefaultEditor::new()?;
    thread::spawn(move || {
        let read_line = || -> Result<String, ReadlineError> {
            let line = editor.readline(&prompt)?;
            if !line.trim().is_empty() {
                let _ = editor.add_history_entry(line.as_str());
            }
            Ok(line)
        };
        forward_lines(read_line, &send_form, &events_tx);
    });
    Ok(())
}

/// Queue lines from `read_line` as [`ClientEvent::Submit`] while `send_form` is open.
///
/// Returns once the form closes, the queue is gone, or input ends. A line
/// finished after the form closed is discarded. End of input and Ctrl-C
/// queue [`ClientEvent::Unload`].
pub fn forward_lines<R>(
    mut read_line: R,
    send_form: &SendForm,
    events_tx: &mpsc::UnboundedSender<ClientEvent>,
) where
    R: FnMut() -> Result<String, ReadlineError>,
{
    while send_form.is_open() {
        match read_line() {
            Ok(line) => {
                if !send_form.is_open() {
                    tracing::debug!("Send form closed, discarding input");
                    break;
                }
                if events_tx.send(ClientEvent::Submit(line)).is_err() {
                    return;
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                let _ = events_tx.send(ClientEvent::Unload);
                return;
            }
            Err(e) => {
                tracing::error!("Failed to read input: {}", e);
                let _ = events_tx.send(ClientEvent::Unload);
                return;
            }
        }
    }
    tracing::info!("Send form closed; input disabled (Ctrl-C to leave)");
}
