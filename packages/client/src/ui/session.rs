//! Chat session controller.
//!
//! Owns the [`ChatSession`] for the lifetime of the page and runs every
//! handler on one task, to completion, in the order events were queued.

use std::{ops::ControlFlow, sync::Arc};

use tokio::sync::mpsc;
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    config::ChatConfig,
    domain::{ChatChannel, ChatSession, ChatView},
    usecase::{JoinError, JoinRoomUseCase, LeaveRoomUseCase, ReceiveEventUseCase, SendMessageUseCase},
};

use super::dispatcher::{ClientEvent, HandlerTable};

pub struct ChatSessionController {
    id: Uuid,
    session: ChatSession,
    view: Box<dyn ChatView>,
    handlers: HandlerTable,
    join: JoinRoomUseCase,
    send: SendMessageUseCase,
    receive: ReceiveEventUseCase,
    leave: LeaveRoomUseCase,
}

impl ChatSessionController {
    pub fn new(
        session: ChatSession,
        channel: Arc<dyn ChatChannel>,
        view: Box<dyn ChatView>,
        config: &ChatConfig,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            session,
            view,
            handlers: HandlerTable::with_defaults(),
            join: JoinRoomUseCase::new(channel.clone()),
            send: SendMessageUseCase::new(channel.clone()),
            receive: ReceiveEventUseCase::new(config.verification_gate),
            leave: LeaveRoomUseCase::new(channel),
        }
    }

    /// Replace the inbound handler table.
    pub fn with_handlers(mut self, handlers: HandlerTable) -> Self {
        self.handlers = handlers;
        self
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    /// Announce presence in the room.
    pub async fn start(&mut self) -> Result<(), JoinError> {
        tracing::info!(session_id = %self.id, "Starting chat session");
        self.join.execute(&mut self.session).await
    }

    /// Handle a single queued event.
    ///
    /// Breaks once the session should end.
    pub async fn handle(&mut self, event: ClientEvent) -> ControlFlow<()> {
        match event {
            ClientEvent::Inbound(frame) => {
                if let Some(event) = self.handlers.decode(frame) {
                    self.receive
                        .execute(&mut self.session, &mut *self.view, event);
                }
                ControlFlow::Continue(())
            }
            ClientEvent::Submit(input) => {
                if let Err(e) = self
                    .send
                    .execute(&self.session, &mut *self.view, input)
                    .await
                {
                    tracing::error!("{}", e);
                }
                ControlFlow::Continue(())
            }
            ClientEvent::Unload => ControlFlow::Break(()),
            ClientEvent::ChannelClosed => {
                tracing::warn!("Channel closed by the server");
                ControlFlow::Break(())
            }
        }
    }

    /// Drain `events` until shutdown is requested or every producer is gone,
    /// then announce leaving.
    ///
    /// Returns the final session.
    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<ClientEvent>) -> ChatSession {
        let span = tracing::info_span!("chat_session", session_id = %self.id);
        async move {
            while let Some(event) = events.recv().await {
                if self.handle(event).await.is_break() {
                    break;
                }
            }
            self.leave.execute(&mut self.session).await;
            self.session
        }
        .instrument(span)
        .await
    }
}
