//! WebSocket implementation of [`ChatChannel`].
//!
//! The socket is split into a writer task draining an outbound queue and a
//! reader task that parses inbound frames and hands them to the caller's
//! queue. [`WebSocketChannel::emit`] never awaits the network.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::{
    domain::{ChannelError, ChatChannel, OutboundEvent},
    error::ClientError,
    infrastructure::dto::channel::{ChannelFrame, WireFormat},
};

/// Outbound handle to a connected socket.
pub struct WebSocketChannel {
    outbound: mpsc::UnboundedSender<Message>,
    wire: WireFormat,
}

/// Background tasks owning the two halves of the socket.
pub struct ChannelTasks {
    outbound: mpsc::UnboundedSender<Message>,
    writer: JoinHandle<()>,
    reader: JoinHandle<()>,
}

impl WebSocketChannel {
    /// Connect to `url` and start the reader and writer tasks.
    ///
    /// # Returns
    ///
    /// The channel handle, the tasks (for [`ChannelTasks::shutdown`]), and the
    /// queue of inbound frames in arrival order. The queue closes when the
    /// server closes the socket.
    pub async fn connect(
        url: &str,
        wire: WireFormat,
    ) -> Result<(Self, ChannelTasks, mpsc::UnboundedReceiver<ChannelFrame>), ClientError> {
        let (socket, _response) = connect_async(url).await.map_err(|e| ClientError::Connect {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        tracing::info!("Connected to {}", url);

        let (mut sink, mut stream) = socket.split();
        let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<Message>();
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel::<ChannelFrame>();

        let writer = tokio::spawn(async move {
            while let Some(msg) = outbound_rx.recv().await {
                let closing = matches!(msg, Message::Close(_));
                if let Err(e) = sink.send(msg).await {
                    tracing::error!("Failed to write to socket: {}", e);
                    break;
                }
                if closing {
                    break;
                }
            }
        });

        let reader = tokio::spawn(async move {
            while let Some(msg) = stream.next().await {
                let msg = match msg {
                    Ok(msg) => msg,
                    Err(e) => {
                        tracing::error!("WebSocket error: {}", e);
                        break;
                    }
                };

                match msg {
                    Message::Text(text) => match ChannelFrame::parse(text.as_str()) {
                        Ok(frame) => {
                            if inbound_tx.send(frame).is_err() {
                                break;
                            }
                        }
                        Err(e) => tracing::warn!("Ignoring malformed frame: {}", e),
                    },
                    Message::Close(_) => {
                        tracing::info!("Server closed the connection");
                        break;
                    }
                    _ => {}
                }
            }
        });

        let channel = Self {
            outbound: outbound_tx.clone(),
            wire,
        };
        let tasks = ChannelTasks {
            outbound: outbound_tx,
            writer,
            reader,
        };
        Ok((channel, tasks, inbound_rx))
    }
}

#[async_trait]
impl ChatChannel for WebSocketChannel {
    async fn emit(&self, event: OutboundEvent) -> Result<(), ChannelError> {
        let text = self.wire.encode(&event)?;
        tracing::debug!("Emitting {}: {}", event.kind(), text);
        self.outbound
            .send(Message::Text(text.into()))
            .map_err(|_| ChannelError::Closed)
    }
}

impl ChannelTasks {
    /// Flush what is already queued, send a close frame, and stop reading.
    ///
    /// Waits at most `timeout` for the writer; anything still unsent after
    /// that is dropped.
    pub async fn shutdown(self, timeout: Duration) {
        // Fails only if the writer already stopped.
        let _ = self.outbound.send(Message::Close(None));
        if tokio::time::timeout(timeout, self.writer).await.is_err() {
            tracing::warn!("Socket writer did not finish within {:?}", timeout);
        }
        self.reader.abort();
    }
}
