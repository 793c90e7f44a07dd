use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures::stream::StreamExt;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

/// Simple WebSocket abstraction - all we care about is send/receive
#[async_trait]
pub trait SocketWrapper: Send {
    /// Send a text frame to the client
    async fn send_message(&mut self, message: String) -> Result<(), SocketError>;

    /// Receive the next text frame from the client (None if connection closed)
    async fn receive_message(&mut self) -> Result<Option<String>, SocketError>;

    /// Close the connection
    async fn close(&mut self) -> Result<(), SocketError>;
}

/// Handler for inbound WebSocket frames, keyed by connection id
#[async_trait]
pub trait MessageHandler: Send + Sync {
    async fn handle_message(&self, conn_id: &str, message: String);
}

#[derive(Debug, Error)]
pub enum SocketError {
    #[error("send failed: {0}")]
    SendFailed(String),

    #[error("receive failed: {0}")]
    ReceiveFailed(String),
}

/// Direct implementation on axum's WebSocket
#[async_trait]
impl SocketWrapper for WebSocket {
    async fn send_message(&mut self, message: String) -> Result<(), SocketError> {
        self.send(Message::Text(message))
            .await
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }

    async fn receive_message(&mut self) -> Result<Option<String>, SocketError> {
        match self.next().await {
            Some(Ok(Message::Text(text))) => Ok(Some(text)),
            Some(Ok(Message::Close(_))) => Ok(None),
            Some(Ok(_)) => Ok(None), // Ignore binary/ping/pong
            Some(Err(e)) => Err(SocketError::ReceiveFailed(e.to_string())),
            None => Ok(None), // Connection closed
        }
    }

    async fn close(&mut self) -> Result<(), SocketError> {
        self.send(Message::Close(None))
            .await
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }
}

/// A managed WebSocket connection: pumps outbound messages from the
/// broadcaster's channel down to the client and inbound frames up to the
/// message handler until either side closes.
pub struct Connection {
    pub conn_id: String,
    socket: Box<dyn SocketWrapper>,
    outbound_receiver: mpsc::UnboundedReceiver<String>,
    message_handler: Arc<dyn MessageHandler>,
}

impl Connection {
    pub fn new(
        conn_id: String,
        socket: Box<dyn SocketWrapper>,
        outbound_receiver: mpsc::UnboundedReceiver<String>,
        message_handler: Arc<dyn MessageHandler>,
    ) -> Self {
        Self {
            conn_id,
            socket,
            outbound_receiver,
            message_handler,
        }
    }

    /// Run the connection until either side closes. Returns a human-readable
    /// disconnect reason for the protocol's disconnect event; transport
    /// failures end the connection but are not errors to the caller.
    pub async fn run(mut self) -> String {
        let reason = loop {
            tokio::select! {
                // Outbound messages (from our app to the client)
                msg = self.outbound_receiver.recv() => {
                    match msg {
                        Some(message) => {
                            if let Err(e) = self.socket.send_message(message).await {
                                break e.to_string();
                            }
                        }
                        None => break "server closed".to_string(),
                    }
                }

                // Inbound frames (from the client to our app)
                msg = self.socket.receive_message() => {
                    match msg {
                        Ok(Some(message)) => {
                            self.message_handler
                                .handle_message(&self.conn_id, message)
                                .await;
                        }
                        Ok(None) => break "client closed".to_string(),
                        Err(e) => break e.to_string(),
                    }
                }
            }
        };

        let _ = self.socket.close().await;
        reason
    }
}
