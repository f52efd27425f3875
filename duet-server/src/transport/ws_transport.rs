use crate::error::TransportError;
use crate::transport::Transport;
use axum::extract::ws::{CloseFrame, Message};
use tokio::sync::mpsc;

/// [`Transport`] over the outbound queue of a WebSocket writer task.
///
/// The writer task owns the receiving half; once it stops (socket error or a
/// close frame was flushed) the queue is closed and the connection reads as
/// not open.
#[derive(Debug, Clone)]
pub struct WsTransport {
    tx: mpsc::UnboundedSender<Message>,
}

impl WsTransport {
    pub fn new(tx: mpsc::UnboundedSender<Message>) -> Self {
        Self { tx }
    }
}

impl Transport for WsTransport {
    fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }

    fn send_text(&self, text: String) -> Result<(), TransportError> {
        self.tx
            .send(Message::Text(text.into()))
            .map_err(|_| TransportError::Closed)
    }

    fn close(&self, code: u16, reason: &str) -> Result<(), TransportError> {
        let frame = CloseFrame {
            code,
            reason: reason.into(),
        };
        self.tx
            .send(Message::Close(Some(frame)))
            .map_err(|_| TransportError::Closed)
    }
}
