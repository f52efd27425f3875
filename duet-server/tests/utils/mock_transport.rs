use duet_core::SignalMessage;
use duet_server::{Transport, TransportError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Transport that decodes and captures everything the coordinator sends.
pub struct MockTransport {
    open: AtomicBool,
    /// Channel to send captured signals.
    tx: mpsc::UnboundedSender<SignalMessage>,
    /// All captured signals (for verification).
    sent: Mutex<Vec<SignalMessage>>,
    close_code: Mutex<Option<u16>>,
}

impl MockTransport {
    /// Create a new MockTransport and its receiver channel.
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<SignalMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let transport = Arc::new(Self {
            open: AtomicBool::new(true),
            tx,
            sent: Mutex::new(Vec::new()),
            close_code: Mutex::new(None),
        });
        (transport, rx)
    }

    /// The underlying connection dies without the room hearing about it yet.
    pub fn kill(&self) {
        self.open.store(false, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<SignalMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// Number of captured messages with the given wire `type`.
    pub fn count(&self, kind: &str) -> usize {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|msg| msg.kind() == kind)
            .count()
    }

    pub fn close_code(&self) -> Option<u16> {
        *self.close_code.lock().unwrap()
    }
}

impl Transport for MockTransport {
    fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    fn send_text(&self, text: String) -> Result<(), TransportError> {
        if !self.is_open() {
            return Err(TransportError::Closed);
        }

        tracing::debug!("[MockTransport] send {}", text);
        let msg = SignalMessage::parse(&text).expect("coordinator sent invalid JSON");
        self.sent.lock().unwrap().push(msg.clone());
        let _ = self.tx.send(msg);
        Ok(())
    }

    fn close(&self, code: u16, _reason: &str) -> Result<(), TransportError> {
        if !self.is_open() {
            return Err(TransportError::Closed);
        }
        *self.close_code.lock().unwrap() = Some(code);
        self.open.store(false, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_transport_captures_messages() {
        let (transport, mut rx) = MockTransport::new();

        transport
            .send_text(r#"{"type":"viewer-ready"}"#.to_string())
            .unwrap();

        assert_eq!(rx.try_recv().unwrap(), SignalMessage::ViewerReady);
        assert_eq!(transport.count("viewer-ready"), 1);
    }

    #[test]
    fn test_killed_mock_refuses_sends() {
        let (transport, _rx) = MockTransport::new();
        transport.kill();

        assert_eq!(
            transport.send_text("{}".to_string()),
            Err(TransportError::Closed)
        );
        assert!(transport.sent().is_empty());
    }
}
