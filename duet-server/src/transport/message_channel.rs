use crate::transport::Transport;
use duet_core::{ConnectionId, SignalMessage};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error};

/// Typed handle over one connection, held by exactly one room slot.
pub struct MessageChannel {
    id: ConnectionId,
    transport: Arc<dyn Transport>,
}

impl MessageChannel {
    pub fn new(id: ConnectionId, transport: Arc<dyn Transport>) -> Self {
        Self { id, transport }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Best-effort delivery. Messages for a connection that is no longer open
    /// are dropped; failures are logged and never surface to the caller.
    pub fn send(&self, msg: &SignalMessage) {
        if !self.is_live() {
            debug!("Dropping '{}' for closed connection {}", msg.kind(), self.id);
            return;
        }

        match msg.to_json() {
            Ok(json) => {
                if let Err(e) = self.transport.send_text(json) {
                    error!("Failed to send '{}' to {}: {}", msg.kind(), self.id, e);
                }
            }
            Err(e) => error!("Failed to serialize signal message: {}", e),
        }
    }

    pub fn is_live(&self) -> bool {
        self.transport.is_open()
    }

    pub fn is_same_connection(&self, id: &ConnectionId) -> bool {
        self.id == *id
    }
}

impl fmt::Debug for MessageChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageChannel")
            .field("id", &self.id)
            .field("live", &self.is_live())
            .finish()
    }
}
