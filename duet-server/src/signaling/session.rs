use crate::room::{JoinOutcome, RoomManager};
use crate::transport::{MessageChannel, Transport};
use duet_core::{ConnectionId, Role, RoomId, SignalMessage};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The (role, room) a connection was admitted with. Fixed once set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub role: Role,
    pub room: RoomId,
}

/// Per-connection protocol state: unbound until the first successful join,
/// then every frame is relayed through the bound room.
pub struct ConnectionSession {
    id: ConnectionId,
    transport: Arc<dyn Transport>,
    binding: Option<Binding>,
}

impl ConnectionSession {
    pub fn new(id: ConnectionId, transport: Arc<dyn Transport>) -> Self {
        Self {
            id,
            transport,
            binding: None,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn binding(&self) -> Option<&Binding> {
        self.binding.as_ref()
    }

    /// Handles one text frame. Frames that do not parse are dropped without a reply.
    pub async fn handle_text(&mut self, rooms: &RoomManager, text: &str) {
        match SignalMessage::parse(text) {
            Ok(message) => self.handle_message(rooms, message).await,
            Err(e) => warn!("Invalid SignalMessage from {}: {}", self.id, e),
        }
    }

    pub async fn handle_message(&mut self, rooms: &RoomManager, message: SignalMessage) {
        let message = match message {
            SignalMessage::Join { role, room } => return self.join(rooms, role, room).await,
            other => other,
        };

        match &self.binding {
            Some(binding) => {
                rooms
                    .relay(&binding.room, self.id, binding.role, message)
                    .await
            }
            None => debug!(
                "Dropping '{}' from {}: not joined to a room",
                message.kind(),
                self.id
            ),
        }
    }

    async fn join(&mut self, rooms: &RoomManager, role: Role, room: RoomId) {
        if room.is_empty() {
            warn!("Ignoring join from {} without a room", self.id);
            return;
        }

        if let Some(binding) = &self.binding {
            if binding.role != role || binding.room != room {
                warn!(
                    "Ignoring join from {} as {} of '{}': already bound as {} of '{}'",
                    self.id, role, room, binding.role, binding.room
                );
                return;
            }
        }

        info!("{} wants to join room '{}' as {}", self.id, room, role);
        let channel = MessageChannel::new(self.id, self.transport.clone());

        if rooms.join(&room, role, channel).await == JoinOutcome::Admitted {
            self.binding = Some(Binding { role, room });
        }
    }

    /// Reports the closed transport to the bound room, if any.
    pub async fn close(self, rooms: &RoomManager) {
        if let Some(binding) = self.binding {
            rooms.leave(&binding.room, self.id, binding.role).await;
        }
    }
}
