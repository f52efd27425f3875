use crate::room::RoomManager;
use crate::signaling::RoomDirectory;
use crate::transport::{NORMAL_CLOSURE, Transport};
use async_trait::async_trait;
use dashmap::DashMap;
use duet_core::{ConnectionId, RoomStatus};
use std::sync::Arc;
use tracing::{info, warn};

struct SignalingInner {
    connections: DashMap<ConnectionId, Arc<dyn Transport>>,
    rooms: RoomManager,
}

/// Shared state of the signaling endpoint: the room table plus every open
/// connection, indexed for operator-initiated disconnects.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
}

impl SignalingService {
    pub fn new(rooms: RoomManager) -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                connections: DashMap::new(),
                rooms,
            }),
        }
    }

    pub fn rooms(&self) -> &RoomManager {
        &self.inner.rooms
    }

    pub fn add_connection(&self, connection_id: ConnectionId, transport: Arc<dyn Transport>) {
        self.inner.connections.insert(connection_id, transport);
    }

    pub fn remove_connection(&self, connection_id: &ConnectionId) {
        self.inner.connections.remove(connection_id);
    }

    pub fn connection_count(&self) -> usize {
        self.inner.connections.len()
    }
}

impl Default for SignalingService {
    fn default() -> Self {
        Self::new(RoomManager::new())
    }
}

#[async_trait]
impl RoomDirectory for SignalingService {
    async fn rooms_status(&self) -> Vec<RoomStatus> {
        self.inner.rooms.rooms_status().await
    }

    async fn disconnect(&self, connection_id: &ConnectionId) -> bool {
        let Some(transport) = self
            .inner
            .connections
            .get(connection_id)
            .map(|entry| entry.value().clone())
        else {
            warn!("Disconnect requested for unknown connection {}", connection_id);
            return false;
        };

        if !transport.is_open() {
            return false;
        }

        info!("Closing connection {} on operator request", connection_id);
        transport
            .close(NORMAL_CLOSURE, "disconnected by operator")
            .is_ok()
    }
}
