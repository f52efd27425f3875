use crate::room::{JoinOutcome, Room, RoomCommand};
use crate::transport::MessageChannel;
use dashmap::DashMap;
use duet_core::{ConnectionId, Role, RoomId, RoomStatus, SignalMessage};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{error, info};

const ROOM_COMMAND_CAPACITY: usize = 100;

/// Table of rooms keyed by id. Each entry is the command queue of a room's
/// event loop, spawned lazily on first reference and kept for the lifetime
/// of the manager.
#[derive(Clone, Default)]
pub struct RoomManager {
    rooms: Arc<DashMap<RoomId, mpsc::Sender<RoomCommand>>>,
}

impl RoomManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_room_sender(&self, room_id: &RoomId) -> mpsc::Sender<RoomCommand> {
        if let Some(sender) = self.rooms.get(room_id) {
            return sender.clone();
        }

        self.rooms
            .entry(room_id.clone())
            .or_insert_with(|| {
                info!("Creating new room: {}", room_id);
                let (tx, rx) = mpsc::channel(ROOM_COMMAND_CAPACITY);
                tokio::spawn(Room::new(room_id.clone(), rx).run());
                tx
            })
            .clone()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub async fn join(
        &self,
        room_id: &RoomId,
        role: Role,
        channel: MessageChannel,
    ) -> JoinOutcome {
        let (reply, outcome) = oneshot::channel();
        let cmd = RoomCommand::Join {
            channel,
            role,
            reply,
        };

        if let Err(e) = self.get_room_sender(room_id).send(cmd).await {
            error!("Room '{}' died: {}", room_id, e);
            return JoinOutcome::Rejected;
        }

        outcome.await.unwrap_or_else(|_| {
            error!("Room '{}' dropped a join request", room_id);
            JoinOutcome::Rejected
        })
    }

    pub async fn relay(
        &self,
        room_id: &RoomId,
        from: ConnectionId,
        role: Role,
        message: SignalMessage,
    ) {
        let cmd = RoomCommand::Relay {
            from,
            role,
            message,
        };
        if let Err(e) = self.get_room_sender(room_id).send(cmd).await {
            error!("Room '{}' died: {}", room_id, e);
        }
    }

    pub async fn leave(&self, room_id: &RoomId, connection_id: ConnectionId, role: Role) {
        let cmd = RoomCommand::Leave {
            connection_id,
            role,
        };
        if let Err(e) = self.get_room_sender(room_id).send(cmd).await {
            error!("Room '{}' died: {}", room_id, e);
        }
    }

    /// Occupancy of every tracked room, ordered by room id.
    pub async fn rooms_status(&self) -> Vec<RoomStatus> {
        let senders: Vec<_> = self
            .rooms
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();

        let mut statuses = Vec::with_capacity(senders.len());
        for (room_id, sender) in senders {
            let (reply, status) = oneshot::channel();
            if sender.send(RoomCommand::Status { reply }).await.is_err() {
                error!("Room '{}' died", room_id);
                continue;
            }
            match status.await {
                Ok(status) => statuses.push(status),
                Err(_) => error!("Room '{}' dropped a status request", room_id),
            }
        }

        statuses.sort_by(|a, b| a.room_id.cmp(&b.room_id));
        statuses
    }
}
