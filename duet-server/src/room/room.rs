use crate::room::admission::{Admission, JoinOutcome, arbitrate};
use crate::room::room_command::RoomCommand;
use crate::room::router::route;
use crate::transport::MessageChannel;
use duet_core::{ConnectionId, Role, RoomId, RoomStatus, SignalMessage, SlotStatus};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// One room: a sender slot and a viewer slot, mutated only by its own event loop.
pub struct Room {
    id: RoomId,
    sender: Option<MessageChannel>,
    viewer: Option<MessageChannel>,
    command_rx: mpsc::Receiver<RoomCommand>,
}

impl Room {
    pub fn new(id: RoomId, command_rx: mpsc::Receiver<RoomCommand>) -> Self {
        Self {
            id,
            sender: None,
            viewer: None,
            command_rx,
        }
    }

    pub async fn run(mut self) {
        info!("Room '{}' event loop started", self.id);

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }

        info!("Command channel closed. Room '{}' event loop finished", self.id);
    }

    fn handle_command(&mut self, cmd: RoomCommand) {
        match cmd {
            RoomCommand::Join {
                channel,
                role,
                reply,
            } => {
                let outcome = self.join(channel, role);
                // The requester may have gone away while waiting.
                let _ = reply.send(outcome);
            }

            RoomCommand::Relay {
                from,
                role,
                message,
            } => self.relay(&from, role, message),

            RoomCommand::Leave {
                connection_id,
                role,
            } => self.leave(&connection_id, role),

            RoomCommand::Status { reply } => {
                let _ = reply.send(self.status());
            }
        }
    }

    fn slot(&self, role: Role) -> Option<&MessageChannel> {
        match role {
            Role::Sender => self.sender.as_ref(),
            Role::Viewer => self.viewer.as_ref(),
        }
    }

    fn slot_mut(&mut self, role: Role) -> &mut Option<MessageChannel> {
        match role {
            Role::Sender => &mut self.sender,
            Role::Viewer => &mut self.viewer,
        }
    }

    fn join(&mut self, channel: MessageChannel, role: Role) -> JoinOutcome {
        let requester = channel.id();

        match arbitrate(self.slot(role), &requester) {
            Admission::Reject => {
                warn!(
                    "Rejecting {} as {} of room '{}': slot is held by a live connection",
                    requester, role, self.id
                );
                channel.send(&SignalMessage::error(role.conflict_reason()));
                return JoinOutcome::Rejected;
            }
            Admission::Replace => {
                info!("Replacing dead {} connection in room '{}'", role, self.id);
                if let Some(peer) = self.slot(role.opposite()) {
                    peer.send(&SignalMessage::left(role));
                }
            }
            Admission::Reassign => debug!("{} re-joined room '{}' as {}", requester, self.id, role),
            Admission::Assign => {}
        }

        *self.slot_mut(role) = Some(channel);
        info!("{} joined room '{}' as {}", requester, self.id, role);
        self.announce(role);

        JoinOutcome::Admitted
    }

    /// Confirms the occupant of `role` and tells the sender a viewer is present
    /// once both slots are filled.
    fn announce(&self, role: Role) {
        if let Some(occupant) = self.slot(role) {
            occupant.send(&SignalMessage::joined(role, self.id.clone()));
        }

        if let (Some(sender), Some(_)) = (&self.sender, &self.viewer) {
            sender.send(&SignalMessage::ViewerReady);
        }
    }

    fn relay(&self, from: &ConnectionId, role: Role, message: SignalMessage) {
        let holds_slot = self
            .slot(role)
            .is_some_and(|occupant| occupant.is_same_connection(from));
        if !holds_slot {
            debug!(
                "Dropping '{}' from {}: no longer the {} of room '{}'",
                message.kind(),
                from,
                role,
                self.id
            );
            return;
        }

        let Some(target) = route(role, &message) else {
            debug!("Dropping '{}' from {} ({})", message.kind(), from, role);
            return;
        };

        match self.slot(target) {
            Some(peer) => peer.send(&message),
            None => debug!(
                "Dropping '{}' in room '{}': no {} present",
                message.kind(),
                self.id,
                target
            ),
        }
    }

    fn leave(&mut self, connection_id: &ConnectionId, role: Role) {
        let is_occupant = self
            .slot(role)
            .is_some_and(|occupant| occupant.is_same_connection(connection_id));
        if !is_occupant {
            debug!(
                "Ignoring close of {}: already evicted from room '{}'",
                connection_id, self.id
            );
            return;
        }

        *self.slot_mut(role) = None;
        info!("{} left room '{}' ({})", connection_id, self.id, role);

        if let Some(peer) = self.slot(role.opposite()) {
            peer.send(&SignalMessage::left(role));
        }
    }

    fn status(&self) -> RoomStatus {
        RoomStatus {
            room_id: self.id.clone(),
            sender: slot_status(self.sender.as_ref()),
            viewer: slot_status(self.viewer.as_ref()),
        }
    }
}

fn slot_status(slot: Option<&MessageChannel>) -> SlotStatus {
    SlotStatus {
        connected: slot.is_some(),
        online: slot.is_some_and(MessageChannel::is_live),
        connection_id: slot.map(MessageChannel::id),
    }
}
