use crate::room::JoinOutcome;
use crate::transport::MessageChannel;
use duet_core::{ConnectionId, Role, RoomStatus, SignalMessage};
use tokio::sync::oneshot;

/// Commands processed, in order, by a room's event loop.
#[derive(Debug)]
pub enum RoomCommand {
    /// A connection asks for a role slot. The channel is moved into the slot on admission.
    Join {
        channel: MessageChannel,
        role: Role,
        reply: oneshot::Sender<JoinOutcome>,
    },

    /// Offer, answer or ICE candidate from a joined connection.
    Relay {
        from: ConnectionId,
        role: Role,
        message: SignalMessage,
    },

    /// The transport of a joined connection closed.
    Leave { connection_id: ConnectionId, role: Role },

    /// Read-only occupancy snapshot.
    Status { reply: oneshot::Sender<RoomStatus> },
}
