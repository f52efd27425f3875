use duet_core::{Role, SignalMessage};

/// Slot a relayed message from a `role` occupant is addressed to, or `None`
/// when that role may not send it.
pub fn route(role: Role, message: &SignalMessage) -> Option<Role> {
    match (message, role) {
        (SignalMessage::Offer { .. }, Role::Sender) => Some(Role::Viewer),
        (SignalMessage::Answer { .. }, Role::Viewer) => Some(Role::Sender),
        (SignalMessage::IceCandidate { .. }, role) => Some(role.opposite()),
        _ => None,
    }
}
