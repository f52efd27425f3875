use crate::transport::MessageChannel;
use duet_core::ConnectionId;

/// Verdict for a join request against one role slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The slot is empty.
    Assign,
    /// The requester already holds the slot; the join is repeated idempotently.
    Reassign,
    /// The holder is a different connection whose transport has closed.
    Replace,
    /// The holder is a different, live connection.
    Reject,
}

/// Outcome reported back to the connection that asked to join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    Admitted,
    Rejected,
}

/// Decides a join for `requester` against the current occupant of the slot.
///
/// Liveness of the occupant is read at call time, so a connection that closed
/// before its close event reached the room is replaced instead of blocking
/// the slot.
pub fn arbitrate(occupant: Option<&MessageChannel>, requester: &ConnectionId) -> Admission {
    match occupant {
        None => Admission::Assign,
        Some(current) if current.is_same_connection(requester) => Admission::Reassign,
        Some(current) if current.is_live() => Admission::Reject,
        Some(_) => Admission::Replace,
    }
}
