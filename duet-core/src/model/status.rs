use crate::model::connection::ConnectionId;
use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};

/// Occupancy of a single slot at query time.
///
/// `connected` and `online` diverge while a closed connection still sits in
/// its slot waiting for the close to be processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotStatus {
    pub connected: bool,
    pub online: bool,
    /// Identity of the occupant, usable for a forced disconnect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<ConnectionId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomStatus {
    pub room_id: RoomId,
    pub sender: SlotStatus,
    pub viewer: SlotStatus,
}
