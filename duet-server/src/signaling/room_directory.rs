use async_trait::async_trait;
use duet_core::{ConnectionId, RoomStatus};

/// Operational view of the coordinator, consumed by the status API.
#[async_trait]
pub trait RoomDirectory: Send + Sync {
    /// Occupancy and liveness of every tracked room.
    async fn rooms_status(&self) -> Vec<RoomStatus>;

    /// Close the connection with this identity. Its room sees the same
    /// departure as an organic disconnect. Returns `false` if no open
    /// connection has that id.
    async fn disconnect(&self, connection_id: &ConnectionId) -> bool;
}
