mod connection;
mod role;
mod room;
mod signaling;
mod status;

pub use connection::ConnectionId;
pub use role::Role;
pub use room::RoomId;
pub use signaling::{IceServerConfig, SignalMessage};
pub use status::{RoomStatus, SlotStatus};
