pub use duet_core::model::{ConnectionId, Role, RoomId, SignalMessage};

pub mod model {
    pub use duet_core::model::*;
}

#[cfg(feature = "server")]
pub mod server {
    pub use duet_server::*;
}
