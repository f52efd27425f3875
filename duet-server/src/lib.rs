//! Signaling coordinator pairing one sender with one viewer per room.

pub mod config;
pub mod error;
pub mod http;
pub mod room;
pub mod signaling;
pub mod stun;
pub mod transport;

pub use config::*;
pub use error::*;
pub use http::*;
pub use room::*;
pub use signaling::*;
pub use stun::*;
pub use transport::*;
