mod message_channel;
mod transport;
mod ws_transport;

pub use message_channel::*;
pub use transport::*;
pub use ws_transport::*;
