mod ice_config;
mod room_directory;
mod session;
mod signaling_service;
mod ws_handler;

pub use ice_config::*;
pub use room_directory::*;
pub use session::*;
pub use signaling_service::*;
pub use ws_handler::*;
