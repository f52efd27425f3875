mod admission;
mod room;
mod room_command;
mod room_manager;
mod router;

pub use admission::*;
pub use room::*;
pub use room_command::*;
pub use room_manager::*;
pub use router::*;
