mod api;
mod app;

pub use api::*;
pub use app::*;
