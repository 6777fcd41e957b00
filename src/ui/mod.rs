pub mod app;
pub mod event;
pub mod render;

pub use app::App;
pub use event::{command_for_key, Event, EventHandler};
