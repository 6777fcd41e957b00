//! The running session: which section is active and how much of it has elapsed.

mod command;
mod engine;

pub use command::Command;
pub use engine::{SessionEngine, Tick};
