pub mod config;
pub mod error;
pub mod outline;
pub mod report;
pub mod session;
pub mod ui;
