//! Commands
//!
//! Entry points for presentation layers (the CLI, or an embedding UI shell).
//! Each command takes the shared `DashboardState` and answers with a
//! `CommandResponse`.

pub mod dashboard;
pub mod settings;

pub use dashboard::*;
pub use settings::*;
