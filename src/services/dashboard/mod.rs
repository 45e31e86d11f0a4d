//! Dashboard Service
//!
//! Payload sources and the load state machine that owns the current
//! view-model.

mod source;
mod state;

pub use source::DataSource;
pub use state::{DashboardState, LoadPhase};
