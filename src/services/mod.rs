//! Services
//!
//! Business logic services for the application.
//! Services handle the core functionality and are called by commands.

pub mod dashboard;
pub mod normalize;
pub mod views;

pub use dashboard::{DashboardState, DataSource, LoadPhase};
pub use normalize::{DashboardAssembler, NormalizeContext};
