//! Data Models
//!
//! Contains all data structures used throughout the application.

pub mod dashboard;
pub mod response;
pub mod settings;
pub mod views;

pub use dashboard::*;
pub use response::*;
pub use settings::*;
pub use views::*;
