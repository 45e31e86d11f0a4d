//! Utilities
//!
//! Error types and filesystem locations shared by every layer.

pub mod error;
pub mod paths;

pub use error::*;
pub use paths::*;
