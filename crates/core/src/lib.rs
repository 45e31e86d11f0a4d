//! Lot Dashboard Core
//!
//! Foundational types for the lot dashboard workspace. This crate has no
//! dependency on application-level code (config files, HTTP, logging).
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `record` - `RawRecord`, string-keyed access with lenient coercion and date parsing
//! - `jitter` - `JitterSource` trait for injected display perturbation
//!
//! ## Design Principles
//!
//! 1. **Map access only** - record fields are looked up by exact string key
//! 2. **Lenient coercion** - unconvertible values are `None`, never errors
//! 3. **Unidirectional dependency** - this crate depends on nothing else in the workspace

pub mod error;
pub mod jitter;
pub mod record;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Records ────────────────────────────────────────────────────────────
pub use record::{parse_date, serial_to_date, value_to_text, RawRecord};

// ── Jitter ─────────────────────────────────────────────────────────────
pub use jitter::{JitterSource, NoJitter, SequenceJitter};
