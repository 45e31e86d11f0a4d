//! Lot Dashboard - Rust Backend Library
//!
//! Turns a loosely-typed array of lot records into the dashboard view-model:
//! per-lot summaries, a daily RFT trend, a milestone timeline, rule-based
//! insights and aggregate counters. It includes:
//! - Command handlers for presentation layers
//! - The normalization pipeline and view services
//! - Storage layer (JSON config file)
//! - Data models and utilities

pub mod commands;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export commonly used items from commands
pub use commands::{
    // Dashboard commands
    export_lots, get_dashboard_data, get_kpi_metrics, get_load_status, get_lot, get_lot_detail,
    get_rft_trend, load_dashboard, query_lots,
    // Settings commands
    get_settings, update_settings,
};
// Re-export models
pub use models::dashboard::{DashboardData, DashboardSummary, LotData, LotStatus};
pub use models::response::*;
pub use models::settings::{PipelineConfig, SettingsUpdate};
pub use services::{DashboardAssembler, DashboardState, DataSource, LoadPhase, NormalizeContext};
pub use utils::error::{AppError, AppResult};
