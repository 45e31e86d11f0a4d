//! Settings Models
//!
//! Pipeline configuration. Rule variations between plant sites (default cycle
//! time, whether the generic improvement insight is shown, and so on) are
//! flags here instead of separate code paths.

use serde::{Deserialize, Serialize};

/// Normalization pipeline configuration stored in config.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Prefix of canonical lot identifiers
    #[serde(default = "default_lot_prefix")]
    pub lot_prefix: String,
    /// Customer shown on every lot
    #[serde(default = "default_customer")]
    pub customer: String,
    /// Cycle time target in days
    #[serde(default = "default_cycle_time_target")]
    pub cycle_time_target_days: f64,
    /// Substitute for a missing or zero cycle time; `None` keeps 0
    #[serde(default)]
    pub cycle_time_fallback_days: Option<f64>,
    /// Count records labelled "Internal RFT" as errors
    #[serde(default = "default_true")]
    pub count_internal_rft_label: bool,
    /// Emit the constant plant-wide "Process Improvement" insight
    #[serde(default)]
    pub emit_process_improvement: bool,
    /// A lot with more error records than this is at risk
    #[serde(default = "default_at_risk_threshold")]
    pub at_risk_error_threshold: u32,
    /// Days of daily RFT history computed
    #[serde(default = "default_trend_window")]
    pub trend_window_days: u32,
    /// Most recent points returned from the window
    #[serde(default = "default_trend_points")]
    pub trend_points: u32,
    /// Due date offset from today when a lot has no release date
    #[serde(default = "default_due_horizon")]
    pub due_date_horizon_days: u32,
    /// Seed for display jitter
    #[serde(default = "default_jitter_seed")]
    pub jitter_seed: u64,
    /// Records grouped per batch before yielding to the runtime
    #[serde(default = "default_batch_size")]
    pub group_batch_size: usize,
}

fn default_lot_prefix() -> String {
    "NAR".to_string()
}

fn default_customer() -> String {
    "NOVO NORDISK".to_string()
}

fn default_cycle_time_target() -> f64 {
    21.0
}

fn default_true() -> bool {
    true
}

fn default_at_risk_threshold() -> u32 {
    5
}

fn default_trend_window() -> u32 {
    90
}

fn default_trend_points() -> u32 {
    30
}

fn default_due_horizon() -> u32 {
    30
}

fn default_jitter_seed() -> u64 {
    0x5EED_F00D
}

fn default_batch_size() -> usize {
    500
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            lot_prefix: default_lot_prefix(),
            customer: default_customer(),
            cycle_time_target_days: default_cycle_time_target(),
            cycle_time_fallback_days: None,
            count_internal_rft_label: true,
            emit_process_improvement: false,
            at_risk_error_threshold: default_at_risk_threshold(),
            trend_window_days: default_trend_window(),
            trend_points: default_trend_points(),
            due_date_horizon_days: default_due_horizon(),
            jitter_seed: default_jitter_seed(),
            group_batch_size: default_batch_size(),
        }
    }
}

/// Settings update request (partial update)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsUpdate {
    pub lot_prefix: Option<String>,
    pub customer: Option<String>,
    pub cycle_time_target_days: Option<f64>,
    pub cycle_time_fallback_days: Option<Option<f64>>,
    pub count_internal_rft_label: Option<bool>,
    pub emit_process_improvement: Option<bool>,
    pub at_risk_error_threshold: Option<u32>,
    pub trend_window_days: Option<u32>,
    pub trend_points: Option<u32>,
    pub due_date_horizon_days: Option<u32>,
    pub jitter_seed: Option<u64>,
    pub group_batch_size: Option<usize>,
}

impl PipelineConfig {
    /// Apply a partial update to the configuration
    pub fn apply_update(&mut self, update: SettingsUpdate) {
        if let Some(prefix) = update.lot_prefix {
            self.lot_prefix = prefix;
        }
        if let Some(customer) = update.customer {
            self.customer = customer;
        }
        if let Some(target) = update.cycle_time_target_days {
            self.cycle_time_target_days = target;
        }
        if let Some(fallback) = update.cycle_time_fallback_days {
            self.cycle_time_fallback_days = fallback;
        }
        if let Some(count) = update.count_internal_rft_label {
            self.count_internal_rft_label = count;
        }
        if let Some(emit) = update.emit_process_improvement {
            self.emit_process_improvement = emit;
        }
        if let Some(threshold) = update.at_risk_error_threshold {
            self.at_risk_error_threshold = threshold;
        }
        if let Some(window) = update.trend_window_days {
            self.trend_window_days = window;
        }
        if let Some(points) = update.trend_points {
            self.trend_points = points;
        }
        if let Some(horizon) = update.due_date_horizon_days {
            self.due_date_horizon_days = horizon;
        }
        if let Some(seed) = update.jitter_seed {
            self.jitter_seed = seed;
        }
        if let Some(size) = update.group_batch_size {
            self.group_batch_size = size;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.lot_prefix.trim().is_empty() {
            return Err("lot_prefix cannot be empty".to_string());
        }

        if self.cycle_time_target_days.is_nan() || self.cycle_time_target_days <= 0.0 {
            return Err(format!(
                "cycle_time_target_days must be positive, got {}",
                self.cycle_time_target_days
            ));
        }

        if let Some(fallback) = self.cycle_time_fallback_days {
            if fallback.is_nan() || fallback < 0.0 {
                return Err(format!(
                    "cycle_time_fallback_days cannot be negative, got {}",
                    fallback
                ));
            }
        }

        if self.trend_points == 0 {
            return Err("trend_points must be at least 1".to_string());
        }

        if self.trend_points > self.trend_window_days {
            return Err(format!(
                "trend_points ({}) cannot exceed trend_window_days ({})",
                self.trend_points, self.trend_window_days
            ));
        }

        if self.group_batch_size == 0 {
            return Err("group_batch_size must be at least 1".to_string());
        }

        Ok(())
    }
}
