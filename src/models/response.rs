//! Response Types
//!
//! Standard envelope for every dashboard command, plus the load status
//! report shown alongside the data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::normalize::DataOrigin;
use crate::services::dashboard::LoadPhase;

/// Generic command response for all dashboard commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResponse<T> {
    /// Create a successful response with data
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response with message
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

impl<T> From<Result<T, crate::utils::error::AppError>> for CommandResponse<T> {
    fn from(result: Result<T, crate::utils::error::AppError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::err(e.to_string()),
        }
    }
}

/// Outcome of the most recent data load
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadStatusResponse {
    pub phase: LoadPhase,
    /// Where the current view-model came from, once one exists
    pub origin: Option<DataOrigin>,
    /// Non-fatal notice such as "using backup data"
    pub advisory: Option<String>,
    pub lot_count: usize,
    pub loaded_at: Option<DateTime<Utc>>,
}

impl Default for LoadStatusResponse {
    fn default() -> Self {
        Self {
            phase: LoadPhase::Idle,
            origin: None,
            advisory: None,
            lot_count: 0,
            loaded_at: None,
        }
    }
}
