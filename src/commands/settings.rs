//! Settings Commands
//!
//! Commands for reading and updating the pipeline configuration.

use crate::models::response::CommandResponse;
use crate::models::settings::{PipelineConfig, SettingsUpdate};
use crate::services::dashboard::DashboardState;

/// Get current pipeline settings
pub async fn get_settings(state: &DashboardState) -> Result<CommandResponse<PipelineConfig>, String> {
    Ok(CommandResponse::ok(state.get_config().await))
}

/// Update pipeline settings with a partial update; applies from the next load
pub async fn update_settings(
    state: &DashboardState,
    update: SettingsUpdate,
) -> Result<CommandResponse<PipelineConfig>, String> {
    match state.update_config(update).await {
        Ok(config) => Ok(CommandResponse::ok(config)),
        Err(e) => Ok(CommandResponse::err(e.to_string())),
    }
}
