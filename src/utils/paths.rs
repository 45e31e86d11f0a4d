//! Cross-Platform Path Utilities
//!
//! Functions for resolving application directories across platforms.
//! Settings live under ~/.lot-dashboard/.

use std::path::{Path, PathBuf};

use crate::utils::error::{AppError, AppResult};

/// Payload read when no input is given on the command line
pub const DEFAULT_PAYLOAD_FILE: &str = "dashboard_data.json";

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the application directory (~/.lot-dashboard/)
pub fn app_dir() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(".lot-dashboard"))
}

/// Get the config file path (~/.lot-dashboard/config.json)
pub fn config_path() -> AppResult<PathBuf> {
    Ok(app_dir()?.join("config.json"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Get the application directory, creating if it doesn't exist
pub fn ensure_app_dir() -> AppResult<PathBuf> {
    let path = app_dir()?;
    ensure_dir(&path)?;
    Ok(path)
}
