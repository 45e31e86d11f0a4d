//! Payload Sources
//!
//! Where the raw JSON document comes from. A source only has to produce
//! text; judging its shape is left to the assembler.

use std::fmt;
use std::path::PathBuf;

use crate::utils::error::{AppError, AppResult};

/// A place to read the dashboard payload from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Local JSON file
    File(PathBuf),
    /// HTTP(S) URL fetched with a GET request
    Url(String),
    /// Payload text supplied by the caller
    Inline(String),
}

impl DataSource {
    /// Interpret a command-line argument as a URL or a file path
    pub fn from_arg(arg: &str) -> Self {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            DataSource::Url(arg.to_string())
        } else {
            DataSource::File(PathBuf::from(arg))
        }
    }

    /// Read the payload text
    pub async fn read_text(&self) -> AppResult<String> {
        match self {
            DataSource::File(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
                AppError::source_error(format!("cannot read {}: {}", path.display(), e))
            }),
            DataSource::Url(url) => fetch(url).await,
            DataSource::Inline(text) => Ok(text.clone()),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "file {}", path.display()),
            DataSource::Url(url) => write!(f, "url {}", url),
            DataSource::Inline(text) => write!(f, "inline payload ({} bytes)", text.len()),
        }
    }
}

async fn fetch(url: &str) -> AppResult<String> {
    let client = reqwest::Client::new();
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(AppError::source_error(format!(
            "{} returned status {}",
            url,
            response.status()
        )));
    }

    Ok(response.text().await?)
}
