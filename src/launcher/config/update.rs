use std::{path::Path, time::Duration};

use serde::Deserialize;

use crate::lib::errors::ConfigError;

pub const DEFAULT_UPDATE_WAIT_MS: u64 = 2000;
pub const DEFAULT_FALLBACK_MESSAGE: &str = "update info unavailable.";

/// Update check settings.
#[derive(Debug, Clone)]
pub struct UpdateSection {
    /// How long startup waits for the fetch before moving on.
    pub wait: Duration,
    /// Splash text used when the fetch fails.
    pub fallback_message: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawUpdateSection {
    pub wait_ms: Option<u64>,
    pub fallback_message: Option<String>,
}

pub fn parse_update_section(
    raw: Option<RawUpdateSection>,
    path: &Path,
) -> Result<UpdateSection, ConfigError> {
    let update_raw = raw.unwrap_or_default();

    let wait_ms = update_raw.wait_ms.unwrap_or(DEFAULT_UPDATE_WAIT_MS);
    if !(1..=60_000).contains(&wait_ms) {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "update.wait_ms",
            message: "Specify a value between 1 and 60000 milliseconds".into(),
        });
    }

    let fallback_message = update_raw
        .fallback_message
        .unwrap_or_else(|| DEFAULT_FALLBACK_MESSAGE.to_string());
    if fallback_message.trim().is_empty() {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "update.fallback_message",
            message: "Fallback message cannot be empty".into(),
        });
    }

    Ok(UpdateSection {
        wait: Duration::from_millis(wait_ms),
        fallback_message,
    })
}
