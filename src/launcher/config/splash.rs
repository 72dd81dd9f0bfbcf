use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;

use crate::lib::{errors::ConfigError, paths::resolve_against};

pub const DEFAULT_SPLASH_IMAGE: &str = "images/splash.png";
pub const DEFAULT_PUMP_ITERATIONS: u32 = 30;
pub const DEFAULT_PUMP_INTERVAL_MS: u64 = 10;

/// Splash screen settings.
#[derive(Debug, Clone)]
pub struct SplashSection {
    /// Bitmap shown while the IDE starts, resolved against the application directory.
    pub image: PathBuf,
    /// Event pump rounds on platforms without a forced paint.
    pub pump_iterations: u32,
    pub pump_interval: Duration,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawSplashSection {
    pub image: Option<PathBuf>,
    pub pump_iterations: Option<u32>,
    pub pump_interval_ms: Option<u64>,
}

pub fn parse_splash_section(
    raw: Option<RawSplashSection>,
    path: &Path,
    app_dir: &Path,
) -> Result<SplashSection, ConfigError> {
    let splash_raw = raw.unwrap_or_default();

    let image = splash_raw
        .image
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SPLASH_IMAGE));
    if image.as_os_str().is_empty() {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "splash.image",
            message: "Splash image path cannot be empty".into(),
        });
    }

    let pump_iterations = splash_raw
        .pump_iterations
        .unwrap_or(DEFAULT_PUMP_ITERATIONS);
    if pump_iterations > 500 {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "splash.pump_iterations",
            message: "Specify at most 500 iterations".into(),
        });
    }

    let pump_interval_ms = splash_raw
        .pump_interval_ms
        .unwrap_or(DEFAULT_PUMP_INTERVAL_MS);
    if pump_interval_ms > 1000 {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "splash.pump_interval_ms",
            message: "Specify a value between 0 and 1000 milliseconds".into(),
        });
    }

    Ok(SplashSection {
        image: resolve_against(app_dir, &image),
        pump_iterations,
        pump_interval: Duration::from_millis(pump_interval_ms),
    })
}
