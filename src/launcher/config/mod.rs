//! Load and validate the launcher configuration.
use std::{
    env,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::error;

use crate::lib::errors::ConfigError;

pub mod crash;
pub mod launcher;
pub mod splash;
pub mod telemetry;
pub mod update;

pub use crash::{parse_crash_section, CrashSection, RawCrashSection, DEFAULT_CRASH_DIR_NAME};
pub use launcher::{
    parse_launcher_section, LauncherSection, RawLauncherSection, DEFAULT_APP_NAME,
    DEFAULT_LOG_LEVEL,
};
pub use splash::{
    parse_splash_section, RawSplashSection, SplashSection, DEFAULT_PUMP_INTERVAL_MS,
    DEFAULT_PUMP_ITERATIONS, DEFAULT_SPLASH_IMAGE,
};
pub use update::{
    parse_update_section, RawUpdateSection, UpdateSection, DEFAULT_FALLBACK_MESSAGE,
    DEFAULT_UPDATE_WAIT_MS,
};

const CONFIG_ENV_KEY: &str = "BEREMIZ_CONFIG_PATH";
const DEFAULT_CONFIG_FILE: &str = "beremiz.toml";

/// Top-level configuration container, passed explicitly through startup.
#[derive(Debug, Clone)]
pub struct LauncherConfig {
    pub app_dir: PathBuf,
    /// Set when a `BEREMIZ_DEBUG` marker file is present.
    pub debug: bool,
    pub launcher: LauncherSection,
    pub splash: SplashSection,
    pub update: UpdateSection,
    pub crash: CrashSection,
    /// File the values were read from; `None` when only defaults apply.
    pub source_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
struct RawLauncherConfig {
    launcher: Option<RawLauncherSection>,
    splash: Option<RawSplashSection>,
    update: Option<RawUpdateSection>,
    crash: Option<RawCrashSection>,
}

impl LauncherConfig {
    /// Prefer `BEREMIZ_CONFIG_PATH` if set; otherwise read `beremiz.toml` from
    /// the application directory when it exists, falling back to defaults.
    pub fn load(app_dir: PathBuf, debug: bool) -> Result<Self, ConfigError> {
        match env::var(CONFIG_ENV_KEY) {
            Ok(value) if !value.trim().is_empty() => {
                let path = PathBuf::from(value);
                telemetry::log_env_source(&path, true);
                Self::load_from_path(path, app_dir, debug)
            }
            _ => {
                let path = app_dir.join(DEFAULT_CONFIG_FILE);
                telemetry::log_env_source(&path, false);
                if path.is_file() {
                    Self::load_from_path(path, app_dir, debug)
                } else {
                    Self::defaults(app_dir, debug)
                }
            }
        }
    }

    /// Configuration built from defaults only.
    pub fn defaults(app_dir: PathBuf, debug: bool) -> Result<Self, ConfigError> {
        let placeholder = app_dir.join(DEFAULT_CONFIG_FILE);
        let config = Self::from_raw(RawLauncherConfig::default(), &placeholder, app_dir, debug)?;
        telemetry::log_loaded(&config);
        Ok(config)
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(
        path: PathBuf,
        app_dir: PathBuf,
        debug: bool,
    ) -> Result<Self, ConfigError> {
        let builder = config::Config::builder().add_source(config::File::from(path.clone()));
        let document = builder.build().map_err(|err| {
            let error = ConfigError::from_read_error(path.clone(), err);
            error!(
                target: "beremiz::config",
                path = %path.display(),
                reason = %error,
                "Failed to read configuration file"
            );
            error
        })?;

        let raw: RawLauncherConfig = document.try_deserialize().map_err(|err| {
            let error = ConfigError::from_parse_error(path.clone(), err);
            error!(
                target: "beremiz::config",
                path = %path.display(),
                reason = %error,
                "Failed to parse configuration file"
            );
            error
        })?;

        let mut config = Self::from_raw(raw, &path, app_dir, debug).map_err(|err| {
            error!(
                target: "beremiz::config",
                path = %path.display(),
                reason = %err,
                "Failed to validate configuration file"
            );
            err
        })?;
        config.source_path = Some(path);

        telemetry::log_loaded(&config);
        Ok(config)
    }

    fn from_raw(
        raw: RawLauncherConfig,
        path: &Path,
        app_dir: PathBuf,
        debug: bool,
    ) -> Result<Self, ConfigError> {
        let launcher = parse_launcher_section(raw.launcher, path)?;
        let splash = parse_splash_section(raw.splash, path, &app_dir)?;
        let update = parse_update_section(raw.update, path)?;
        let crash = parse_crash_section(raw.crash, &app_dir);

        Ok(Self {
            app_dir,
            debug,
            launcher,
            splash,
            update,
            crash,
            source_path: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs, path::PathBuf, time::Duration};

    use tempfile::tempdir;
    use tracing::level_filters::LevelFilter;

    use crate::lib::errors::ConfigError;

    use super::*;

    fn fixture_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }

    #[test]
    fn defaults_match_the_classic_launcher() {
        let app_dir = PathBuf::from("/opt/beremiz");
        let config = LauncherConfig::defaults(app_dir.clone(), false).expect("defaults are valid");

        assert_eq!(config.launcher.app_name, "beremiz");
        assert_eq!(config.launcher.log_level, LevelFilter::INFO);
        assert_eq!(config.splash.image, app_dir.join("images/splash.png"));
        assert_eq!(config.splash.pump_iterations, 30);
        assert_eq!(config.splash.pump_interval, Duration::from_millis(10));
        assert_eq!(config.update.wait, Duration::from_secs(2));
        assert_eq!(config.update.fallback_message, "update info unavailable.");
        assert_eq!(config.crash.log_dir, env::temp_dir().join("Beremiz"));
        assert!(config.source_path.is_none());
        assert!(!config.debug);
    }

    #[test]
    fn load_valid_config() {
        let path = fixture_path("beremiz_valid.toml");
        let config =
            LauncherConfig::load_from_path(path.clone(), PathBuf::from("/opt/beremiz"), true)
                .expect("beremiz_valid.toml should load");

        assert_eq!(config.source_path, Some(path));
        assert!(config.debug);
        assert_eq!(config.launcher.app_name, "beremiz-dev");
        assert_eq!(config.launcher.log_level, LevelFilter::DEBUG);
        assert_eq!(
            config.splash.image,
            PathBuf::from("/opt/beremiz/images/splash_dev.png")
        );
        assert_eq!(config.splash.pump_iterations, 10);
        assert_eq!(config.update.wait, Duration::from_millis(500));
        assert_eq!(config.update.fallback_message, "no update information");
        assert_eq!(config.crash.log_dir, PathBuf::from("/var/log/beremiz"));
    }

    #[test]
    fn out_of_range_wait_returns_error() {
        let error = LauncherConfig::load_from_path(
            fixture_path("beremiz_invalid_wait.toml"),
            PathBuf::from("/opt/beremiz"),
            false,
        )
        .expect_err("should error for a zero wait");

        match error {
            ConfigError::InvalidField { field, .. } => assert_eq!(field, "update.wait_ms"),
            other => panic!("Unexpected error: {other:?}", other = other),
        }
    }

    #[test]
    fn blank_app_name_returns_error() {
        let error = LauncherConfig::load_from_path(
            fixture_path("beremiz_blank_app_name.toml"),
            PathBuf::from("/opt/beremiz"),
            false,
        )
        .expect_err("should error for a blank app name");

        match error {
            ConfigError::InvalidField { field, .. } => assert_eq!(field, "launcher.app_name"),
            other => panic!("Unexpected error: {other:?}", other = other),
        }
    }

    #[test]
    fn unknown_log_level_returns_error() {
        let error = LauncherConfig::load_from_path(
            fixture_path("beremiz_invalid_log_level.toml"),
            PathBuf::from("/opt/beremiz"),
            false,
        )
        .expect_err("should error for an unknown log level");

        match error {
            ConfigError::InvalidField { field, .. } => assert_eq!(field, "launcher.log_level"),
            other => panic!("Unexpected error: {other:?}", other = other),
        }
    }

    #[test]
    fn missing_explicit_file_returns_read_error() {
        let temp = tempdir().expect("can create temporary directory");
        let error = LauncherConfig::load_from_path(
            temp.path().join("absent.toml"),
            temp.path().to_path_buf(),
            false,
        )
        .expect_err("an explicit path must exist");
        assert!(matches!(error, ConfigError::FileRead { .. }), "{error:?}");
    }

    #[test]
    fn relative_crash_dir_is_resolved_against_app_dir() {
        let temp = tempdir().expect("can create temporary directory");
        let path = temp.path().join("beremiz.toml");
        fs::write(&path, "[crash]\nlog_dir = \"logs\"\n").expect("can write config");

        let config = LauncherConfig::load_from_path(path, temp.path().to_path_buf(), false)
            .expect("config should load");
        assert_eq!(config.crash.log_dir, temp.path().join("logs"));
        assert_eq!(config.update.wait, Duration::from_millis(DEFAULT_UPDATE_WAIT_MS));
    }
}
