use std::path::Path;

use serde::Deserialize;
use tracing::level_filters::LevelFilter;

use crate::lib::errors::ConfigError;

pub const DEFAULT_APP_NAME: &str = "beremiz";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::INFO;

/// Application identity settings.
#[derive(Debug, Clone)]
pub struct LauncherSection {
    pub app_name: String,
    /// Log filter used when neither `RUST_LOG` nor debug mode apply.
    pub log_level: LevelFilter,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawLauncherSection {
    pub app_name: Option<String>,
    pub log_level: Option<String>,
}

pub fn parse_launcher_section(
    raw: Option<RawLauncherSection>,
    path: &Path,
) -> Result<LauncherSection, ConfigError> {
    let launcher_raw = raw.unwrap_or_default();
    let app_name = launcher_raw
        .app_name
        .unwrap_or_else(|| DEFAULT_APP_NAME.to_string());
    validate_app_name(path, &app_name)?;
    let log_level = match launcher_raw.log_level {
        Some(level) => parse_log_level(path, &level)?,
        None => DEFAULT_LOG_LEVEL,
    };
    Ok(LauncherSection {
        app_name,
        log_level,
    })
}

fn validate_app_name(path: &Path, app_name: &str) -> Result<(), ConfigError> {
    let trimmed = app_name.trim();
    if trimmed.is_empty() || trimmed.len() > 64 {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "launcher.app_name",
            message: "Provide a 1-64 character application name".into(),
        });
    }
    Ok(())
}

fn parse_log_level(path: &Path, level: &str) -> Result<LevelFilter, ConfigError> {
    level
        .trim()
        .parse::<LevelFilter>()
        .map_err(|_| ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "launcher.log_level",
            message: format!("`{level}` is not one of off, error, warn, info, debug, trace"),
        })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn section(log_level: Option<&str>) -> Result<LauncherSection, ConfigError> {
        parse_launcher_section(
            Some(RawLauncherSection {
                app_name: None,
                log_level: log_level.map(str::to_string),
            }),
            &PathBuf::from("/opt/beremiz/beremiz.toml"),
        )
    }

    #[test]
    fn log_level_defaults_to_info_and_accepts_any_case() {
        assert_eq!(section(None).expect("default").log_level, LevelFilter::INFO);
        assert_eq!(
            section(Some("WARN")).expect("upper case").log_level,
            LevelFilter::WARN
        );
        assert_eq!(section(Some("off")).expect("off").log_level, LevelFilter::OFF);
    }

    #[test]
    fn unknown_log_level_names_the_field() {
        match section(Some("not-a-level!!")).expect_err("must be rejected") {
            ConfigError::InvalidField { field, message, .. } => {
                assert_eq!(field, "launcher.log_level");
                assert!(message.contains("not-a-level!!"), "{message}");
            }
            other => panic!("Unexpected error: {other:?}"),
        }
    }
}
