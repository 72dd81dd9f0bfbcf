use tracing::{debug, info};

use super::{LauncherConfig, CONFIG_ENV_KEY, DEFAULT_CONFIG_FILE};

pub fn log_env_source(path: &std::path::Path, from_env: bool) {
    if from_env {
        info!(
            target: "beremiz::config",
            path = %path.display(),
            "Loading configuration using BEREMIZ_CONFIG_PATH environment variable"
        );
    } else {
        debug!(
            target: "beremiz::config",
            path = %path.display(),
            env = CONFIG_ENV_KEY,
            default = DEFAULT_CONFIG_FILE,
            "BEREMIZ_CONFIG_PATH not set; looking for beremiz.toml in the application directory"
        );
    }
}

pub fn log_loaded(config: &LauncherConfig) {
    info!(
        target: "beremiz::config",
        source = %config
            .source_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<defaults>".to_string()),
        app_dir = %config.app_dir.display(),
        app_name = %config.launcher.app_name,
        log_level = %config.launcher.log_level,
        splash_image = %config.splash.image.display(),
        update_wait_ms = config.update.wait.as_millis() as u64,
        crash_log_dir = %config.crash.log_dir.display(),
        debug = config.debug,
        "Launcher configuration ready"
    );
}
