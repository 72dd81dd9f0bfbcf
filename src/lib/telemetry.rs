//! Telemetry initialization and launch profile logging.

use std::path::Path;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter applied when debug mode is switched on and `RUST_LOG` is unset.
const DEBUG_FILTER: &str = "debug";

/// Initialize `tracing` and format developer logs.
///
/// `RUST_LOG` always wins. Otherwise debug mode selects `debug`, and the
/// configured level is used.
pub fn init_tracing(debug: bool, level: &str) -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let fallback = if debug { DEBUG_FILTER } else { level };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_names(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Payload for logging the launch profile as structured telemetry.
#[derive(Debug)]
pub struct LaunchTelemetry<'a> {
    pub app_dir: &'a Path,
    pub config_path: Option<&'a Path>,
    pub project_path: Option<&'a Path>,
    pub build_path: Option<&'a Path>,
    pub update_url: Option<&'a str>,
    pub extensions: usize,
    /// The request rendered back as command-line arguments.
    pub launch_args: &'a [String],
    pub debug: bool,
}

/// Emit the launch profile to `tracing`.
pub fn emit_launch_profile(telemetry: &LaunchTelemetry<'_>) {
    info!(
        target: "beremiz::launcher",
        app_dir = %telemetry.app_dir.display(),
        config_path = %telemetry.config_path.map(|p| p.display().to_string()).unwrap_or_default(),
        project_path = %telemetry.project_path.map(|p| p.display().to_string()).unwrap_or_default(),
        build_path = %telemetry.build_path.map(|p| p.display().to_string()).unwrap_or_default(),
        update_url = telemetry.update_url.unwrap_or(""),
        extensions = telemetry.extensions,
        launch_args = %telemetry.launch_args.join(" "),
        debug = telemetry.debug,
        "Starting Beremiz"
    );
}
