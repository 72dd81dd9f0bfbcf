//! Entry point for the Beremiz IDE launcher.
use std::{env, process::ExitCode};

use anyhow::Error;
use beremiz::{
    cli::{self, LaunchRequest},
    gui,
    launcher::{config::telemetry as config_telemetry, Launcher, LauncherConfig, RuntimeExit},
    lib::{
        errors::ConfigError,
        paths,
        telemetry::{self, LaunchTelemetry},
    },
};

fn main() -> ExitCode {
    let request = match cli::parse_command_line(env::args_os()) {
        Ok(request) => request,
        Err(exit) => return exit.report(),
    };

    match bootstrap(request) {
        Ok(()) => ExitCode::SUCCESS,
        Err(exit) => exit.report(),
    }
}

fn bootstrap(request: LaunchRequest) -> Result<(), RuntimeExit> {
    let debug = env::current_dir()
        .map(|dir| paths::debug_marker_present(&dir))
        .unwrap_or(false);

    // The configured log level has to be known before tracing starts.
    let app_dir = paths::resolve_app_dir()
        .map_err(|source| RuntimeExit::from_error(Error::new(ConfigError::AppDir { source })))?;
    let config = LauncherConfig::load(app_dir, debug)
        .map_err(|err| RuntimeExit::from_error(Error::new(err)))?;

    telemetry::init_tracing(debug, &config.launcher.log_level.to_string())
        .map_err(RuntimeExit::from_error)?;
    config_telemetry::log_loaded(&config);

    let launch_args = request.launch_args();
    telemetry::emit_launch_profile(&LaunchTelemetry {
        app_dir: &config.app_dir,
        config_path: config.source_path.as_deref(),
        project_path: request.project_path.as_deref(),
        build_path: request.build_path.as_deref(),
        update_url: request.update_url.as_deref(),
        extensions: request.extensions.len(),
        launch_args: &launch_args,
        debug,
    });

    let app_name = config.launcher.app_name.clone();
    gui::run_shell(&app_name, move |toolkit| {
        Launcher::new(request, config, toolkit).run()
    })
    .map_err(RuntimeExit::from_error)
}
