use std::{io, path::PathBuf};

use config::ConfigError as ConfigLoaderError;
use thiserror::Error;

/// Errors that can occur while loading or validating the launcher configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to build (read) the configuration file.
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize TOML into a struct.
    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Field failed validation.
    #[error("Configuration file {path} has invalid `{field}`: {message}")]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
    /// The application directory could not be determined.
    #[error("Failed to resolve application directory: {source}")]
    AppDir {
        #[source]
        source: io::Error,
    },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }
}

/// Failures raised by the GUI toolkit binding.
#[derive(Debug, Error)]
pub enum GuiError {
    #[error("Failed to load splash bitmap {path}: {source}")]
    SplashImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("GUI event loop is no longer running")]
    Disconnected,
    #[error("Failed to run the native event loop: {message}")]
    EventLoop { message: String },
}

/// Failures while loading an extension.
#[derive(Debug, Error)]
pub enum ExtensionError {
    #[error("Extension file {path} could not be resolved: {source}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to read extension manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse extension manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Extension manifest {path} has an empty `name`")]
    MissingName { path: PathBuf },
    #[error("Extension `{extension}` requests unknown entry point `{entry}`")]
    UnknownEntryPoint { extension: String, entry: String },
    #[error("Extension `{extension}` failed to register: {message}")]
    Registration { extension: String, message: String },
}

/// Failures while preparing or writing crash reports.
#[derive(Debug, Error)]
pub enum CrashLogError {
    #[error("Failed to create crash log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write crash report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Any failure that aborts the bootstrap sequence.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Gui(#[from] GuiError),
    #[error(transparent)]
    Extension(#[from] ExtensionError),
    #[error(transparent)]
    CrashLog(#[from] CrashLogError),
    #[error("Failed to start the update check runtime: {source}")]
    UpdateRuntime {
        #[source]
        source: io::Error,
    },
    #[error("Failed to build the update check HTTP client: {source}")]
    UpdateClient {
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to spawn the bootstrap thread: {source}")]
    Spawn {
        #[source]
        source: io::Error,
    },
    #[error("Bootstrap thread panicked")]
    BootstrapPanicked,
}
