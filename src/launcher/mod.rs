//! Startup sequence and the pieces it wires together.
pub mod config;
pub mod resources;
pub mod startup;
pub mod update;

pub use config::LauncherConfig;
pub use startup::{ExceptHookInstaller, Launcher, RuntimeExit};
pub use update::{UpdateChecker, UpdateStatus};
