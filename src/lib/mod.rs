//! Shared library modules: errors, crash reporting, path helpers and telemetry setup.

pub mod crash;
pub mod errors;
pub mod paths;
pub mod telemetry;
pub mod version;
