/// Application version stamped into crash reports and the window title.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Human readable application name.
pub const APP_TITLE: &str = "Beremiz";
