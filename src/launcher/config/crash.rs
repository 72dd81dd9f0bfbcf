use std::{
    env,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::lib::paths::resolve_against;

/// Folder created under the system temp directory for bug reports.
pub const DEFAULT_CRASH_DIR_NAME: &str = "Beremiz";

/// Crash report settings.
#[derive(Debug, Clone)]
pub struct CrashSection {
    pub log_dir: PathBuf,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawCrashSection {
    pub log_dir: Option<PathBuf>,
}

pub fn parse_crash_section(raw: Option<RawCrashSection>, app_dir: &Path) -> CrashSection {
    let log_dir = raw
        .and_then(|section| section.log_dir)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| resolve_against(app_dir, &dir))
        .unwrap_or_else(|| env::temp_dir().join(DEFAULT_CRASH_DIR_NAME));
    CrashSection { log_dir }
}
