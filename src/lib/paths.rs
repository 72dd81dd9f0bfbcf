//! Shared path helpers used by configuration and startup.

use std::{
    env, io,
    path::{Path, PathBuf},
};

/// Overrides the directory holding bundled resources (`images`, `locale`).
pub const APP_DIR_ENV: &str = "BEREMIZ_APP_DIR";
/// Marker file whose presence in the working directory turns on debug mode.
pub const DEBUG_MARKER: &str = "BEREMIZ_DEBUG";

/// Resolve the application directory: `BEREMIZ_APP_DIR`, else the folder of the executable.
pub fn resolve_app_dir() -> io::Result<PathBuf> {
    if let Some(dir) = env::var_os(APP_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let exe = env::current_exe()?.canonicalize()?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "executable has no parent"))
}

/// Returns true if the debug marker file exists in `dir`.
pub fn debug_marker_present(dir: &Path) -> bool {
    dir.join(DEBUG_MARKER).exists()
}

/// Join `path` onto `base` unless it is already absolute.
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
