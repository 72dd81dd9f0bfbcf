//! LaunchRequest: what the command line asked the launcher to do.
use std::path::PathBuf;

/// Resolved command-line request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchRequest {
    /// URL queried for update information (`-u`).
    pub update_url: Option<String>,
    /// Extension manifests to load, in command-line order (`-e`).
    pub extensions: Vec<PathBuf>,
    /// Project to open in the main window.
    pub project_path: Option<PathBuf>,
    /// Build output directory for the project.
    pub build_path: Option<PathBuf>,
}

impl LaunchRequest {
    /// Build arguments suitable for reproduction/logging.
    pub fn launch_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(url) = &self.update_url {
            args.push(format!("--updatecheck={url}"));
        }
        for ext in &self.extensions {
            args.push(format!("--extend={}", ext.display()));
        }
        args.extend(
            self.project_path
                .iter()
                .chain(self.build_path.iter())
                .map(|p| p.display().to_string()),
        );
        args
    }
}
