//! CLI argument definitions and `LaunchRequest` construction.
use std::path::PathBuf;

use clap::{ArgAction, CommandFactory, Parser};

use super::{LaunchRequest, UsageExit};

/// Highest number of positional arguments: project path and build path.
const MAX_POSITIONALS: usize = 2;

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "beremiz",
    about = "Beremiz: IDE for IEC 61131-3 automation programs",
    override_usage = "beremiz [Options] [Projectpath] [Buildpath]",
    long_about = None,
    infer_long_args = true
)]
pub struct LauncherArgs {
    /// Retrieve update information by checking URL.
    #[arg(
        short = 'u',
        long = "updatecheck",
        value_name = "URL",
        action = ArgAction::Append,
        allow_hyphen_values = true
    )]
    pub update_urls: Vec<String>,
    /// Extend IDE functionality by loading at start additional extensions.
    #[arg(
        short = 'e',
        long = "extend",
        value_name = "PathToExtension",
        action = ArgAction::Append,
        allow_hyphen_values = true
    )]
    pub extensions: Vec<PathBuf>,
    /// Project to open, optionally followed by its build directory.
    ///
    /// Option parsing stops at the first path; everything after it counts as a path.
    #[arg(value_name = "PATH", trailing_var_arg = true, num_args = 1..)]
    pub paths: Vec<PathBuf>,
}

impl LauncherArgs {
    /// Turn parsed arguments into a launch request.
    ///
    /// More than two positionals prints usage and exits successfully.
    pub fn into_request(self) -> Result<LaunchRequest, UsageExit> {
        if self.paths.len() > MAX_POSITIONALS {
            return Err(UsageExit::usage());
        }

        let mut paths = self.paths.into_iter();
        let project_path = paths.next();
        let build_path = paths.next();

        Ok(LaunchRequest {
            // Repeated `-u` behaves like getopt: the last one wins.
            update_url: self.update_urls.into_iter().last(),
            extensions: self.extensions,
            project_path,
            build_path,
        })
    }
}

/// Render the usage text shown for `--help` and for rejected invocations.
pub fn render_usage() -> String {
    LauncherArgs::command().render_help().to_string()
}
