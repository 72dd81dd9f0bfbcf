//! CLI entrypoint module structure.
use std::{ffi::OsString, process::ExitCode};

use clap::Parser;

pub mod args;
pub mod profile;

pub use args::{render_usage, LauncherArgs};
pub use profile::LaunchRequest;

/// Exit code used for malformed command lines.
pub const USAGE_ERROR_CODE: u8 = 2;

/// A command line that ends the process before anything is launched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageExit {
    message: String,
    code: u8,
}

impl UsageExit {
    /// Plain usage display (help request or too many positionals).
    pub fn usage() -> Self {
        Self {
            message: render_usage(),
            code: 0,
        }
    }

    fn from_clap(err: clap::Error) -> Self {
        let code = u8::try_from(err.exit_code()).unwrap_or(USAGE_ERROR_CODE);
        let message = if err.use_stderr() {
            // Malformed input: show the complaint followed by the full usage.
            format!("{}\n{}", err.render(), render_usage())
        } else {
            err.render().to_string()
        };
        Self { message, code }
    }

    pub fn code(&self) -> u8 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Print the message (stdout for success, stderr otherwise) and return the exit code.
    pub fn report(self) -> ExitCode {
        if self.code == 0 {
            println!("{}", self.message);
        } else {
            eprintln!("{}", self.message);
        }
        ExitCode::from(self.code)
    }
}

/// Parse a full argument vector (program name first) into a launch request.
pub fn parse_command_line<I, T>(args: I) -> Result<LaunchRequest, UsageExit>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    LauncherArgs::try_parse_from(args)
        .map_err(UsageExit::from_clap)?
        .into_request()
}
