use std::{
    path::PathBuf,
    process::{Command, Output},
};

use anyhow::{Context, Result};

pub const BINARY_PATH: &str = env!("CARGO_BIN_EXE_beremiz");

/// Run the launcher with `args`, isolated from the caller's environment.
pub fn run_launcher(args: &[&str], envs: &[(&str, String)]) -> Result<Output> {
    let mut command = Command::new(BINARY_PATH);
    command
        .args(args)
        .env_remove("BEREMIZ_CONFIG_PATH")
        .env_remove("BEREMIZ_APP_DIR")
        .env_remove("RUST_LOG");
    for (key, value) in envs {
        command.env(key, value);
    }
    command.output().context("failed to run launcher binary")
}

pub fn fixture(relative: &str) -> String {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    root.join(relative).display().to_string()
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
