use anyhow::Result;
use tempfile::tempdir;

use crate::common::{fixture, run_launcher, stderr_of};

#[test]
fn invalid_config_file_fails_before_any_window() -> Result<()> {
    let app_dir = tempdir()?;
    let output = run_launcher(
        &[],
        &[
            (
                "BEREMIZ_CONFIG_PATH",
                fixture("tests/fixtures/beremiz_invalid_wait.toml"),
            ),
            ("BEREMIZ_APP_DIR", app_dir.path().display().to_string()),
        ],
    )?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("update.wait_ms"), "{stderr}");
    Ok(())
}

#[test]
fn missing_config_file_named_by_env_fails() -> Result<()> {
    let app_dir = tempdir()?;
    let output = run_launcher(
        &[],
        &[
            (
                "BEREMIZ_CONFIG_PATH",
                app_dir.path().join("absent.toml").display().to_string(),
            ),
            ("BEREMIZ_APP_DIR", app_dir.path().display().to_string()),
        ],
    )?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("absent.toml"));
    Ok(())
}

#[test]
fn unknown_log_level_fails_before_tracing_starts() -> Result<()> {
    let app_dir = tempdir()?;
    let output = run_launcher(
        &[],
        &[
            (
                "BEREMIZ_CONFIG_PATH",
                fixture("tests/fixtures/beremiz_invalid_log_level.toml"),
            ),
            ("BEREMIZ_APP_DIR", app_dir.path().display().to_string()),
        ],
    )?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("launcher.log_level"), "{stderr}");
    Ok(())
}
