use anyhow::Result;

use crate::common::{run_launcher, stderr_of, stdout_of};

const USAGE_LINE: &str = "beremiz [Options] [Projectpath] [Buildpath]";

#[test]
fn help_prints_usage_and_exits_cleanly() -> Result<()> {
    for flag in ["-h", "--help"] {
        let output = run_launcher(&[flag], &[])?;
        assert_eq!(output.status.code(), Some(0), "{flag}");
        let stdout = stdout_of(&output);
        assert!(stdout.contains(USAGE_LINE), "{flag}: {stdout}");
        assert!(stdout.contains("--updatecheck"), "{flag}: {stdout}");
        assert!(stdout.contains("--extend"), "{flag}: {stdout}");
    }
    Ok(())
}

#[test]
fn unknown_option_exits_with_usage_error() -> Result<()> {
    let output = run_launcher(&["--bogus"], &[])?;
    assert_eq!(output.status.code(), Some(2));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("--bogus"), "{stderr}");
    assert!(stderr.contains(USAGE_LINE), "{stderr}");
    Ok(())
}

#[test]
fn missing_option_value_exits_with_usage_error() -> Result<()> {
    let output = run_launcher(&["-u"], &[])?;
    assert_eq!(output.status.code(), Some(2));
    Ok(())
}

#[test]
fn three_positionals_print_usage_and_exit_cleanly() -> Result<()> {
    let output = run_launcher(&["a", "b", "c"], &[])?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout_of(&output).contains(USAGE_LINE));
    Ok(())
}
