//! Crash reporting: a panic hook that leaves a bug report in the log directory.

use std::{
    backtrace::Backtrace,
    fs,
    path::{Path, PathBuf},
    thread,
};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::lib::errors::CrashLogError;

/// Contents of a single bug report.
#[derive(Debug, Clone)]
pub struct CrashReport {
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub thread: String,
    pub location: Option<String>,
    pub message: String,
    pub backtrace: String,
}

impl CrashReport {
    fn render(&self) -> String {
        format!(
            "app-version: {version}\n\
             time: {time}\n\
             thread: {thread}\n\
             location: {location}\n\
             message: {message}\n\
             \n\
             backtrace:\n{backtrace}\n",
            version = self.version,
            time = self.timestamp.to_rfc3339(),
            thread = self.thread,
            location = self.location.as_deref().unwrap_or("<unknown>"),
            message = self.message,
            backtrace = self.backtrace,
        )
    }

    fn file_name(&self) -> String {
        format!(
            "bug_report_{}_{}.txt",
            self.timestamp.format("%Y_%m_%d__%H-%M-%S"),
            Uuid::new_v4().simple()
        )
    }
}

/// Write `report` into `log_dir` and return the created file.
pub fn write_crash_report(log_dir: &Path, report: &CrashReport) -> Result<PathBuf, CrashLogError> {
    fs::create_dir_all(log_dir).map_err(|source| CrashLogError::CreateDir {
        path: log_dir.to_path_buf(),
        source,
    })?;
    let path = log_dir.join(report.file_name());
    fs::write(&path, report.render()).map_err(|source| CrashLogError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Install a process-wide panic hook that records bug reports tagged with `version`.
///
/// The previously installed hook still runs after the report is written.
pub fn install_except_hook(log_dir: &Path, version: &str) -> Result<(), CrashLogError> {
    fs::create_dir_all(log_dir).map_err(|source| CrashLogError::CreateDir {
        path: log_dir.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        target: "beremiz::crash",
        log_dir = %log_dir.display(),
        version,
        "Installing exception hook"
    );

    let log_dir = log_dir.to_path_buf();
    let version = version.to_string();
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let payload = info.payload();
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "<non-string panic payload>".to_string());
        let report = CrashReport {
            version: version.clone(),
            timestamp: Utc::now(),
            thread: thread::current().name().unwrap_or("<unnamed>").to_string(),
            location: info
                .location()
                .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column())),
            message,
            backtrace: Backtrace::force_capture().to_string(),
        };
        match write_crash_report(&log_dir, &report) {
            Ok(path) => tracing::error!(
                target: "beremiz::crash",
                path = %path.display(),
                "Unhandled panic; bug report written"
            ),
            Err(err) => tracing::error!(
                target: "beremiz::crash",
                reason = %err,
                "Unhandled panic; failed to write bug report"
            ),
        }
        previous(info);
    }));
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn sample_report() -> CrashReport {
        CrashReport {
            version: "1.3.0".into(),
            timestamp: Utc::now(),
            thread: "bootstrap".into(),
            location: Some("src/launcher/startup.rs:10:5".into()),
            message: "frame construction failed".into(),
            backtrace: "<disabled>".into(),
        }
    }

    #[test]
    fn report_is_written_with_version_tag() {
        let temp = tempdir().expect("can create temporary directory");
        let log_dir = temp.path().join("Beremiz");

        let path =
            write_crash_report(&log_dir, &sample_report()).expect("report should be written");

        assert!(path.starts_with(&log_dir));
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        assert!(name.starts_with("bug_report_"), "{name}");
        let content = fs::read_to_string(&path).expect("can read report");
        assert!(content.contains("app-version: 1.3.0"), "{content}");
        assert!(content.contains("thread: bootstrap"), "{content}");
        assert!(content.contains("frame construction failed"), "{content}");
    }

    #[test]
    fn two_reports_in_the_same_second_do_not_collide() {
        let temp = tempdir().expect("can create temporary directory");
        let report = sample_report();
        let first = write_crash_report(temp.path(), &report).expect("first report");
        let second = write_crash_report(temp.path(), &report).expect("second report");
        assert_ne!(first, second);
    }

    #[test]
    fn log_dir_under_a_file_is_reported() {
        let temp = tempdir().expect("can create temporary directory");
        let blocker = temp.path().join("not-a-dir");
        fs::write(&blocker, "x").expect("can write blocker file");

        let err = write_crash_report(&blocker.join("Beremiz"), &sample_report())
            .expect_err("creating a directory below a file must fail");
        assert!(matches!(err, CrashLogError::CreateDir { .. }), "{err:?}");
    }
}
