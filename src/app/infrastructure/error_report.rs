use std::error::Error;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::Local;

pub const DEFAULT_REPORT_DIR: &str = "ErrorReportingDirectory";

/// Receives descriptions of failures that were shown to the user.
pub trait ErrorSink {
    /// Store one record; returns where it went.
    fn report(&self, error: &dyn Error) -> std::io::Result<PathBuf>;
}

/// Writes one timestamped `.err` file per failure into a fixed directory.
#[derive(Debug, Clone)]
pub struct ErrorReporter {
    dir: PathBuf,
}

impl ErrorReporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ErrorSink for ErrorReporter {
    fn report(&self, error: &dyn Error) -> std::io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;

        let now = Local::now();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let path = self
            .dir
            .join(format!("{}_{}.err", now.format("%Y_%m_%d"), nanos));

        fs::write(&path, describe(error, &now.to_rfc3339()))?;
        tracing::info!("Wrote error report {}", path.display());
        Ok(path)
    }
}

/// Render the error and its chain of sources, one per line.
pub fn describe(error: &dyn Error, timestamp: &str) -> String {
    let mut record = format!("[{}] {}\n", timestamp, error);
    let mut source = error.source();
    while let Some(cause) = source {
        let _ = writeln!(record, "  caused by: {}", cause);
        source = cause.source();
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::infrastructure::error::AppError;

    #[test]
    fn test_creates_directory_on_first_use() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("reports");
        let reporter = ErrorReporter::new(&dir);
        assert!(!dir.exists());

        let err = AppError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only volume",
        ));
        let path = reporter.report(&err).unwrap();

        assert!(dir.is_dir());
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("err"));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert_eq!(&name[4..5], "_");
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("read-only volume"));
    }

    #[test]
    fn test_each_report_gets_its_own_file() {
        let tmp = tempfile::tempdir().unwrap();
        let reporter = ErrorReporter::new(tmp.path());
        let a = reporter.report(&AppError::UnrecognizedFormat).unwrap();
        let b = reporter.report(&AppError::UnrecognizedFormat).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_unwritable_directory_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("not-a-dir");
        fs::write(&blocker, "x").unwrap();
        let reporter = ErrorReporter::new(&blocker);
        assert!(reporter.report(&AppError::UnrecognizedFormat).is_err());
    }

    #[test]
    fn test_describe_includes_sources() {
        #[derive(Debug, thiserror::Error)]
        #[error("outer")]
        struct Outer(#[source] std::io::Error);

        let err = Outer(std::io::Error::other("inner"));
        let text = describe(&err, "t");
        assert_eq!(text, "[t] outer\n  caused by: inner\n");
    }
}
