//! Run-level error taxonomy.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a pipeline run before or during the scan phase.
///
/// Per-group archive failures and per-file deletion failures are not
/// represented here; they are captured in [`crate::ArchiveResult`] and the
/// run summary so the run can continue past them.
#[derive(Debug, Error)]
pub enum RunError {
    /// Directory does not exist.
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path exists but is not a directory.
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Malformed user pattern, rejected before any filesystem access.
    #[error("Invalid pattern {pattern:?}: {message}")]
    Pattern { pattern: String, message: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Generic I/O error with path context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RunError {
    /// Create an I/O error with path context, promoting the common kinds
    /// to their dedicated variants.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::DirectoryNotFound { path },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io { path, source },
        }
    }

    /// Create a pattern error.
    pub fn pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_kind_mapping() {
        let err = RunError::io(
            "/missing",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, RunError::DirectoryNotFound { .. }));

        let err = RunError::io(
            "/locked",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, RunError::PermissionDenied { .. }));

        let err = RunError::io(
            "/flaky",
            std::io::Error::new(std::io::ErrorKind::TimedOut, "share gone"),
        );
        assert!(matches!(err, RunError::Io { .. }));
    }

    #[test]
    fn test_pattern_error_display() {
        let err = RunError::pattern("[oops", "unclosed character class");
        assert!(err.to_string().contains("[oops"));
    }
}
