//! Per-group archive results and the run-level summary.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::GroupKey;

/// An error captured while writing one group's archive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveError {
    /// The path that caused the error (source file or archive path).
    pub path: PathBuf,
    /// A human-readable error message.
    pub message: String,
}

impl ArchiveError {
    /// Create a new archive error.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

/// Outcome of archiving one group. Produced exactly once per attempted
/// group and never mutated afterwards.
///
/// A `succeeded == true` result whose `files_written` equals the group's
/// member count is the sole authorization for deleting that group's
/// source files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveResult {
    /// Key of the group this result belongs to.
    pub key: GroupKey,
    /// Final archive path.
    pub archive_path: PathBuf,
    /// Number of member files written into the archive.
    pub files_written: usize,
    /// Uncompressed bytes streamed into the archive.
    pub bytes_written: u64,
    /// Whether the archive was completely and durably written.
    pub succeeded: bool,
    /// The causing error when `succeeded` is false.
    pub error: Option<ArchiveError>,
}

impl ArchiveResult {
    /// A result that authorizes cleanup for a group of `member_count` files.
    pub fn authorizes_cleanup(&self, member_count: usize) -> bool {
        self.succeeded && self.files_written == member_count
    }
}

/// Terminal report condition of a run that reached `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// Every eligible group was archived.
    Success,
    /// At least one group failed; others may have succeeded.
    PartialFailure,
}

/// Aggregate summary of one pipeline run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    /// Eligible groups the runner attempted.
    pub groups_attempted: usize,
    /// Groups whose archive was durably written.
    pub groups_succeeded: usize,
    /// Groups that failed (or were cancelled) mid-archive.
    pub groups_failed: usize,
    /// Files written across all successful archives.
    pub files_archived: usize,
    /// Uncompressed bytes written across all successful archives.
    pub bytes_archived: u64,
    /// Source files deleted after archival.
    pub files_deleted: usize,
    /// Deletions that failed (logged, never fatal).
    pub delete_failures: usize,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

impl RunSummary {
    /// Report condition for this summary.
    pub fn status(&self) -> RunStatus {
        if self.groups_failed > 0 {
            RunStatus::PartialFailure
        } else {
            RunStatus::Success
        }
    }

    /// Fold one group's result into the summary.
    pub fn record(&mut self, result: &ArchiveResult) {
        self.groups_attempted += 1;
        if result.succeeded {
            self.groups_succeeded += 1;
            self.files_archived += result.files_written;
            self.bytes_archived += result.bytes_written;
        } else {
            self.groups_failed += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(succeeded: bool, files: usize) -> ArchiveResult {
        ArchiveResult {
            key: GroupKey::month(2024, 1),
            archive_path: PathBuf::from("/out/2024-01.zip"),
            files_written: files,
            bytes_written: 100,
            succeeded,
            error: None,
        }
    }

    #[test]
    fn test_cleanup_authorization() {
        assert!(result(true, 3).authorizes_cleanup(3));
        assert!(!result(true, 2).authorizes_cleanup(3));
        assert!(!result(false, 3).authorizes_cleanup(3));
    }

    #[test]
    fn test_summary_status() {
        let mut summary = RunSummary::default();
        assert_eq!(summary.status(), RunStatus::Success);

        summary.record(&result(true, 2));
        assert_eq!(summary.status(), RunStatus::Success);
        assert_eq!(summary.files_archived, 2);

        summary.record(&result(false, 0));
        assert_eq!(summary.status(), RunStatus::PartialFailure);
        assert_eq!(summary.groups_attempted, 2);
    }
}
