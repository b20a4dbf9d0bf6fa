//! Post-archive deletion of source files.

use std::fs;

use logsweep_core::{ArchiveError, ArchiveResult, Group};

/// Outcome of cleaning up one group's source files.
#[derive(Debug, Clone, Default)]
pub struct CleanupOutcome {
    /// Files deleted.
    pub deleted: usize,
    /// Per-file failures, in member order. Never fatal.
    pub failed: Vec<ArchiveError>,
}

/// Deletes a group's source files after successful archival.
///
/// The only input that authorizes deletion is a `succeeded` result whose
/// recorded file count equals the group's member count; anything else is
/// refused wholesale.
#[derive(Debug, Default)]
pub struct CleanupExecutor;

impl CleanupExecutor {
    /// Create a new executor.
    pub fn new() -> Self {
        Self
    }

    /// Delete every member of `group`, best effort.
    ///
    /// Individual deletion failures are logged and collected; remaining
    /// members are still attempted.
    pub fn delete_group(&self, group: &Group, result: &ArchiveResult) -> CleanupOutcome {
        if !result.authorizes_cleanup(group.len()) {
            tracing::warn!(
                key = %group.key,
                "refusing cleanup: archive result does not cover the whole group"
            );
            return CleanupOutcome::default();
        }

        let mut outcome = CleanupOutcome::default();
        for member in &group.members {
            match fs::remove_file(&member.path) {
                Ok(()) => outcome.deleted += 1,
                Err(e) => {
                    tracing::warn!(path = %member.path.display(), error = %e, "deletion failed");
                    outcome.failed.push(ArchiveError::new(&member.path, e.to_string()));
                }
            }
        }

        tracing::info!(key = %group.key, deleted = outcome.deleted, failed = outcome.failed.len(), "cleanup finished");
        outcome
    }
}
