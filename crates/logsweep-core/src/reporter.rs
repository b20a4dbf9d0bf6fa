//! Progress reporting interface.

use crate::{ArchiveResult, GroupKey, RunSummary};

/// Observer interface fed per-file and per-group events by the pipeline.
///
/// Implementations must be cheap and non-blocking; the pipeline calls them
/// inline between file writes. All methods default to no-ops so a reporter
/// can implement only what it displays.
pub trait ProgressReporter: Send + Sync {
    /// A group's archive is about to be written.
    fn on_group_started(&self, _key: &GroupKey, _member_count: usize) {}

    /// One member file was written. `percent` is monotonically
    /// non-decreasing within a group, in `[0, 100]`, with the number of
    /// files actually being written as the denominator.
    fn on_file_processed(&self, _key: &GroupKey, _name: &str, _percent: u8) {}

    /// A group's archive attempt finished, successfully or not.
    fn on_group_completed(&self, _result: &ArchiveResult) {}

    /// A supplied pattern matched no files. Emitted instead of silently
    /// omitting the group.
    fn on_no_match(&self, _pattern: &str) {}

    /// A group's source files were deleted after archival.
    fn on_group_cleaned(&self, _key: &GroupKey, _deleted: usize, _failed: usize) {}

    /// The run reached its terminal state.
    fn on_run_completed(&self, _summary: &RunSummary) {}
}

/// Reporter that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl ProgressReporter for NullReporter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_reporter_accepts_events() {
        let reporter = NullReporter;
        reporter.on_group_started(&GroupKey::month(2024, 1), 3);
        reporter.on_file_processed(&GroupKey::month(2024, 1), "a.log", 33);
        reporter.on_no_match("bar*");
        reporter.on_run_completed(&RunSummary::default());
    }
}
