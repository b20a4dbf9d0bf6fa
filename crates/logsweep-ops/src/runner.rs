//! Sequential pipeline orchestration.

use std::fs;
use std::time::Instant;

use tokio_util::sync::CancellationToken;

use logsweep_core::{GroupingMode, ProgressReporter, RunConfig, RunError, RunSummary};
use logsweep_plan::{CutoffDate, GroupPlanner, Plan};
use logsweep_scan::{DateMatcher, LogScanner, Matcher, PatternSet};

use crate::cleanup::CleanupExecutor;
use crate::writer::ArchiveWriter;

/// Resolved grouping mode for one run.
enum ResolvedMode {
    Month(Option<CutoffDate>),
    Patterns(PatternSet),
}

/// Orchestrates scan, grouping, archiving and cleanup for one run.
///
/// Groups are processed strictly sequentially; a failed group never stops
/// the run. Only a directory-level error before any group is processed
/// aborts the whole run.
#[derive(Debug)]
pub struct PipelineRunner {
    config: RunConfig,
}

impl PipelineRunner {
    /// Create a runner for the given configuration.
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// The configuration this runner was built with.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run the pipeline to completion on the calling thread.
    pub fn run(&self, reporter: &dyn ProgressReporter) -> Result<RunSummary, RunError> {
        self.run_with_cancel(reporter, None)
    }

    /// Run the pipeline, checking the token between groups and between
    /// files. A cancelled run still terminates with a summary; the group
    /// in flight at cancellation time is discarded like a failed group and
    /// none of its files are deleted.
    pub fn run_with_cancel(
        &self,
        reporter: &dyn ProgressReporter,
        cancel: Option<&CancellationToken>,
    ) -> Result<RunSummary, RunError> {
        let start = Instant::now();

        // Pattern compilation happens before any filesystem access.
        let mode = self.resolve_mode()?;
        let matcher = match &mode {
            ResolvedMode::Month(_) => Matcher::Date(DateMatcher::new(&self.config.extension)),
            ResolvedMode::Patterns(set) => Matcher::Patterns(set.clone()),
        };

        let candidates = LogScanner::new().scan(&self.config.input_dir, &matcher)?;
        self.ensure_output_dir()?;

        let planner = GroupPlanner::new();
        let plan = match &mode {
            ResolvedMode::Month(cutoff) => planner.plan_by_month(candidates, *cutoff),
            ResolvedMode::Patterns(set) => planner.plan_by_pattern(candidates, set),
        };

        tracing::info!(
            input = %self.config.input_dir.display(),
            groups = plan.eligible_count(),
            compression = %self.config.compression,
            "starting archival"
        );

        let summary = self.archive_groups(&mode, &plan, reporter, cancel, start);
        reporter.on_run_completed(&summary);
        Ok(summary)
    }

    fn archive_groups(
        &self,
        mode: &ResolvedMode,
        plan: &Plan,
        reporter: &dyn ProgressReporter,
        cancel: Option<&CancellationToken>,
        start: Instant,
    ) -> RunSummary {
        let writer = ArchiveWriter::new(self.config.compression);
        let executor = CleanupExecutor::new();
        let mut summary = RunSummary::default();

        for (index, group) in plan.groups.iter().enumerate() {
            if cancel.is_some_and(|token| token.is_cancelled()) {
                tracing::info!("run cancelled; remaining groups left untouched");
                break;
            }

            if !group.is_eligible() {
                if let ResolvedMode::Patterns(set) = mode {
                    let pattern = &set.patterns()[index].source;
                    tracing::info!(pattern = %pattern, "no files found");
                    reporter.on_no_match(pattern);
                }
                continue;
            }

            reporter.on_group_started(&group.key, group.len());
            let result = writer.write_group(group, &self.config.output_dir, reporter, cancel);
            summary.record(&result);
            reporter.on_group_completed(&result);

            if self.config.delete_after_archive && result.authorizes_cleanup(group.len()) {
                let outcome = executor.delete_group(group, &result);
                summary.files_deleted += outcome.deleted;
                summary.delete_failures += outcome.failed.len();
                reporter.on_group_cleaned(&group.key, outcome.deleted, outcome.failed.len());
            }
        }

        summary.elapsed = start.elapsed();
        summary
    }

    fn resolve_mode(&self) -> Result<ResolvedMode, RunError> {
        match &self.config.mode {
            GroupingMode::ByMonth { cutoff } => {
                let today = chrono::Local::now().date_naive();
                Ok(ResolvedMode::Month(
                    cutoff.map(|c| CutoffDate::resolve(c, today)),
                ))
            }
            GroupingMode::ByPattern { patterns } => {
                Ok(ResolvedMode::Patterns(PatternSet::compile(patterns)?))
            }
        }
    }

    fn ensure_output_dir(&self) -> Result<(), RunError> {
        let output = &self.config.output_dir;
        if output.is_dir() {
            return Ok(());
        }
        if output.exists() {
            return Err(RunError::NotADirectory {
                path: output.clone(),
            });
        }
        if !self.config.create_output_dir {
            return Err(RunError::DirectoryNotFound {
                path: output.clone(),
            });
        }
        fs::create_dir_all(output).map_err(|e| RunError::io(output, e))
    }
}
