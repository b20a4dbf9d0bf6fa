//! Channel-based event surface for running the pipeline off-thread.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use logsweep_core::{
    ArchiveResult, GroupKey, ProgressReporter, RunConfig, RunError, RunSummary,
};

use crate::runner::PipelineRunner;
use crate::RUN_CHANNEL_SIZE;

/// Event emitted through the run channel.
#[derive(Debug)]
pub enum RunEvent {
    /// A group's archive is about to be written.
    GroupStarted { key: GroupKey, member_count: usize },
    /// One member file was written.
    FileProcessed {
        key: GroupKey,
        name: String,
        percent: u8,
    },
    /// A group's archive attempt finished.
    GroupCompleted(ArchiveResult),
    /// A supplied pattern matched no files.
    NoMatch { pattern: String },
    /// A group's source files were deleted after archival.
    GroupCleaned {
        key: GroupKey,
        deleted: usize,
        failed: usize,
    },
    /// The run terminated with a summary.
    Completed(RunSummary),
    /// The run aborted before producing a summary.
    Failed(RunError),
}

/// Reporter that forwards every event into an mpsc channel.
///
/// Sends are fire-and-forget: a dropped receiver never blocks or fails the
/// pipeline.
#[derive(Debug, Clone)]
pub struct ChannelReporter {
    tx: mpsc::Sender<RunEvent>,
}

impl ChannelReporter {
    /// Create a reporter feeding the given sender.
    pub fn new(tx: mpsc::Sender<RunEvent>) -> Self {
        Self { tx }
    }

    fn send(&self, event: RunEvent) {
        let _ = self.tx.blocking_send(event);
    }
}

impl ProgressReporter for ChannelReporter {
    fn on_group_started(&self, key: &GroupKey, member_count: usize) {
        self.send(RunEvent::GroupStarted {
            key: key.clone(),
            member_count,
        });
    }

    fn on_file_processed(&self, key: &GroupKey, name: &str, percent: u8) {
        self.send(RunEvent::FileProcessed {
            key: key.clone(),
            name: name.to_string(),
            percent,
        });
    }

    fn on_group_completed(&self, result: &ArchiveResult) {
        self.send(RunEvent::GroupCompleted(result.clone()));
    }

    fn on_no_match(&self, pattern: &str) {
        self.send(RunEvent::NoMatch {
            pattern: pattern.to_string(),
        });
    }

    fn on_group_cleaned(&self, key: &GroupKey, deleted: usize, failed: usize) {
        self.send(RunEvent::GroupCleaned {
            key: key.clone(),
            deleted,
            failed,
        });
    }

    fn on_run_completed(&self, summary: &RunSummary) {
        self.send(RunEvent::Completed(summary.clone()));
    }
}

/// Start a run on a blocking worker thread.
///
/// Returns a receiver for run events. The pipeline itself stays strictly
/// sequential; only the consumption of events is concurrent with it.
pub fn start_run(config: RunConfig) -> mpsc::Receiver<RunEvent> {
    start_run_inner(config, None)
}

/// Start a run that can be cancelled between files via the token.
pub fn start_run_with_cancel(
    config: RunConfig,
    cancel: CancellationToken,
) -> mpsc::Receiver<RunEvent> {
    start_run_inner(config, Some(cancel))
}

fn start_run_inner(
    config: RunConfig,
    cancel: Option<CancellationToken>,
) -> mpsc::Receiver<RunEvent> {
    let (tx, rx) = mpsc::channel(RUN_CHANNEL_SIZE);

    tokio::task::spawn_blocking(move || {
        let reporter = ChannelReporter::new(tx.clone());
        let runner = PipelineRunner::new(config);
        // A completed run already emitted `Completed` through the reporter;
        // only the abort path needs an explicit event.
        if let Err(err) = runner.run_with_cancel(&reporter, cancel.as_ref()) {
            let _ = tx.blocking_send(RunEvent::Failed(err));
        }
    });

    rx
}
