//! Archive writing, cleanup and pipeline orchestration for logsweep.
//!
//! This crate drives the whole pipeline: it consumes the plan produced by
//! `logsweep-plan`, streams each group into a compressed zip archive, and
//! deletes source files once (and only once) their archive is durably
//! written. Progress flows through the [`ProgressReporter`] interface, or
//! through an event channel for callers that run the pipeline off their
//! own thread.

mod cleanup;
mod events;
mod runner;
mod writer;

pub use cleanup::{CleanupExecutor, CleanupOutcome};
pub use events::{start_run, start_run_with_cancel, ChannelReporter, RunEvent};
pub use runner::PipelineRunner;
pub use writer::ArchiveWriter;

pub use logsweep_core::{
    ArchiveError, ArchiveResult, NullReporter, ProgressReporter, RunConfig, RunError, RunStatus,
    RunSummary,
};

/// Default channel buffer size for run event updates.
pub const RUN_CHANNEL_SIZE: usize = 100;
