//! Core types and traits for logsweep.
//!
//! This crate provides the fundamental data structures used throughout
//! the logsweep ecosystem: candidates, groups, run configuration, the
//! progress reporter interface, and the run-level error taxonomy.

mod candidate;
mod config;
mod error;
mod group;
mod report;
mod reporter;

pub use candidate::Candidate;
pub use config::{
    Compression, Cutoff, GroupingMode, RunConfig, RunConfigBuilder, DEFAULT_EXTENSION,
};
pub use error::RunError;
pub use group::{Group, GroupKey};
pub use report::{ArchiveError, ArchiveResult, RunStatus, RunSummary};
pub use reporter::{NullReporter, ProgressReporter};
