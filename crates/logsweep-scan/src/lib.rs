//! Directory scanning and file classification for logsweep.
//!
//! This crate turns a directory into a sequence of [`Candidate`]s under one
//! of two matching modes:
//!
//! - **Date mode**: file names carrying a `YYYY_MM_DD` prefix and the
//!   configured extension ([`DateMatcher`]).
//! - **Pattern mode**: file names matching user-supplied wildcard patterns
//!   ([`PatternSet`]).
//!
//! # Example
//!
//! ```rust,no_run
//! use logsweep_scan::{DateMatcher, LogScanner, Matcher};
//!
//! let matcher = Matcher::Date(DateMatcher::new("log"));
//! let candidates = LogScanner::new().scan("/var/log/app", &matcher).unwrap();
//! println!("{} candidate files", candidates.len());
//! ```
//!
//! Scanning is a pure read-only pass: no file is opened, only directory
//! entries and metadata are read.

mod date;
mod patterns;
mod scanner;

pub use date::DateMatcher;
pub use patterns::{CompiledPattern, PatternSet};
pub use scanner::{LogScanner, Matcher};

// Re-export core types for convenience
pub use logsweep_core::{Candidate, RunError};
