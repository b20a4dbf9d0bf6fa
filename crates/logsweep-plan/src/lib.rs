//! Grouping and eligibility planning for logsweep.
//!
//! Takes the candidates produced by `logsweep-scan` and partitions them
//! into archive groups: by calendar month (with an optional cutoff) or by
//! user pattern with first-match-wins overlap resolution.

mod cutoff;
mod planner;

pub use cutoff::CutoffDate;
pub use planner::{GroupPlanner, Plan};

// Re-export core types for convenience
pub use logsweep_core::{Candidate, Cutoff, Group, GroupKey};
