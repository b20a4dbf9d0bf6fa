//! A file discovered during the scan phase.

use std::path::PathBuf;
use std::time::SystemTime;

use chrono::{Datelike, NaiveDate};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// A regular file that matched the active classification mode.
///
/// Candidates are created at scan time and consumed by the planner;
/// they are never mutated after discovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// Absolute path to the file.
    pub path: PathBuf,
    /// File name (final path component).
    pub name: CompactString,
    /// Date embedded in the file name, when the name matched the date grammar.
    pub date: Option<NaiveDate>,
    /// Last modification time.
    pub modified: SystemTime,
    /// File size in bytes.
    pub size: u64,
}

impl Candidate {
    /// Create a candidate for a dated file.
    pub fn dated(
        path: impl Into<PathBuf>,
        name: impl Into<CompactString>,
        date: NaiveDate,
        modified: SystemTime,
        size: u64,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            date: Some(date),
            modified,
            size,
        }
    }

    /// Create a candidate without an embedded date (pattern mode).
    pub fn undated(
        path: impl Into<PathBuf>,
        name: impl Into<CompactString>,
        modified: SystemTime,
        size: u64,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            date: None,
            modified,
            size,
        }
    }

    /// Canonical "YYYY-MM" key for the embedded date, if any.
    pub fn month_key(&self) -> Option<String> {
        self.date
            .map(|d| format!("{:04}-{:02}", d.year(), d.month()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_key() {
        let date = NaiveDate::from_ymd_opt(2024, 8, 3).unwrap();
        let c = Candidate::dated(
            "/logs/2024_08_03_message.log",
            "2024_08_03_message.log",
            date,
            SystemTime::now(),
            512,
        );
        assert_eq!(c.month_key().as_deref(), Some("2024-08"));
    }

    #[test]
    fn test_undated_has_no_month_key() {
        let c = Candidate::undated("/logs/server.log", "server.log", SystemTime::now(), 0);
        assert!(c.month_key().is_none());
    }
}
