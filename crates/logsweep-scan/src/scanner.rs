//! Directory scanner producing candidates.

use std::path::Path;
use std::time::UNIX_EPOCH;

use compact_str::CompactString;
use jwalk::WalkDir;

use logsweep_core::{Candidate, RunError};

use crate::date::DateMatcher;
use crate::patterns::PatternSet;

/// Active classification mode for a scan.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Date-prefix grammar with a required extension.
    Date(DateMatcher),
    /// User wildcard patterns; a file qualifies when any pattern matches.
    Patterns(PatternSet),
}

impl Matcher {
    fn classify(&self, name: &str) -> Option<Option<chrono::NaiveDate>> {
        match self {
            Matcher::Date(m) => m.parse(name).map(Some),
            Matcher::Patterns(set) => set.matches_any(name).then_some(None),
        }
    }
}

/// Scans one directory for archive candidates.
///
/// Regular files only: directories, symlinks and special files are never
/// candidates. Entries are visited in name order, so candidate order (and
/// therefore group member order) is deterministic.
#[derive(Debug, Default)]
pub struct LogScanner;

impl LogScanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        Self
    }

    /// Scan `dir` and classify its files under `matcher`.
    ///
    /// Files that do not match are silently excluded; directory-level
    /// errors (missing directory, permission denied, metadata failures)
    /// abort the scan.
    pub fn scan(&self, dir: impl AsRef<Path>, matcher: &Matcher) -> Result<Vec<Candidate>, RunError> {
        let dir = dir.as_ref();
        let root = dir.canonicalize().map_err(|e| RunError::io(dir, e))?;
        if !root.is_dir() {
            return Err(RunError::NotADirectory { path: root });
        }

        let mut candidates = Vec::new();

        let walker = WalkDir::new(&root)
            .sort(true)
            .skip_hidden(false)
            .follow_links(false)
            .max_depth(1);

        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().map(|p| p.to_path_buf()).unwrap_or_else(|| root.clone());
                match e.io_error() {
                    Some(io) => RunError::io(path, std::io::Error::new(io.kind(), io.to_string())),
                    None => RunError::Io {
                        path,
                        source: std::io::Error::other(e.to_string()),
                    },
                }
            })?;

            if entry.depth() == 0 || !entry.file_type().is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            let Some(date) = matcher.classify(&name) else {
                continue;
            };

            let path = entry.path();
            let metadata = std::fs::metadata(&path).map_err(|e| RunError::io(&path, e))?;
            let modified = metadata.modified().unwrap_or(UNIX_EPOCH);

            candidates.push(Candidate {
                path,
                name: CompactString::from(name),
                date,
                modified,
                size: metadata.len(),
            });
        }

        tracing::debug!(dir = %root.display(), count = candidates.len(), "scan complete");

        Ok(candidates)
    }
}
