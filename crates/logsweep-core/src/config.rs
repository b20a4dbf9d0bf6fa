//! Run configuration types.

use std::path::PathBuf;

use chrono::NaiveDate;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Default extension for date-mode classification.
pub const DEFAULT_EXTENSION: &str = "log";

/// How candidate files are partitioned into archive groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GroupingMode {
    /// Group by the `YYYY_MM_DD` prefix embedded in file names.
    ByMonth {
        /// Optional cutoff; files dated after it are left alone.
        cutoff: Option<Cutoff>,
    },
    /// Group by user-supplied wildcard patterns, in supplied order.
    ByPattern {
        /// Patterns with `*`/`?` wildcards, matched against the full file name.
        patterns: Vec<String>,
    },
}

/// Age boundary for date-mode filtering. Files dated on or before the
/// resolved cutoff date qualify for archival.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Cutoff {
    /// Files at least this many days old qualify. The boundary is widened to
    /// the end of the month it falls in, so months are archived whole.
    AgeDays(u32),
    /// Absolute boundary date, used verbatim.
    Before(NaiveDate),
}

/// Compression level for the archive container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Compression {
    /// Fast, general-purpose (deflate).
    Fast,
    /// Higher ratio at moderate cost (bzip2).
    #[default]
    Balanced,
    /// Best ratio, slowest (zstd at a high level).
    Maximum,
}

impl std::fmt::Display for Compression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fast => write!(f, "fast (deflate)"),
            Self::Balanced => write!(f, "balanced (bzip2)"),
            Self::Maximum => write!(f, "maximum (zstd)"),
        }
    }
}

/// Configuration for one pipeline run.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct RunConfig {
    /// Directory containing the files to archive.
    pub input_dir: PathBuf,

    /// Directory receiving the archives.
    pub output_dir: PathBuf,

    /// Active grouping mode.
    pub mode: GroupingMode,

    /// Compression level.
    #[builder(default)]
    #[serde(default)]
    pub compression: Compression,

    /// Delete source files after their group's archive is durably written.
    #[builder(default = "false")]
    #[serde(default)]
    pub delete_after_archive: bool,

    /// Required extension for date-mode classification (without the dot).
    #[builder(default = "DEFAULT_EXTENSION.to_string()")]
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Create the output directory if it does not exist. When unset, a
    /// missing output directory aborts the run.
    #[builder(default = "false")]
    #[serde(default)]
    pub create_output_dir: bool,
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

impl RunConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match &self.input_dir {
            Some(dir) if dir.as_os_str().is_empty() => {
                return Err("Input directory cannot be empty".to_string());
            }
            None => return Err("Input directory is required".to_string()),
            _ => {}
        }
        match &self.output_dir {
            Some(dir) if dir.as_os_str().is_empty() => {
                return Err("Output directory cannot be empty".to_string());
            }
            None => return Err("Output directory is required".to_string()),
            _ => {}
        }
        if let Some(GroupingMode::ByPattern { patterns }) = &self.mode {
            if patterns.is_empty() {
                return Err("Pattern mode requires at least one pattern".to_string());
            }
        }
        if let Some(ext) = &self.extension {
            if ext.is_empty() || ext.starts_with('.') {
                return Err("Extension must be non-empty and given without the dot".to_string());
            }
        }
        Ok(())
    }
}

impl RunConfig {
    /// Create a new config builder.
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder::default()
    }
}
