//! logsweep - archive rotated log files by month or by pattern.
//!
//! Usage:
//!   lsw month [DIR]                 Group YYYY_MM_DD-named logs by month
//!   lsw pattern [DIR] <PATTERN>...  Group logs by wildcard patterns
//!   lsw --help                      Show help

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{eyre, Context, Result};

use logsweep_core::{Compression, Cutoff, GroupingMode, RunConfig, RunStatus, RunSummary};
use logsweep_ops::{start_run, RunEvent};

#[derive(Parser)]
#[command(
    name = "logsweep",
    version,
    about = "Archive rotated log files into monthly or per-pattern zips",
    long_about = "logsweep groups rotated log files by the YYYY_MM_DD date embedded in \
                  their names (or by wildcard patterns), writes one compressed zip per \
                  group, and can delete the originals once an archive is safely on disk."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Group dated log files by calendar month
    Month {
        /// Directory containing the log files
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output directory for archives (defaults to the input directory)
        #[arg(short, long, conflicts_with = "include_subdirs")]
        output: Option<PathBuf>,

        /// Only archive files at least this many days old (whole months)
        #[arg(long, value_name = "DAYS", conflicts_with = "before")]
        older_than: Option<u32>,

        /// Only archive files dated on or before this date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        before: Option<NaiveDate>,

        /// Required file extension (without the dot)
        #[arg(long, default_value = "log")]
        ext: String,

        /// Compression level
        #[arg(short, long, default_value = "balanced")]
        compression: CompressionArg,

        /// Delete source files after their archive is written
        #[arg(short, long)]
        delete: bool,

        /// Also process each immediate subdirectory, archiving in place
        #[arg(long)]
        include_subdirs: bool,

        /// Create the output directory if it does not exist
        #[arg(long)]
        create_output: bool,

        /// Output format for the run summary
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Group log files by wildcard patterns (first match wins)
    Pattern {
        /// Directory containing the log files
        path: PathBuf,

        /// Patterns matched against full file names, e.g. "2024_08*"
        #[arg(required = true)]
        patterns: Vec<String>,

        /// Output directory for archives (defaults to the input directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Compression level
        #[arg(short, long, default_value = "balanced")]
        compression: CompressionArg,

        /// Delete source files after their archive is written
        #[arg(short, long)]
        delete: bool,

        /// Create the output directory if it does not exist
        #[arg(long)]
        create_output: bool,

        /// Output format for the run summary
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum CompressionArg {
    Fast,
    #[default]
    Balanced,
    Maximum,
}

impl From<CompressionArg> for Compression {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::Fast => Compression::Fast,
            CompressionArg::Balanced => Compression::Balanced,
            CompressionArg::Maximum => Compression::Maximum,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let status = match cli.command {
        Command::Month {
            path,
            output,
            older_than,
            before,
            ext,
            compression,
            delete,
            include_subdirs,
            create_output,
            format,
        } => {
            let cutoff = match (older_than, before) {
                (Some(days), _) => Some(Cutoff::AgeDays(days)),
                (None, Some(date)) => Some(Cutoff::Before(date)),
                (None, None) => None,
            };

            if include_subdirs {
                run_month_tree(&path, cutoff, &ext, compression, delete, create_output, format)
                    .await?
            } else {
                let config = month_config(
                    &path,
                    output.as_deref().unwrap_or(&path),
                    cutoff,
                    &ext,
                    compression,
                    delete,
                    create_output,
                )?;
                run_and_report(config, format).await?
            }
        }
        Command::Pattern {
            path,
            patterns,
            output,
            compression,
            delete,
            create_output,
            format,
        } => {
            let config = RunConfig::builder()
                .input_dir(&path)
                .output_dir(output.as_deref().unwrap_or(&path))
                .mode(GroupingMode::ByPattern { patterns })
                .compression(Compression::from(compression))
                .delete_after_archive(delete)
                .create_output_dir(create_output)
                .build()
                .map_err(|e| eyre!("{e}"))?;
            run_and_report(config, format).await?
        }
    };

    if status == RunStatus::PartialFailure {
        std::process::exit(1);
    }
    Ok(())
}

fn month_config(
    input: &Path,
    output: &Path,
    cutoff: Option<Cutoff>,
    ext: &str,
    compression: CompressionArg,
    delete: bool,
    create_output: bool,
) -> Result<RunConfig> {
    RunConfig::builder()
        .input_dir(input)
        .output_dir(output)
        .mode(GroupingMode::ByMonth { cutoff })
        .compression(Compression::from(compression))
        .delete_after_archive(delete)
        .extension(ext)
        .create_output_dir(create_output)
        .build()
        .map_err(|e| eyre!("{e}"))
}

/// Process a directory and each of its immediate subdirectories as
/// independent in-place runs.
async fn run_month_tree(
    root: &Path,
    cutoff: Option<Cutoff>,
    ext: &str,
    compression: CompressionArg,
    delete: bool,
    create_output: bool,
    format: OutputFormat,
) -> Result<RunStatus> {
    let mut dirs = vec![root.to_path_buf()];
    let entries =
        std::fs::read_dir(root).with_context(|| format!("Cannot list {}", root.display()))?;
    let mut subdirs: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    subdirs.sort();
    dirs.extend(subdirs);

    let mut status = RunStatus::Success;
    for dir in dirs {
        println!("Processing {}...", dir.display());
        let config = month_config(&dir, &dir, cutoff, ext, compression, delete, create_output)?;
        if run_and_report(config, format).await? == RunStatus::PartialFailure {
            status = RunStatus::PartialFailure;
        }
    }
    Ok(status)
}

/// Run one pipeline, printing its event stream, and return the final status.
async fn run_and_report(config: RunConfig, format: OutputFormat) -> Result<RunStatus> {
    let mut rx = start_run(config);
    let mut summary: Option<RunSummary> = None;

    while let Some(event) = rx.recv().await {
        match event {
            RunEvent::GroupStarted { key, member_count } => {
                println!("Creating archive {key}.zip ({member_count} files)");
            }
            RunEvent::FileProcessed { name, percent, .. } => {
                println!("  [{percent:>3}%] {name}");
            }
            RunEvent::GroupCompleted(result) if result.succeeded => {
                println!(
                    "Task completed - Created archive '{}' with {} files ({})",
                    result
                        .archive_path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| result.archive_path.display().to_string()),
                    result.files_written,
                    format_size(result.bytes_written)
                );
            }
            RunEvent::GroupCompleted(result) => {
                let reason = result
                    .error
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "unknown error".to_string());
                eprintln!("Archive {}.zip failed: {reason}", result.key);
            }
            RunEvent::NoMatch { pattern } => {
                println!("No files found matching pattern(s): {pattern}");
            }
            RunEvent::GroupCleaned { deleted, failed, .. } => {
                if failed > 0 {
                    println!(
                        "Cleaning up - Deleted {deleted} log files, {failed} could not be deleted"
                    );
                } else {
                    println!("Cleaning up - Deleted {deleted} log files");
                }
            }
            RunEvent::Completed(s) => summary = Some(s),
            RunEvent::Failed(err) => return Err(err).context("Run aborted"),
        }
    }

    let summary = summary.ok_or_else(|| eyre!("Pipeline ended without a summary"))?;
    print_summary(&summary, format)?;
    Ok(summary.status())
}

fn print_summary(summary: &RunSummary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            println!();
            println!("{}", "─".repeat(60));
            if summary.groups_attempted == 0 {
                println!(" No log files found to archive.");
            } else {
                println!(
                    " Groups: {} attempted, {} succeeded, {} failed",
                    summary.groups_attempted, summary.groups_succeeded, summary.groups_failed
                );
                println!(
                    " Files:  {} archived ({}), {} deleted, {} deletion failures",
                    summary.files_archived,
                    format_size(summary.bytes_archived),
                    summary.files_deleted,
                    summary.delete_failures
                );
            }
            println!(" Finished in {:.2}s", summary.elapsed.as_secs_f64());
            println!("{}", "─".repeat(60));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(summary)?);
        }
    }
    Ok(())
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}
