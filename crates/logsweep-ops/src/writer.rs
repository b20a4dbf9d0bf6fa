//! Streaming a group into a compressed zip archive.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tokio_util::sync::CancellationToken;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use logsweep_core::{ArchiveError, ArchiveResult, Compression, Group, ProgressReporter};

/// Writes one archive per group.
///
/// Archives are built at `<group_key>.zip.part` and renamed to
/// `<group_key>.zip` only after a successful finish and fsync, so a reader
/// can never observe a truncated archive under the final name. On failure
/// the partial file is removed.
#[derive(Debug, Clone, Copy)]
pub struct ArchiveWriter {
    compression: Compression,
}

impl ArchiveWriter {
    /// Create a writer with the given compression level.
    pub fn new(compression: Compression) -> Self {
        Self { compression }
    }

    /// Final archive path for a group under `output_dir`.
    pub fn archive_path(group: &Group, output_dir: &Path) -> PathBuf {
        output_dir.join(format!("{}.zip", group.key))
    }

    /// Stream every member of `group` into one archive under `output_dir`.
    ///
    /// Members are written in member order. One `on_file_processed` event is
    /// emitted per member, with percent = files written / group size. If a
    /// cancellation token is supplied it is checked between files, never
    /// mid-file.
    ///
    /// Never panics and never deletes source files; any failure is captured
    /// in the returned [`ArchiveResult`].
    pub fn write_group(
        &self,
        group: &Group,
        output_dir: &Path,
        reporter: &dyn ProgressReporter,
        cancel: Option<&CancellationToken>,
    ) -> ArchiveResult {
        let archive_path = Self::archive_path(group, output_dir);
        let part_path = output_dir.join(format!("{}.zip.part", group.key));

        match self.write_part(group, &part_path, reporter, cancel) {
            Ok(bytes_written) => match fs::rename(&part_path, &archive_path) {
                Ok(()) => {
                    tracing::info!(
                        key = %group.key,
                        files = group.len(),
                        bytes = bytes_written,
                        "archive written"
                    );
                    ArchiveResult {
                        key: group.key.clone(),
                        archive_path,
                        files_written: group.len(),
                        bytes_written,
                        succeeded: true,
                        error: None,
                    }
                }
                Err(e) => {
                    let error = ArchiveError::new(&part_path, format!("finalize failed: {e}"));
                    self.discard_part(&part_path);
                    self.failed(group, archive_path, error)
                }
            },
            Err(error) => {
                self.discard_part(&part_path);
                self.failed(group, archive_path, error)
            }
        }
    }

    fn write_part(
        &self,
        group: &Group,
        part_path: &Path,
        reporter: &dyn ProgressReporter,
        cancel: Option<&CancellationToken>,
    ) -> Result<u64, ArchiveError> {
        let file =
            File::create(part_path).map_err(|e| ArchiveError::new(part_path, e.to_string()))?;
        let mut zip = ZipWriter::new(file);

        let total = group.len();
        let mut bytes_written = 0u64;

        for (index, member) in group.members.iter().enumerate() {
            if let Some(token) = cancel {
                if token.is_cancelled() {
                    return Err(ArchiveError::new(part_path, "cancelled before completion"));
                }
            }

            // Members keep their original file name, flat in the archive.
            zip.start_file(member.name.as_str(), self.file_options(member.size))
                .map_err(|e| ArchiveError::new(&member.path, e.to_string()))?;

            let mut source =
                File::open(&member.path).map_err(|e| ArchiveError::new(&member.path, e.to_string()))?;
            bytes_written += io::copy(&mut source, &mut zip)
                .map_err(|e| ArchiveError::new(&member.path, e.to_string()))?;

            let percent = (((index + 1) * 100) / total) as u8;
            reporter.on_file_processed(&group.key, member.name.as_str(), percent);
        }

        let file = zip
            .finish()
            .map_err(|e| ArchiveError::new(part_path, e.to_string()))?;
        file.sync_all()
            .map_err(|e| ArchiveError::new(part_path, e.to_string()))?;

        Ok(bytes_written)
    }

    fn file_options(&self, member_size: u64) -> SimpleFileOptions {
        let options = SimpleFileOptions::default().large_file(member_size > u32::MAX as u64);
        match self.compression {
            Compression::Fast => options.compression_method(CompressionMethod::Deflated),
            Compression::Balanced => options.compression_method(CompressionMethod::Bzip2),
            Compression::Maximum => options
                .compression_method(CompressionMethod::Zstd)
                .compression_level(Some(19)),
        }
    }

    /// Best-effort removal of a partial archive. A `.part` file that cannot
    /// be removed still cannot be mistaken for a complete archive.
    fn discard_part(&self, part_path: &Path) {
        if part_path.exists() {
            if let Err(e) = fs::remove_file(part_path) {
                tracing::warn!(path = %part_path.display(), error = %e, "could not remove partial archive");
            }
        }
    }

    fn failed(&self, group: &Group, archive_path: PathBuf, error: ArchiveError) -> ArchiveResult {
        tracing::warn!(key = %group.key, error = %error, "archive failed");
        ArchiveResult {
            key: group.key.clone(),
            archive_path,
            files_written: 0,
            bytes_written: 0,
            succeeded: false,
            error: Some(error),
        }
    }
}
