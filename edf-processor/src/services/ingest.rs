//! Scan orchestration
//!
//! Walks the source directory, decodes each candidate file, and swaps
//! the assembled snapshot into the cache. A single file's decode failure
//! degrades that entry to an invalid record and never aborts the scan;
//! only a missing source directory fails the whole invocation, in which
//! case the previous snapshot stays authoritative.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use edf_common::model::RecordingFile;

use super::cache::{Snapshot, SnapshotCache};
use super::decoder::{decode_file, DecodeOutcome, RecordingDecoder};
use super::file_scanner::{FileScanner, ScanError};

/// Directory scan and snapshot replacement
pub struct IngestService {
    source_dir: PathBuf,
    decoder: Arc<dyn RecordingDecoder>,
    scanner: FileScanner,
    cache: Arc<SnapshotCache>,
}

impl IngestService {
    pub fn new(
        source_dir: PathBuf,
        decoder: Arc<dyn RecordingDecoder>,
        cache: Arc<SnapshotCache>,
    ) -> IngestService {
        IngestService {
            source_dir,
            decoder,
            scanner: FileScanner::new(),
            cache,
        }
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Scan the source directory and replace the cached snapshot.
    ///
    /// An empty directory is a valid outcome yielding an empty snapshot.
    /// On error the cache is left untouched.
    pub fn rescan(&self) -> Result<Arc<Snapshot>, ScanError> {
        tracing::info!(
            "Start loading of EDF files from {}",
            self.source_dir.display()
        );

        let candidates = self.scanner.scan(&self.source_dir)?;
        if candidates.is_empty() {
            tracing::warn!(
                "No EDF files found in directory: {}",
                self.source_dir.display()
            );
        }

        let snapshot: Snapshot = candidates.iter().map(|p| self.ingest_file(p)).collect();

        let valid = snapshot.iter().filter(|r| r.is_valid()).count();
        tracing::info!(
            "Loaded {} EDF files, valid: {}, invalid: {}",
            snapshot.len(),
            valid,
            snapshot.len() - valid
        );

        self.cache.replace(snapshot);
        Ok(self.cache.current())
    }

    /// Decode one file into its record; failures degrade to an invalid
    /// record carrying the reason.
    fn ingest_file(&self, path: &Path) -> RecordingFile {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match decode_file(self.decoder.as_ref(), path) {
            DecodeOutcome::Decoded(d) => {
                tracing::debug!("File {}: valid", file_name);
                RecordingFile::valid(
                    file_name,
                    &d.recording_id,
                    &d.start_date,
                    &d.start_time,
                    Some(&d.subject_id),
                    &d.channel_labels,
                    &d.transducer_types,
                    d.record_count,
                    d.record_duration_secs,
                    d.annotations.map(|a| a.len()).unwrap_or(0),
                )
            }
            DecodeOutcome::Failed { reason } => {
                tracing::error!("File {}: invalid", file_name);
                RecordingFile::invalid(file_name, reason)
            }
        }
    }
}
