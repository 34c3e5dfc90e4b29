//! EDF file discovery
//!
//! Lists candidate recording files in the source directory. Candidates
//! are direct children whose name ends in `.edf` (case-insensitive);
//! the result is sorted by file name so snapshot order stays
//! reproducible across platforms.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// File scanner errors
#[derive(Debug, Error)]
pub enum ScanError {
    /// Configured source path does not exist
    #[error("EDF source directory not found: {0}")]
    SourceNotFound(PathBuf),

    /// Source path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Case-insensitive `.edf` suffix match on a file name
pub fn is_edf_file(file_name: &str) -> bool {
    file_name.to_lowercase().ends_with(".edf")
}

/// EDF file scanner
pub struct FileScanner;

impl FileScanner {
    pub fn new() -> FileScanner {
        FileScanner
    }

    /// List candidate EDF files (direct children only), sorted by name.
    pub fn scan(&self, source_dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
        if !source_dir.exists() {
            return Err(ScanError::SourceNotFound(source_dir.to_path_buf()));
        }
        if !source_dir.is_dir() {
            return Err(ScanError::NotADirectory(source_dir.to_path_buf()));
        }

        let mut candidates = Vec::new();
        let walker = WalkDir::new(source_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false);

        for entry in walker {
            match entry {
                Ok(entry) => {
                    let name = entry.file_name().to_string_lossy();
                    if entry.file_type().is_file() && is_edf_file(&name) {
                        candidates.push(entry.path().to_path_buf());
                    }
                }
                Err(e) => {
                    tracing::warn!("Error accessing entry: {}", e);
                    // Continue scanning, don't abort
                }
            }
        }

        candidates.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(candidates)
    }
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new()
    }
}
