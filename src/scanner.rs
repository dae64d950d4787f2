//! Directory scanner: enumerate the qualifying `.pdf` files of one directory.
//!
//! ## Why no recursion and no sorting?
//!
//! The contract is a flat directory of PDFs: entries directly inside the
//! input directory, nothing below it. Each file is processed independently,
//! so the order `read_dir` happens to yield is good enough — sorting would
//! only suggest an ordering guarantee the driver does not need.

use crate::error::ScrubError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// True when `name` ends, case-insensitively, with `.pdf`.
///
/// Matching is on the raw file name rather than `Path::extension` so that
/// edge names like `.pdf` or `SCORE.PDF` classify exactly the way the
/// lowercase-suffix check always has.
pub fn is_qualifying_name(name: &str) -> bool {
    name.to_lowercase().ends_with(".pdf")
}

/// List the qualifying files directly inside `input_dir`.
///
/// Subdirectories are never entered; non-regular entries (directories,
/// sockets) are ignored even when their name ends in `.pdf`.
///
/// # Errors
/// Fatal for the run: the directory being missing, not a directory, or
/// unreadable all abort the batch, matching the original behaviour.
pub fn scan_input_dir(input_dir: &Path) -> Result<Vec<PathBuf>, ScrubError> {
    if !input_dir.exists() {
        return Err(ScrubError::InputDirNotFound {
            path: input_dir.to_path_buf(),
        });
    }
    if !input_dir.is_dir() {
        return Err(ScrubError::InputNotADirectory {
            path: input_dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(input_dir).map_err(|e| ScrubError::InputDirUnreadable {
        path: input_dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ScrubError::InputDirUnreadable {
            path: input_dir.to_path_buf(),
            source: e,
        })?;

        let file_type = entry.file_type().map_err(|e| ScrubError::InputDirUnreadable {
            path: input_dir.to_path_buf(),
            source: e,
        })?;
        if !file_type.is_file() {
            continue;
        }

        let name = entry.file_name();
        match name.to_str() {
            Some(name) if is_qualifying_name(name) => files.push(entry.path()),
            _ => {}
        }
    }

    debug!(
        "Scanned {}: {} qualifying file(s)",
        input_dir.display(),
        files.len()
    );
    Ok(files)
}
