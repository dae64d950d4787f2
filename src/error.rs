//! Error types for the pdfscrub library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`ScrubError`] — **Fatal**: the batch cannot proceed at all
//!   (input directory missing, output directory not creatable). Returned
//!   as `Err(ScrubError)` from the top-level entry points.
//!
//! * [`FileError`] — **Per-file**: one PDF failed (truncated download,
//!   extension lies about the content) but every other file is fine.
//!   Under the default fail-fast policy a `FileError` is promoted to a
//!   fatal [`ScrubError::FileFailed`] and aborts the run; in keep-going
//!   mode it is recorded inside [`crate::output::FileResult`] so callers
//!   can inspect partial success rather than losing the whole batch to
//!   one bad file.
//!
//! The separation lets callers decide their own tolerance: abort on the
//! first bad PDF, or log and continue and read the summary afterwards.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdfscrub library.
///
/// Per-file failures use [`FileError`] and — in keep-going mode — are
/// stored in [`crate::output::FileResult`] rather than propagated here.
#[derive(Debug, Error)]
pub enum ScrubError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input directory was not found at the given path.
    #[error("Input directory not found: '{path}'\nCheck the path exists and is readable.")]
    InputDirNotFound { path: PathBuf },

    /// The input path exists but is not a directory.
    #[error("Input path is not a directory: '{path}'")]
    InputNotADirectory { path: PathBuf },

    /// Listing the input directory failed (permissions, I/O).
    #[error("Failed to read input directory '{path}': {source}")]
    InputDirUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create the output directory (or a missing parent).
    #[error("Failed to create output directory '{path}': {source}")]
    OutputDirCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Promoted per-file errors ──────────────────────────────────────────
    /// A file failed while fail-fast was in effect; the batch stopped here.
    #[error(transparent)]
    FileFailed(#[from] FileError),

    /// Some files failed in keep-going mode.
    ///
    /// Returned by [`crate::output::BatchOutput::into_result`] when the
    /// caller wants to treat any per-file failure as an error.
    #[error("{failed}/{total} files failed during scrub")]
    PartialFailure { failed: usize, total: usize },
}

/// An error scoped to a single input file.
///
/// Fatal by default (the original design aborts the batch on the first
/// malformed input); isolated and counted when
/// [`crate::config::ScrubConfig::fail_fast`] is off.
#[derive(Debug, Error)]
pub enum FileError {
    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    /// Reading the input file failed.
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{path}' is corrupt: {detail}\nTry repairing with: qpdf --decrypt input.pdf output.pdf")]
    ParseFailed { path: PathBuf, detail: String },

    /// Serialising the stripped document failed.
    #[error("Failed to serialize stripped PDF for '{path}': {detail}")]
    SerializeFailed { path: PathBuf, detail: String },

    /// Could not create or write the output file.
    #[error("Failed to write output file '{path}': {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FileError {
    /// The input (or output) path this failure is about.
    pub fn path(&self) -> &PathBuf {
        match self {
            FileError::NotAPdf { path, .. }
            | FileError::ReadFailed { path, .. }
            | FileError::ParseFailed { path, .. }
            | FileError::SerializeFailed { path, .. }
            | FileError::WriteFailed { path, .. } => path,
        }
    }
}
