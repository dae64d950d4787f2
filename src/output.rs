//! Result types produced by a batch run and by [`crate::inspect`].
//!
//! Everything here is `Serialize` so the CLI `--json` flag can dump the
//! whole batch outcome for scripting, and so callers can archive run
//! summaries next to the output directory.

use crate::error::ScrubError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Terminal state of a single input file, per the driver's state machine:
/// a qualifying file either gets stripped, gets skipped because its
/// output already exists, or fails. No retries, no other states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileOutcome {
    /// A stripped copy was written to the output directory.
    Stripped,
    /// The output path already existed; the input was left untouched.
    Skipped,
    /// Parsing or writing failed (recorded only in keep-going mode).
    Failed,
}

/// Outcome of one input file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResult {
    /// File name within the input directory (same name used for output).
    pub file_name: String,
    /// Terminal state for this file.
    pub outcome: FileOutcome,
    /// Human-readable error description when `outcome == Failed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate counters for a batch run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchStats {
    /// Qualifying `.pdf` files found at scan time.
    pub candidate_files: usize,
    /// Files whose stripped copy was written this run.
    pub stripped_files: usize,
    /// Files skipped by the existence guard.
    pub skipped_files: usize,
    /// Files that failed (always 0 under fail-fast — the run aborts first).
    pub failed_files: usize,
    /// Wall-clock duration of the whole run in milliseconds.
    pub total_duration_ms: u64,
}

/// Complete result of [`crate::batch::run_batch`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutput {
    /// Per-file outcomes, in scan order.
    pub files: Vec<FileResult>,
    /// Aggregate counters.
    pub stats: BatchStats,
}

impl BatchOutput {
    /// Treat any per-file failure as an error.
    ///
    /// Keep-going mode returns `Ok(BatchOutput)` even when some files
    /// failed, so callers can inspect partial success. Callers that want
    /// all-or-nothing semantics instead call `run_batch(..)?.into_result()?`.
    pub fn into_result(self) -> Result<BatchOutput, ScrubError> {
        if self.stats.failed_files > 0 {
            return Err(ScrubError::PartialFailure {
                failed: self.stats.failed_files,
                total: self.stats.candidate_files,
            });
        }
        Ok(self)
    }
}

/// Document-level metadata read from a PDF's Info dictionary.
///
/// Returned by [`crate::inspect::inspect`]; a freshly scrubbed file
/// yields the all-`None`, empty-`custom` value ([`Self::is_empty`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<String>,
    pub modification_date: Option<String>,
    /// Info-dictionary entries outside the eight standard keys.
    pub custom: BTreeMap<String, String>,
    /// Number of pages in the document.
    pub page_count: usize,
    /// PDF version from the file header, e.g. "1.7".
    pub pdf_version: String,
    /// Whether the document is encrypted.
    pub is_encrypted: bool,
}

impl DocumentMetadata {
    /// True when the metadata record carries no entries at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.subject.is_none()
            && self.keywords.is_none()
            && self.creator.is_none()
            && self.producer.is_none()
            && self.creation_date.is_none()
            && self.modification_date.is_none()
            && self.custom.is_empty()
    }
}
