//! Batch driver: scan, skip-check, strip — one file at a time.
//!
//! ## Why sequential?
//!
//! The work is I/O-light and each document is held in memory whole while
//! lopdf rewrites it. Processing files one at a time bounds memory to a
//! single document, keeps failure attribution trivial, and makes the
//! skip guard race-free. There is no shared mutable state across files.
//!
//! ## The skip guard
//!
//! An output file that exists is assumed done: it is never re-read,
//! content-compared, or re-written, even if the input changed since. That
//! makes a second run over an unchanged input directory a no-op and makes
//! runs resumable after a crash. It is a content-independent idempotence
//! check, not a cache.

use crate::config::ScrubConfig;
use crate::error::ScrubError;
use crate::output::{BatchOutput, BatchStats, FileOutcome, FileResult};
use crate::scanner::scan_input_dir;
use crate::strip::scrub_file;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Run one batch scrub over `config.input_dir` into `config.output_dir`.
///
/// Creates the output directory (and missing parents) first, then drives
/// every qualifying file through the per-file state machine:
/// skip when the output exists, otherwise strip and write.
///
/// # Errors
/// Fatal [`ScrubError`] when the input directory cannot be scanned or the
/// output directory cannot be created — and, under the default fail-fast
/// policy, when any single file fails. With `fail_fast` off, per-file
/// failures are recorded in the returned [`BatchOutput`] instead.
pub fn run_batch(config: &ScrubConfig) -> Result<BatchOutput, ScrubError> {
    let total_start = Instant::now();
    info!(
        "Starting scrub: {} -> {}",
        config.input_dir.display(),
        config.output_dir.display()
    );

    // ── Step 1: ensure the output directory exists ───────────────────────
    std::fs::create_dir_all(&config.output_dir).map_err(|e| {
        ScrubError::OutputDirCreateFailed {
            path: config.output_dir.clone(),
            source: e,
        }
    })?;

    // ── Step 2: scan the input directory ─────────────────────────────────
    let candidates = scan_input_dir(&config.input_dir)?;
    let total = candidates.len();
    info!("Found {} qualifying file(s)", total);

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_start(total);
    }

    // ── Step 3: drive each file through skip-check → strip ───────────────
    let mut files = Vec::with_capacity(total);
    let mut stripped = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;

    for (i, input_path) in candidates.iter().enumerate() {
        let index = i + 1;
        // Scanner only yields entries with UTF-8 names.
        let file_name = input_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let output_path = config.output_dir.join(&file_name);

        if !config.overwrite && output_path.exists() {
            debug!("Skipping {} (output exists)", file_name);
            skipped += 1;
            if let Some(ref cb) = config.progress_callback {
                cb.on_file_skipped(&file_name, index, total);
            }
            files.push(FileResult {
                file_name,
                outcome: FileOutcome::Skipped,
                error: None,
            });
            continue;
        }

        if let Some(ref cb) = config.progress_callback {
            cb.on_file_start(&file_name, index, total);
        }

        match scrub_file(input_path, &output_path) {
            Ok(()) => {
                stripped += 1;
                if let Some(ref cb) = config.progress_callback {
                    cb.on_file_stripped(&file_name, index, total);
                }
                files.push(FileResult {
                    file_name,
                    outcome: FileOutcome::Stripped,
                    error: None,
                });
            }
            Err(e) if config.fail_fast => {
                warn!("Aborting batch: {} failed: {}", file_name, e);
                return Err(e.into());
            }
            Err(e) => {
                warn!("{} failed: {}", file_name, e);
                failed += 1;
                if let Some(ref cb) = config.progress_callback {
                    cb.on_file_error(&file_name, index, total, &e.to_string());
                }
                files.push(FileResult {
                    file_name,
                    outcome: FileOutcome::Failed,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_complete(stripped, skipped, failed);
    }

    // ── Step 4: assemble stats ───────────────────────────────────────────
    let stats = BatchStats {
        candidate_files: total,
        stripped_files: stripped,
        skipped_files: skipped,
        failed_files: failed,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Scrub complete: {} stripped, {} skipped, {} failed in {}ms",
        stats.stripped_files, stats.skipped_files, stats.failed_files, stats.total_duration_ms
    );

    Ok(BatchOutput { files, stats })
}
