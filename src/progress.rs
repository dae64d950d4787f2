//! Progress-callback trait for per-file batch events.
//!
//! Inject an [`Arc<dyn ScrubProgressCallback>`] via
//! [`crate::config::ScrubConfigBuilder::progress_callback`] to receive
//! events as the driver works through the input directory.
//!
//! # Why callbacks instead of channels?
//!
//! The callback approach is the least-invasive integration point: callers
//! can forward events to a channel, a database record, or a terminal
//! progress bar — without the library knowing anything about how the host
//! application communicates. The batch driver is strictly sequential, so
//! events for one file always arrive before any event for the next.

use std::sync::Arc;

/// Called by the batch driver as it works through the input directory.
///
/// All methods have default no-op implementations so callers only
/// override what they care about. The trait is `Send + Sync` so a single
/// callback can be shared with logging or UI threads even though the
/// driver itself never calls it concurrently.
pub trait ScrubProgressCallback: Send + Sync {
    /// Called once after scanning, before any file is processed.
    ///
    /// # Arguments
    /// * `total_files` — number of qualifying `.pdf` files found
    fn on_batch_start(&self, total_files: usize) {
        let _ = total_files;
    }

    /// Called just before a file is opened for stripping.
    fn on_file_start(&self, file_name: &str, index: usize, total: usize) {
        let _ = (file_name, index, total);
    }

    /// Called when a file's stripped copy has been written.
    fn on_file_stripped(&self, file_name: &str, index: usize, total: usize) {
        let _ = (file_name, index, total);
    }

    /// Called when a file is skipped because its output already exists.
    fn on_file_skipped(&self, file_name: &str, index: usize, total: usize) {
        let _ = (file_name, index, total);
    }

    /// Called when a file fails (only reached in keep-going mode; under
    /// fail-fast the error aborts the batch before this event fires).
    fn on_file_error(&self, file_name: &str, index: usize, total: usize, error: &str) {
        let _ = (file_name, index, total, error);
    }

    /// Called once after every file has been attempted.
    fn on_batch_complete(&self, stripped: usize, skipped: usize, failed: usize) {
        let _ = (stripped, skipped, failed);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ScrubProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ScrubConfig`].
pub type ProgressCallback = Arc<dyn ScrubProgressCallback>;
