//! Configuration for a batch scrub run.
//!
//! All batch behaviour is controlled through [`ScrubConfig`], built via
//! its [`ScrubConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to log a run's exact settings and to diff two runs to
//! understand why their outputs differ.
//!
//! # Design choice: explicit directories, familiar defaults
//! The original tool hardcoded `music_scores/` and `music_scores_no_meta/`.
//! Hardcoded paths make library use and testing impossible, so both
//! directories are ordinary fields here — but they default to the
//! historical names, so a bare `run_batch(&ScrubConfig::default())`
//! behaves exactly like the original script.

use crate::error::ScrubError;
use crate::progress::ProgressCallback;
use std::fmt;
use std::path::PathBuf;

/// Default input directory, kept from the original tool.
pub const DEFAULT_INPUT_DIR: &str = "music_scores";

/// Default output directory, kept from the original tool.
pub const DEFAULT_OUTPUT_DIR: &str = "music_scores_no_meta";

/// Configuration for a batch metadata-scrub run.
///
/// Built via [`ScrubConfig::builder()`] or using
/// [`ScrubConfig::default()`].
///
/// # Example
/// ```rust
/// use pdfscrub::ScrubConfig;
///
/// let config = ScrubConfig::builder()
///     .input_dir("scores")
///     .output_dir("scores_clean")
///     .fail_fast(false)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ScrubConfig {
    /// Directory scanned for qualifying `.pdf` files. No recursion.
    pub input_dir: PathBuf,

    /// Directory the stripped copies are written to. Created (with any
    /// missing parents) if absent.
    pub output_dir: PathBuf,

    /// Re-process files whose output already exists. Default: false.
    ///
    /// The skip guard is what makes re-runs idempotent and crash-resumable:
    /// an output that exists is assumed done and is never re-read or
    /// re-written. Turning this on disables the guard entirely — every
    /// qualifying input is stripped again and its output truncated.
    pub overwrite: bool,

    /// Abort the whole batch on the first per-file failure. Default: true.
    ///
    /// True preserves the original behaviour: one malformed PDF stops the
    /// run. Set to false to isolate failures per file; the run then
    /// continues, counts the failure in [`crate::output::BatchStats`], and
    /// keeps the failed file's error in its [`crate::output::FileResult`].
    pub fail_fast: bool,

    /// Optional per-file progress callback.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ScrubConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            overwrite: false,
            fail_fast: true,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ScrubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrubConfig")
            .field("input_dir", &self.input_dir)
            .field("output_dir", &self.output_dir)
            .field("overwrite", &self.overwrite)
            .field("fail_fast", &self.fail_fast)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn ScrubProgressCallback>"),
            )
            .finish()
    }
}

impl ScrubConfig {
    /// Create a new builder for `ScrubConfig`.
    pub fn builder() -> ScrubConfigBuilder {
        ScrubConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ScrubConfig`].
#[derive(Debug)]
pub struct ScrubConfigBuilder {
    config: ScrubConfig,
}

impl ScrubConfigBuilder {
    pub fn input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.input_dir = dir.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn overwrite(mut self, v: bool) -> Self {
        self.config.overwrite = v;
        self
    }

    pub fn fail_fast(mut self, v: bool) -> Self {
        self.config.fail_fast = v;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    ///
    /// The input and output directories must differ: with the skip guard
    /// active, scrubbing a directory into itself would silently skip every
    /// file, and with `overwrite` on it would truncate inputs in place.
    pub fn build(self) -> Result<ScrubConfig, ScrubError> {
        let c = &self.config;
        if c.input_dir.as_os_str().is_empty() {
            return Err(ScrubError::InvalidConfig(
                "Input directory must not be empty".into(),
            ));
        }
        if c.output_dir.as_os_str().is_empty() {
            return Err(ScrubError::InvalidConfig(
                "Output directory must not be empty".into(),
            ));
        }
        if c.input_dir == c.output_dir {
            return Err(ScrubError::InvalidConfig(format!(
                "Input and output directory must differ, both are '{}'",
                c.input_dir.display()
            )));
        }
        Ok(self.config)
    }
}
