//! # pdfscrub
//!
//! Strip document metadata from PDF files in bulk.
//!
//! ## Why this crate?
//!
//! PDFs accumulate identifying metadata — author, title, producer,
//! creation timestamps, and arbitrary custom fields — that survives
//! copying and sharing. This crate rewrites each PDF in an input
//! directory into an output directory with the same pages and an
//! explicitly empty metadata record, skipping files already processed so
//! repeated runs are cheap and resumable.
//!
//! ## Pipeline Overview
//!
//! ```text
//! input dir
//!  │
//!  ├─ 1. Scan    list entries, keep case-insensitive *.pdf files
//!  ├─ 2. Guard   output exists?  yes → skip, no → strip
//!  ├─ 3. Strip   parse via lopdf, attach empty Info, drop XMP
//!  └─ 4. Write   atomic tmp-then-rename into the output dir
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdfscrub::{run_batch, ScrubConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ScrubConfig::builder()
//!         .input_dir("music_scores")
//!         .output_dir("music_scores_no_meta")
//!         .build()?;
//!     let output = run_batch(&config)?;
//!     eprintln!(
//!         "{} stripped / {} skipped",
//!         output.stats.stripped_files, output.stats.skipped_files
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdfscrub` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! pdfscrub = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod batch;
pub mod config;
pub mod error;
pub mod inspect;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod strip;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use batch::run_batch;
pub use config::{ScrubConfig, ScrubConfigBuilder, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR};
pub use error::{FileError, ScrubError};
pub use inspect::inspect;
pub use output::{BatchOutput, BatchStats, DocumentMetadata, FileOutcome, FileResult};
pub use progress::{NoopProgressCallback, ProgressCallback, ScrubProgressCallback};
pub use strip::{scrub_bytes, scrub_file};
