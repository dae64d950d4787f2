//! CLI binary for pdfscrub.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ScrubConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdfscrub::{
    inspect, run_batch, ProgressCallback, ScrubConfig, ScrubProgressCallback,
    DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR,
};
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

/// First line of `error`, shortened to at most `max` characters with a
/// trailing ellipsis. Counted in characters, not bytes: error strings
/// embed file names, which are routinely non-ASCII.
fn first_line_truncated(error: &str, max: usize) -> String {
    let first_line = error.lines().next().unwrap_or(error);
    if first_line.chars().count() > max {
        let mut msg: String = first_line.chars().take(max - 1).collect();
        msg.push('\u{2026}');
        msg
    } else {
        first_line.to_string()
    }
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: renders a live progress bar and per-file
/// log lines using [indicatif]. Files are processed strictly in order,
/// so no per-file bookkeeping beyond the error counter is needed.
struct CliProgressCallback {
    /// The single progress bar anchored at the bottom of the terminal.
    bar: ProgressBar,
    /// Count of files that errored out (keep-going mode only).
    errors: AtomicUsize,
}

impl CliProgressCallback {
    /// Create a callback whose progress-bar length is set dynamically
    /// by `on_batch_start` (called once scanning is done).
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_batch_start

        // Initial style: spinner only (no counter until we know the total).
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Scanning");
        bar.set_message("Listing input directory…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            errors: AtomicUsize::new(0),
        })
    }

    /// Switch to the full progress-bar style once we know `total`.
    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} files  \
             ⏱ {elapsed_precise}  ETA {eta_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Scrubbing");
        self.bar.reset_eta();
    }
}

impl ScrubProgressCallback for CliProgressCallback {
    fn on_batch_start(&self, total_files: usize) {
        self.activate_bar(total_files);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Scrubbing metadata from {total_files} file(s)…"))
        ));
    }

    fn on_file_start(&self, file_name: &str, _index: usize, _total: usize) {
        self.bar.set_message(file_name.to_string());
    }

    fn on_file_stripped(&self, file_name: &str, index: usize, total: usize) {
        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {}",
            green("✓"),
            index,
            total,
            file_name,
        ));
        self.bar.inc(1);
    }

    fn on_file_skipped(&self, file_name: &str, index: usize, total: usize) {
        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {}  {}",
            dim("·"),
            index,
            total,
            file_name,
            dim("(output exists, skipped)"),
        ));
        self.bar.inc(1);
    }

    fn on_file_error(&self, file_name: &str, index: usize, total: usize, error: &str) {
        self.errors.fetch_add(1, Ordering::SeqCst);

        let msg = first_line_truncated(error, 80);

        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {}  {}",
            red("✗"),
            index,
            total,
            file_name,
            red(&msg),
        ));
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, stripped: usize, skipped: usize, failed: usize) {
        self.bar.finish_and_clear();

        if failed == 0 {
            eprintln!(
                "{} {} stripped, {} skipped",
                green("✔"),
                bold(&stripped.to_string()),
                skipped,
            );
        } else {
            eprintln!(
                "{} {} stripped, {} skipped  ({} failed)",
                if stripped == 0 { red("✘") } else { cyan("⚠") },
                bold(&stripped.to_string()),
                skipped,
                red(&failed.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Strip every PDF in music_scores/ into music_scores_no_meta/
  pdfscrub

  # Explicit directories
  pdfscrub scans scans_clean

  # Re-process files whose output already exists
  pdfscrub --force

  # Don't stop at the first corrupt file; report a summary instead
  pdfscrub --keep-going

  # Machine-readable run summary
  pdfscrub --json > run.json

  # Show a single file's metadata without writing anything
  pdfscrub --inspect-only music_scores/sonata.pdf

BEHAVIOUR:
  Only entries directly inside the input directory are considered
  (no recursion); a file qualifies when its name ends in .pdf,
  case-insensitively. An output file that already exists is skipped
  without being re-read, so re-running after a crash resumes where the
  previous run stopped.

ENVIRONMENT VARIABLES:
  PDFSCRUB_INPUT_DIR    Input directory (same as the first positional)
  PDFSCRUB_OUTPUT_DIR   Output directory (same as the second positional)
  PDFSCRUB_FORCE        Re-process existing outputs
  PDFSCRUB_KEEP_GOING   Isolate per-file failures
"#;

/// Strip document metadata from PDF files in bulk.
#[derive(Parser, Debug)]
#[command(
    name = "pdfscrub",
    version,
    about = "Strip document metadata from PDF files in bulk",
    long_about = "Copy every PDF from an input directory into an output directory with the \
same pages and an explicitly empty metadata record (no title, author, producer, timestamps, \
or custom fields). Outputs that already exist are skipped, so re-runs are cheap and resumable.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input directory containing the PDFs (or a single file with --inspect-only).
    #[arg(env = "PDFSCRUB_INPUT_DIR", default_value = DEFAULT_INPUT_DIR)]
    input: PathBuf,

    /// Output directory for the stripped copies; created if missing.
    #[arg(env = "PDFSCRUB_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Re-process files whose output already exists (disables the skip guard).
    #[arg(short, long, env = "PDFSCRUB_FORCE")]
    force: bool,

    /// Continue past per-file failures and report a summary at the end.
    #[arg(short, long, env = "PDFSCRUB_KEEP_GOING")]
    keep_going: bool,

    /// Output a structured JSON run summary instead of log lines.
    #[arg(long, env = "PDFSCRUB_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "PDFSCRUB_NO_PROGRESS")]
    no_progress: bool,

    /// Print a PDF's metadata only, no scrubbing (INPUT is a file).
    #[arg(long)]
    inspect_only: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDFSCRUB_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDFSCRUB_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs while the progress bar is active;
    // the bar provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let meta = inspect(&cli.input)
            .with_context(|| format!("Failed to inspect '{}'", cli.input.display()))?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&meta).context("Failed to serialize metadata")?
            );
        } else {
            println!("File:         {}", cli.input.display());
            if let Some(ref t) = meta.title {
                println!("Title:        {}", t);
            }
            if let Some(ref a) = meta.author {
                println!("Author:       {}", a);
            }
            if let Some(ref s) = meta.subject {
                println!("Subject:      {}", s);
            }
            if let Some(ref k) = meta.keywords {
                println!("Keywords:     {}", k);
            }
            if let Some(ref c) = meta.creator {
                println!("Creator:      {}", c);
            }
            if let Some(ref p) = meta.producer {
                println!("Producer:     {}", p);
            }
            if let Some(ref d) = meta.creation_date {
                println!("Created:      {}", d);
            }
            if let Some(ref d) = meta.modification_date {
                println!("Modified:     {}", d);
            }
            for (key, value) in &meta.custom {
                println!("{:<13} {}", format!("{key}:"), value);
            }
            println!("Pages:        {}", meta.page_count);
            println!("PDF Version:  {}", meta.pdf_version);
            println!("Encrypted:    {}", meta.is_encrypted);
            if meta.is_empty() {
                println!("{}", dim("(metadata record is empty)"));
            }
        }
        return Ok(());
    }

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        let cb = CliProgressCallback::new_dynamic();
        Some(cb as Arc<dyn ScrubProgressCallback>)
    } else {
        None
    };

    let mut builder = ScrubConfig::builder()
        .input_dir(&cli.input)
        .output_dir(&cli.output)
        .overwrite(cli.force)
        .fail_fast(!cli.keep_going);
    if let Some(cb) = progress_cb {
        builder = builder.progress_callback(cb);
    }
    let config = builder.build().context("Invalid configuration")?;

    // ── Run batch ────────────────────────────────────────────────────────
    let output = run_batch(&config).context("Scrub failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
    } else if !cli.quiet && !show_progress {
        // Only print inline stats when the progress callback is disabled
        // (the callback already printed the final green/red tick).
        eprintln!(
            "Stripped {}/{} files ({} skipped) in {}ms",
            output.stats.stripped_files,
            output.stats.candidate_files,
            output.stats.skipped_files,
            output.stats.total_duration_ms
        );
        if output.stats.failed_files > 0 {
            eprintln!("  {} file(s) failed", output.stats.failed_files);
        }
    }

    // Keep-going runs still exit non-zero when anything failed.
    if output.stats.failed_files > 0 {
        anyhow::bail!("{} file(s) failed during scrub", output.stats.failed_files);
    }

    Ok(())
}
