//! CLI binary for makesite.
//!
//! A thin shim over the library crate that maps flags to a `SiteConfig`,
//! runs the build, and prints the outcome. Timing and output-size
//! reporting live here; the pipeline itself only counts documents.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use tracing_subscriber::EnvFilter;

use makesite::{
    BuildError, BuildProgress, BuildReport, Builder, NoopProgress, SharedProgress, SiteConfig,
};

// ANSI colour helpers (no extra deps)

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

/// Generate static HTML pages from plain-text posts.
#[derive(Parser)]
#[command(version, group(ArgGroup::new("input").required(true)))]
struct Args {
    /// Convert a single file, echoing the rendered page to stdout
    #[arg(long, group = "input")]
    file: Option<PathBuf>,

    /// Convert every .txt document under a directory
    #[arg(long, group = "input")]
    dir: Option<PathBuf>,

    /// The path to the configuration file (default: makesite.yaml)
    #[arg(short, long)]
    config_file: Option<PathBuf>,

    /// Directory the pages are written to (overrides the config)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Template file used for every page (overrides the config)
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Enable debug-level logs
    #[arg(short, long)]
    verbose: bool,

    /// Suppress everything except errors
    #[arg(short, long)]
    quiet: bool,
}

/// Per-document terminal lines, kept on stderr so stdout stays clean for
/// the single-file echo.
struct ConsoleProgress;

impl BuildProgress for ConsoleProgress {
    fn on_document_converted(&self, source: &Path, output: &Path) {
        eprintln!(
            "  {} {} {} {}",
            green("✓"),
            source.display(),
            dim("->"),
            output.display()
        );
    }

    fn on_document_failed(&self, source: &Path, error: &BuildError) {
        eprintln!(
            "  {} {}  {}",
            red("✗"),
            source.display(),
            red(&error.to_string())
        );
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.quiet {
        "error"
    } else if args.verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let mut config = SiteConfig::load_from_arg(args.config_file.as_deref())
        .context("failed to load configuration")?;
    if let Some(out) = args.out {
        config.output = out;
    }
    if let Some(template) = args.template {
        config.template = template;
    }

    let progress: SharedProgress = if args.quiet {
        Arc::new(NoopProgress)
    } else {
        Arc::new(ConsoleProgress)
    };
    let builder = Builder::new(config).with_progress(progress);

    let started = Instant::now();
    let report = if let Some(file) = &args.file {
        if args.quiet {
            builder.build_file(file, &mut io::sink())
        } else {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            builder.build_file(file, &mut handle)
        }
    } else if let Some(dir) = &args.dir {
        builder.build_dir(dir)
    } else {
        anyhow::bail!("one of --file or --dir is required");
    }
    .context("build failed")?;
    let elapsed = started.elapsed();

    if !args.quiet {
        print_summary(&report, elapsed)?;
    }

    if !report.failures.is_empty() {
        anyhow::bail!("{} document(s) failed", report.failures.len());
    }

    Ok(())
}

fn print_summary(report: &BuildReport, elapsed: Duration) -> Result<()> {
    let bytes = dir_size_bytes(&report.output_dir)
        .with_context(|| format!("failed to measure {}", report.output_dir.display()))?;
    let kb = bytes as f64 / 1024.0;
    let stats = dim(&format!("Wrote {kb:.1} kB in {elapsed:.2?}."));

    if report.failures.is_empty() {
        eprintln!(
            "{} Generated {} HTML page(s) in {}. {}",
            green(&bold("Success!")),
            report.pages,
            report.output_dir.display(),
            stats
        );
    } else {
        eprintln!(
            "{} generated {} HTML page(s), {} document(s) failed. {}",
            red("Finished with errors:"),
            report.pages,
            report.failures.len(),
            stats
        );
    }

    Ok(())
}

/// Total size of everything under `dir`, measured back from disk.
fn dir_size_bytes(dir: &Path) -> io::Result<u64> {
    let mut total = 0;
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let meta = entry.metadata()?;
        if meta.is_dir() {
            total += dir_size_bytes(&entry.path())?;
        } else {
            total += meta.len();
        }
    }
    Ok(total)
}
