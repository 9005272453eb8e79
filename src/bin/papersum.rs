//! CLI binary for papersum.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `SummaryConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use papersum::config::DEFAULT_HEADING_LABELS;
use papersum::{
    default_output_dir, detect, summarize_to_dir, SummarizerSpec, SummaryConfig, DEFAULT_COMMAND,
    DEFAULT_MODEL,
};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Summarize a local paper into ~/Documents/papers/summaries/
  papersum paper.pdf

  # Summarize straight from arXiv (abstract and PDF links both work)
  papersum https://arxiv.org/abs/2507.19457
  papersum https://arxiv.org/pdf/2507.19457

  # Choose the model, bound the wait
  papersum --model gemini-2.5-pro --timeout 120 paper.pdf

  # Use an agent profile instead of a model
  papersum --agent research-assistant paper.pdf

  # Where do the references start? (no LLM call, no API key)
  papersum --detect-only paper.pdf

  # Keep the references pages in the summarized document
  papersum --keep-references paper.pdf

  # Recognise an extra heading, write a JSON run report
  papersum --label "bibliografía" --json paper.pdf

ENVIRONMENT VARIABLES:
  PAPERSUM_DIR                Output directory override
  PAPERSUM_MODEL              Summarizer model
  PAPERSUM_COMMAND            Summarizer binary (default: gemini)
  PAPERSUM_TIMEOUT            Summarizer timeout in seconds

SETUP:
  1. Install and authenticate the summarizer CLI (default: gemini).
  2. Summarize:  papersum paper.pdf

  The references section and every page after it are stripped before the
  document reaches the summarizer, so bibliography noise never lands in
  the summary. Use --keep-references when an appendix after the
  references matters.
"#;

/// Summarize academic PDF papers, minus the references section.
#[derive(Parser, Debug)]
#[command(
    name = "papersum",
    version,
    about = "Summarize academic PDF papers with an external LLM CLI, minus the references section",
    long_about = "Summarize an academic paper (local PDF or arXiv URL) with an external LLM CLI. \
The references section and all following pages are detected and stripped before the document \
is handed to the summarizer; the structured Markdown summary lands in the output directory.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF file path or arXiv URL (abstract or PDF link).
    source: String,

    /// Output directory for the summary [default: ~/Documents/papers/summaries/].
    #[arg(short, long, env = "PAPERSUM_DIR")]
    dir: Option<PathBuf>,

    /// Summarizer model name (e.g. gemini-2.5-flash, gemini-2.5-pro).
    #[arg(long, env = "PAPERSUM_MODEL", conflicts_with = "agent",
          long_help = "Summarizer model passed through as --model. Default: gemini-2.5-flash.")]
    model: Option<String>,

    /// Summarizer agent profile, passed through as --agent.
    #[arg(long, env = "PAPERSUM_AGENT")]
    agent: Option<String>,

    /// Summarizer binary to invoke.
    #[arg(long, env = "PAPERSUM_COMMAND", default_value = DEFAULT_COMMAND)]
    summarizer: String,

    /// Path to a text file containing a custom instruction prompt.
    #[arg(long, env = "PAPERSUM_PROMPT")]
    prompt: Option<PathBuf>,

    /// Summarizer timeout in seconds (waits indefinitely when omitted).
    #[arg(long, env = "PAPERSUM_TIMEOUT")]
    timeout: Option<u64>,

    /// HTTP download timeout in seconds.
    #[arg(long, env = "PAPERSUM_DOWNLOAD_TIMEOUT", default_value_t = 120)]
    download_timeout: u64,

    /// Fraction of leading pages never classified as references.
    #[arg(long, env = "PAPERSUM_MIN_FRACTION", default_value_t = 0.1)]
    min_fraction: f64,

    /// Extra references-heading label (repeatable), e.g. --label "bibliografía".
    #[arg(long = "label", value_name = "LABEL")]
    labels: Vec<String>,

    /// Keep the references pages (skip truncation).
    #[arg(long)]
    keep_references: bool,

    /// Report the detected boundary and exit, without summarizing.
    #[arg(long)]
    detect_only: bool,

    /// Prefix the written summary with a source front-matter block.
    #[arg(long, env = "PAPERSUM_FRONT_MATTER")]
    front_matter: bool,

    /// Print a JSON run report to stdout.
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PAPERSUM_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PAPERSUM_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the spinner is active; the
    // spinner plus the final summary line are all the feedback that
    // matters. Verbose mode always wins.
    let show_spinner = !cli.quiet && !cli.json && !cli.detect_only;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_spinner {
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

    let config = build_config(&cli).await?;

    // ── Detect-only mode ─────────────────────────────────────────────────
    if cli.detect_only {
        let report = detect(&cli.source, &config)
            .await
            .context("Boundary detection failed")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?
            );
        } else {
            println!("Source:     {}", report.source.describe());
            println!("Pages:      {}", report.total_pages);
            match report.boundary_page {
                Some(b) => println!(
                    "References: page {} — a summarizing run keeps {} pages",
                    b, report.kept_pages
                ),
                None => println!("References: not found — the full document passes through"),
            }
        }
        return Ok(());
    }

    // ── Run ──────────────────────────────────────────────────────────────
    let dir = cli.dir.clone().unwrap_or_else(default_output_dir);

    let spinner = if show_spinner {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_prefix("Summarizing");
        bar.set_message(cli.source.clone());
        bar.enable_steady_tick(Duration::from_millis(80));
        Some(bar)
    } else {
        None
    };

    let result = summarize_to_dir(&cli.source, &dir, &config).await;

    if let Some(ref bar) = spinner {
        bar.finish_and_clear();
    }

    let written = result.context("Summarization failed")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&written).context("Failed to serialize run report")?
        );
    } else if !cli.quiet {
        let stats = &written.output.stats;
        eprintln!(
            "{} {}",
            green("✔"),
            bold(&written.path.display().to_string())
        );
        let boundary = match stats.boundary_page {
            Some(b) => format!("references from page {b}"),
            None => "no references section found".to_string(),
        };
        eprintln!(
            "   {}",
            dim(&format!(
                "kept {}/{} pages ({boundary}), {:.1}s",
                stats.kept_pages,
                stats.total_pages,
                stats.total_duration_ms as f64 / 1000.0
            ))
        );
    }

    Ok(())
}

/// Map CLI args to `SummaryConfig`.
async fn build_config(cli: &Cli) -> Result<SummaryConfig> {
    let mut builder = SummaryConfig::builder()
        .summarizer_command(&cli.summarizer)
        .min_boundary_fraction(cli.min_fraction)
        .truncate(!cli.keep_references)
        .download_timeout_secs(cli.download_timeout)
        .front_matter(cli.front_matter);

    if let Some(ref agent) = cli.agent {
        builder = builder.summarizer(SummarizerSpec::Agent(agent.clone()));
    } else if let Some(ref model) = cli.model {
        builder = builder.summarizer(SummarizerSpec::Model(model.clone()));
    } else {
        builder = builder.summarizer(SummarizerSpec::Model(DEFAULT_MODEL.to_string()));
    }

    if let Some(secs) = cli.timeout {
        builder = builder.summarizer_timeout_secs(secs);
    }

    if !cli.labels.is_empty() {
        let labels: Vec<String> = DEFAULT_HEADING_LABELS
            .iter()
            .map(|s| s.to_string())
            .chain(cli.labels.iter().cloned())
            .collect();
        builder = builder.heading_labels(labels);
    }

    if let Some(ref path) = cli.prompt {
        let prompt = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read prompt from {path:?}"))?;
        builder = builder.prompt(prompt);
    }

    builder.build().context("Invalid configuration")
}
