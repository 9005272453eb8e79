//! End-to-end run orchestration.
//!
//! Control flow is strictly linear — resolve, extract, detect, truncate,
//! invoke — with no state retained across runs. The only suspension points
//! are the download and the summarizer subprocess; everything CPU-bound
//! runs in `spawn_blocking` inside its stage. Temp files (a downloaded PDF,
//! the truncated document) are owned by values on this function's stack, so
//! every exit path — success, error, panic, cancellation — cleans them up.

use crate::config::SummaryConfig;
use crate::error::SummarizeError;
use crate::output::{self, DetectionReport, RunStats, SummaryOutput, WrittenSummary};
use crate::pipeline::boundary::{self, HeadingMatcher};
use crate::pipeline::{extract, input, invoke, truncate};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Summarize a paper from a local path or arXiv URL.
///
/// This is the primary entry point for the library: it produces the
/// summary in memory without writing any output file.
///
/// # Errors
/// Any stage failure is terminal and returned as a [`SummarizeError`];
/// there are no retries.
pub async fn summarize(
    input_str: impl AsRef<str>,
    config: &SummaryConfig,
) -> Result<SummaryOutput, SummarizeError> {
    let total_start = Instant::now();
    let input_str = input_str.as_ref();
    info!("Summarizing: {}", input_str);

    // ── Step 1: Resolve input ────────────────────────────────────────────
    let resolved = input::resolve_input(input_str, config.download_timeout_secs).await?;
    let source = resolved.source().clone();
    let downloaded = resolved.is_downloaded();

    // ── Step 2: Extract per-page text ────────────────────────────────────
    let pages = extract::extract_page_texts(resolved.path()).await?;
    let total_pages = pages.len();
    info!("PDF has {} pages", total_pages);

    // ── Step 3: Detect the reference boundary ────────────────────────────
    let matcher = HeadingMatcher::new(&config.heading_labels)?;
    let boundary_page = boundary::find_boundary(&pages, &matcher, config.min_boundary_fraction);

    // ── Step 4: Truncate when a usable boundary exists ───────────────────
    // A boundary at page 0 would leave nothing to summarize; the original
    // document is passed through instead.
    let truncated = match boundary_page {
        Some(b) if config.truncate && b > 0 => {
            info!("References start on page {b}; keeping pages 0..{b}");
            Some(truncate::truncate_document(resolved.path(), b).await?)
        }
        Some(b) => {
            debug!("References on page {b} but truncation is off or boundary unusable");
            None
        }
        None => {
            info!("No references heading found; using the full document");
            None
        }
    };

    let (target_path, kept_pages) = match &truncated {
        Some(t) => (t.path(), t.kept_pages()),
        None => (resolved.path(), total_pages),
    };

    // ── Step 5: Invoke the summarizer ────────────────────────────────────
    let run = invoke::run_summarizer(target_path, config).await?;

    let stats = RunStats {
        total_pages,
        kept_pages,
        boundary_page,
        downloaded,
        summarizer_duration_ms: run.duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Summarized {} ({} bytes, {}ms total)",
        source.describe(),
        run.summary.len(),
        stats.total_duration_ms
    );

    Ok(SummaryOutput {
        summary: run.summary,
        source,
        stats,
    })
}

/// Summarize a paper and write the result into `dir`.
///
/// The directory is created if absent. The file name derives from the
/// paper's identity (`summary_<stem>.md` / `summary_arxiv_<id>.md`) and is
/// collision-suffixed rather than overwritten. The write is atomic (temp
/// file + rename) so a crash never leaves a partial summary.
pub async fn summarize_to_dir(
    input_str: impl AsRef<str>,
    dir: impl AsRef<Path>,
    config: &SummaryConfig,
) -> Result<WrittenSummary, SummarizeError> {
    let out = summarize(input_str, config).await?;
    let dir = dir.as_ref();

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| SummarizeError::OutputWriteFailed {
            path: dir.to_path_buf(),
            source: e,
        })?;

    let path = output::unique_path(dir, &output::summary_file_name(&out.source));

    let mut contents = String::new();
    if config.front_matter {
        contents.push_str(&output::front_matter(&out.source));
    }
    contents.push_str(&out.summary);

    let tmp_path = path.with_extension("md.tmp");
    tokio::fs::write(&tmp_path, &contents)
        .await
        .map_err(|e| SummarizeError::OutputWriteFailed {
            path: path.clone(),
            source: e,
        })?;

    tokio::fs::rename(&tmp_path, &path)
        .await
        .map_err(|e| SummarizeError::OutputWriteFailed {
            path: path.clone(),
            source: e,
        })?;

    info!("Summary saved to: {}", path.display());

    Ok(WrittenSummary { path, output: out })
}

/// Report where the reference boundary falls, without summarizing.
///
/// Runs resolve + extract + detect only; needs no summarizer binary and
/// no API key. Backs the CLI's `--detect-only` mode.
pub async fn detect(
    input_str: impl AsRef<str>,
    config: &SummaryConfig,
) -> Result<DetectionReport, SummarizeError> {
    let resolved =
        input::resolve_input(input_str.as_ref(), config.download_timeout_secs).await?;
    let pages = extract::extract_page_texts(resolved.path()).await?;

    let matcher = HeadingMatcher::new(&config.heading_labels)?;
    let boundary_page = boundary::find_boundary(&pages, &matcher, config.min_boundary_fraction);

    let total_pages = pages.len();
    let kept_pages = match boundary_page {
        Some(b) if b > 0 => b,
        _ => total_pages,
    };

    Ok(DetectionReport {
        source: resolved.source().clone(),
        total_pages,
        boundary_page,
        kept_pages,
    })
}
