//! # papersum
//!
//! Summarize academic PDF papers with an external LLM CLI, minus the
//! references section.
//!
//! ## Why this crate?
//!
//! Reference sections are a third of many papers by page count and carry no
//! information a summary needs — feeding them to an LLM wastes tokens and
//! dilutes the summary with bibliography noise. This crate finds the page
//! where the references begin, drops that page and everything after it, and
//! hands the rest to a summarizer CLI (`gemini` by default) with a fixed
//! structured-summary prompt.
//!
//! ## Pipeline Overview
//!
//! ```text
//! source
//!  │
//!  ├─ 1. Input     resolve local file or download from arXiv
//!  ├─ 2. Extract   per-page text via lopdf (CPU-bound, spawn_blocking)
//!  ├─ 3. Boundary  first page with a references/bibliography heading
//!  ├─ 4. Truncate  keep pages before the boundary (scoped temp file)
//!  ├─ 5. Invoke    summarizer subprocess, stdout captured
//!  └─ 6. Write     summary_<paper>.md, atomic rename, never overwrite
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use papersum::{summarize, SummaryConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SummaryConfig::default();
//!     let output = summarize("https://arxiv.org/abs/2507.19457", &config).await?;
//!     println!("{}", output.summary);
//!     eprintln!(
//!         "kept {}/{} pages",
//!         output.stats.kept_pages, output.stats.total_pages
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `papersum` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only
//! deps:
//! ```toml
//! papersum = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod prompts;
pub mod run;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{
    SummarizerSpec, SummaryConfig, SummaryConfigBuilder, DEFAULT_COMMAND, DEFAULT_MODEL,
};
pub use error::SummarizeError;
pub use output::{
    default_output_dir, DetectionReport, RunStats, SourceInfo, SummaryOutput, WrittenSummary,
};
pub use run::{detect, summarize, summarize_to_dir};
