//! Output types and summary-file naming.
//!
//! Everything here is serde-serializable so the CLI can emit a structured
//! run report with `--json` instead of the human-readable summary line.
//!
//! Naming policy: the output file is `summary_<base>.md`, where `<base>` is
//! the arXiv id for downloaded papers and the sanitized source file stem
//! otherwise. Collisions never overwrite — a `_1`, `_2`, … suffix is
//! appended until a free name is found.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where the paper came from, for output naming and reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceInfo {
    /// Local file, identified by its file stem.
    LocalFile { stem: String },
    /// Downloaded from arXiv, identified by the recovered id.
    Arxiv { id: String },
}

impl SourceInfo {
    /// Base name for the output file, sanitized to a safe filename.
    pub fn base_name(&self) -> String {
        match self {
            SourceInfo::LocalFile { stem } => sanitize_file_stem(stem),
            SourceInfo::Arxiv { id } => format!("arxiv_{}", sanitize_file_stem(id)),
        }
    }

    /// Human-readable description for logs and front-matter.
    pub fn describe(&self) -> String {
        match self {
            SourceInfo::LocalFile { stem } => stem.clone(),
            SourceInfo::Arxiv { id } => format!("arXiv:{id}"),
        }
    }
}

/// Statistics for one summarization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStats {
    /// Page count of the source document.
    pub total_pages: usize,
    /// Pages actually handed to the summarizer.
    pub kept_pages: usize,
    /// First references page (0-based), when one was detected.
    pub boundary_page: Option<usize>,
    /// Whether the source was downloaded rather than read locally.
    pub downloaded: bool,
    /// Wall-clock time spent inside the summarizer subprocess.
    pub summarizer_duration_ms: u64,
    /// Wall-clock time for the whole run.
    pub total_duration_ms: u64,
}

/// Result of a summarization run, before any file is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryOutput {
    /// The summary Markdown, tidied but otherwise verbatim from the
    /// summarizer.
    pub summary: String,
    pub source: SourceInfo,
    pub stats: RunStats,
}

/// A summary that has been written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WrittenSummary {
    /// Final path of the Markdown file.
    pub path: PathBuf,
    pub output: SummaryOutput,
}

/// Boundary-detection report, produced without invoking the summarizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionReport {
    pub source: SourceInfo,
    pub total_pages: usize,
    /// First references page (0-based), when one was detected.
    pub boundary_page: Option<usize>,
    /// Pages a truncating run would keep.
    pub kept_pages: usize,
}

/// Default output directory: `~/Documents/papers/summaries/`.
///
/// Falls back to a relative `summaries/` when no home directory can be
/// determined (containers, bare CI environments).
pub fn default_output_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join("Documents").join("papers").join("summaries"))
        .unwrap_or_else(|| PathBuf::from("summaries"))
}

static RE_UNSAFE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9._-]+").unwrap());

/// Reduce an arbitrary string to a safe filename fragment.
///
/// Keeps ASCII alphanumerics plus `.`, `_`, `-`; maps every other run of
/// characters to a single `_`. An empty result becomes `paper` so the
/// output file always has a usable name.
pub fn sanitize_file_stem(raw: &str) -> String {
    let cleaned = RE_UNSAFE.replace_all(raw.trim(), "_");
    let cleaned = cleaned.trim_matches(|c| c == '_' || c == '.');
    if cleaned.is_empty() {
        "paper".to_string()
    } else {
        cleaned.to_string()
    }
}

/// File name for a summary of the given source.
pub fn summary_file_name(source: &SourceInfo) -> String {
    format!("summary_{}.md", source.base_name())
}

/// First non-existing path for `file_name` inside `dir`.
///
/// `summary_x.md` → `summary_x_1.md` → `summary_x_2.md` … Existing work is
/// never overwritten.
pub fn unique_path(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let stem = file_name.strip_suffix(".md").unwrap_or(file_name);
    for n in 1.. {
        let candidate = dir.join(format!("{stem}_{n}.md"));
        if !candidate.exists() {
            return candidate;
        }
    }
    unreachable!("suffix search is unbounded");
}

/// Front-matter block prefixed to the summary when
/// [`crate::config::SummaryConfig::front_matter`] is set.
pub fn front_matter(source: &SourceInfo) -> String {
    format!("---\nsource: {}\ngenerator: papersum\n---\n\n", source.describe())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_safe_chars() {
        assert_eq!(sanitize_file_stem("attention-is-all_you.need"), "attention-is-all_you.need");
    }

    #[test]
    fn sanitize_collapses_unsafe_runs() {
        assert_eq!(sanitize_file_stem("my paper (v2)!"), "my_paper_v2");
    }

    #[test]
    fn sanitize_empty_falls_back() {
        assert_eq!(sanitize_file_stem("   "), "paper");
        assert_eq!(sanitize_file_stem("???"), "paper");
    }

    #[test]
    fn arxiv_base_name() {
        let source = SourceInfo::Arxiv { id: "2507.19457".into() };
        assert_eq!(summary_file_name(&source), "summary_arxiv_2507.19457.md");
    }

    #[test]
    fn local_base_name() {
        let source = SourceInfo::LocalFile { stem: "deep learning".into() };
        assert_eq!(summary_file_name(&source), "summary_deep_learning.md");
    }

    #[test]
    fn unique_path_suffixes_on_collision() {
        let dir = tempfile::tempdir().unwrap();
        let first = unique_path(dir.path(), "summary_x.md");
        assert_eq!(first, dir.path().join("summary_x.md"));

        std::fs::write(&first, "taken").unwrap();
        let second = unique_path(dir.path(), "summary_x.md");
        assert_eq!(second, dir.path().join("summary_x_1.md"));

        std::fs::write(&second, "taken").unwrap();
        let third = unique_path(dir.path(), "summary_x.md");
        assert_eq!(third, dir.path().join("summary_x_2.md"));
    }

    #[test]
    fn front_matter_names_source() {
        let source = SourceInfo::Arxiv { id: "2507.19457".into() };
        let fm = front_matter(&source);
        assert!(fm.starts_with("---\n"));
        assert!(fm.contains("arXiv:2507.19457"));
    }
}
