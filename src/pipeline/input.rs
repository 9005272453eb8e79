//! Input resolution: normalise a user-supplied path or URL to a local PDF.
//!
//! ## Why download to a temp file?
//!
//! lopdf and the external summarizer both want a file-system path.
//! Downloading into a `TempDir` gives us a path while ensuring cleanup
//! happens automatically when `ResolvedInput` is dropped, even if the
//! process panics. We validate the PDF magic bytes (`%PDF`) before
//! returning so callers get a meaningful error rather than a parser crash.
//!
//! Only arXiv URLs are accepted. Abstract links are canonicalised to the
//! PDF link (`/abs/<id>` → `/pdf/<id>`), so both forms download the same
//! document, and the arXiv id is recovered from the path to name the
//! output file.

use crate::error::SummarizeError;
use crate::output::SourceInfo;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info};

/// The resolved input — either a local path or a downloaded temp file.
#[derive(Debug)]
pub enum ResolvedInput {
    /// Input was already a local file.
    Local { path: PathBuf, source: SourceInfo },
    /// Input was an arXiv URL; PDF downloaded to a temp directory.
    /// The `TempDir` is kept alive to prevent cleanup until processing
    /// completes.
    Downloaded {
        path: PathBuf,
        source: SourceInfo,
        _temp_dir: TempDir,
    },
}

impl ResolvedInput {
    /// Path to the PDF file regardless of how it was resolved.
    pub fn path(&self) -> &Path {
        match self {
            ResolvedInput::Local { path, .. } => path,
            ResolvedInput::Downloaded { path, .. } => path,
        }
    }

    /// Identity of the paper, for output naming.
    pub fn source(&self) -> &SourceInfo {
        match self {
            ResolvedInput::Local { source, .. } => source,
            ResolvedInput::Downloaded { source, .. } => source,
        }
    }

    pub fn is_downloaded(&self) -> bool {
        matches!(self, ResolvedInput::Downloaded { .. })
    }
}

/// Check if the input string looks like a URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

// New-style ids (2007+): YYMM.NNNNN, optional version. Old style: archive/NNNNNNN.
static RE_ARXIV_NEW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4}\.\d{4,5})(?:v\d+)?").unwrap());
static RE_ARXIV_OLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z\-]+/\d{7})").unwrap());

/// Recover the arXiv identifier from an abstract or PDF URL.
pub fn arxiv_id_from_url(url: &str) -> Option<String> {
    if let Some(caps) = RE_ARXIV_NEW.captures(url) {
        return caps.get(1).map(|m| m.as_str().to_string());
    }
    if let Some(caps) = RE_ARXIV_OLD.captures(url) {
        return caps.get(1).map(|m| m.as_str().to_string());
    }
    None
}

/// Map an arXiv abstract URL to the corresponding PDF URL.
///
/// `https://arxiv.org/abs/2507.19457` → `https://arxiv.org/pdf/2507.19457`;
/// PDF URLs pass through unchanged.
pub fn canonical_pdf_url(url: &str) -> String {
    url.replace("/abs/", "/pdf/")
}

/// Resolve the input string to a local PDF file path.
///
/// If the input is an arXiv URL, download it to a temporary directory.
/// If the input is a local file, validate it exists and is a PDF.
pub async fn resolve_input(
    input: &str,
    timeout_secs: u64,
) -> Result<ResolvedInput, SummarizeError> {
    if is_url(input) {
        download_arxiv(input, timeout_secs).await
    } else {
        resolve_local(input)
    }
}

/// Resolve a local file path, validating existence and PDF magic bytes.
fn resolve_local(path_str: &str) -> Result<ResolvedInput, SummarizeError> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(SummarizeError::FileNotFound { path });
    }

    match std::fs::File::open(&path) {
        Ok(mut f) => {
            use std::io::Read;
            let mut magic = [0u8; 4];
            if f.read_exact(&mut magic).is_ok() && &magic != b"%PDF" {
                return Err(SummarizeError::NotAPdf { path, magic });
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(SummarizeError::PermissionDenied { path });
        }
        Err(_) => {
            return Err(SummarizeError::FileNotFound { path });
        }
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "paper".to_string());

    debug!("Resolved local PDF: {}", path.display());
    Ok(ResolvedInput::Local {
        path,
        source: SourceInfo::LocalFile { stem },
    })
}

/// Download an arXiv URL to a temporary directory and return the path.
async fn download_arxiv(url: &str, timeout_secs: u64) -> Result<ResolvedInput, SummarizeError> {
    let parsed = reqwest::Url::parse(url).map_err(|_| SummarizeError::InvalidInput {
        input: url.to_string(),
    })?;
    let host = parsed.host_str().unwrap_or("");
    if host != "arxiv.org" && !host.ends_with(".arxiv.org") {
        return Err(SummarizeError::UnsupportedUrl {
            url: url.to_string(),
        });
    }

    let arxiv_id = arxiv_id_from_url(url).ok_or_else(|| SummarizeError::InvalidInput {
        input: url.to_string(),
    })?;
    let pdf_url = canonical_pdf_url(url);
    info!("Downloading PDF from: {}", pdf_url);

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| SummarizeError::DownloadFailed {
            url: pdf_url.clone(),
            reason: e.to_string(),
        })?;

    let response = client.get(&pdf_url).send().await.map_err(|e| {
        if e.is_timeout() {
            SummarizeError::DownloadTimeout {
                url: pdf_url.clone(),
                secs: timeout_secs,
            }
        } else {
            SummarizeError::DownloadFailed {
                url: pdf_url.clone(),
                reason: e.to_string(),
            }
        }
    })?;

    if !response.status().is_success() {
        return Err(SummarizeError::DownloadFailed {
            url: pdf_url.clone(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| SummarizeError::DownloadFailed {
            url: pdf_url.clone(),
            reason: e.to_string(),
        })?;

    let temp_dir = TempDir::new().map_err(|e| SummarizeError::Internal(e.to_string()))?;
    let file_path = temp_dir
        .path()
        .join(format!("{}.pdf", arxiv_id.replace('/', "_")));

    // Verify PDF magic bytes before writing anything.
    if bytes.len() < 4 || &bytes[..4] != b"%PDF" {
        let mut magic = [0u8; 4];
        let n = bytes.len().min(4);
        magic[..n].copy_from_slice(&bytes[..n]);
        return Err(SummarizeError::NotAPdf {
            path: file_path,
            magic,
        });
    }

    tokio::fs::write(&file_path, &bytes)
        .await
        .map_err(|e| SummarizeError::Internal(format!("Failed to write temp file: {e}")))?;

    info!("Downloaded to: {}", file_path.display());

    Ok(ResolvedInput::Downloaded {
        path: file_path,
        source: SourceInfo::Arxiv { id: arxiv_id },
        _temp_dir: temp_dir,
    })
}
