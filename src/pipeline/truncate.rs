//! Document truncation: keep the pages before the reference boundary.
//!
//! The truncated document is written to a [`tempfile::NamedTempFile`] owned
//! by the returned [`TruncatedPdf`], so it disappears when the value is
//! dropped — success, error, or panic. Page content and ordering of the
//! kept pages are untouched; lopdf rewrites the container, not the content
//! streams.

use crate::error::SummarizeError;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// A truncated document living in a scoped temp file.
pub struct TruncatedPdf {
    file: NamedTempFile,
    kept_pages: usize,
}

impl TruncatedPdf {
    /// Path to the truncated PDF, valid for this value's lifetime.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Number of pages the truncated document contains.
    pub fn kept_pages(&self) -> usize {
        self.kept_pages
    }
}

/// Write pages `[0, boundary)` of `pdf_path` to a scoped temp file.
///
/// `boundary` must satisfy `1 <= boundary <= page_count`; the caller
/// decides pass-through for the no-boundary and boundary-zero cases.
pub async fn truncate_document(
    pdf_path: &Path,
    boundary: usize,
) -> Result<TruncatedPdf, SummarizeError> {
    let path = pdf_path.to_path_buf();
    tokio::task::spawn_blocking(move || truncate_blocking(&path, boundary))
        .await
        .map_err(|e| SummarizeError::Internal(format!("Truncation task panicked: {e}")))?
}

/// Blocking implementation of page-range truncation.
fn truncate_blocking(path: &Path, boundary: usize) -> Result<TruncatedPdf, SummarizeError> {
    let mut doc = lopdf::Document::load(path).map_err(|e| SummarizeError::CorruptPdf {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;

    let total = doc.get_pages().len();
    if total == 0 {
        return Err(SummarizeError::EmptyDocument {
            path: path.to_path_buf(),
        });
    }
    if boundary == 0 || boundary > total {
        return Err(SummarizeError::Internal(format!(
            "Boundary {boundary} out of range for a {total}-page document"
        )));
    }

    // lopdf page numbers are 1-based: dropping pages boundary+1..=total
    // keeps exactly the 0-based range [0, boundary).
    let dropped: Vec<u32> = ((boundary as u32) + 1..=(total as u32)).collect();
    if !dropped.is_empty() {
        doc.delete_pages(&dropped);
        doc.prune_objects();
    }

    let kept_pages = doc.get_pages().len();
    debug!("Kept {kept_pages}/{total} pages");

    let file = tempfile::Builder::new()
        .prefix("papersum-")
        .suffix(".pdf")
        .tempfile()
        .map_err(|e| SummarizeError::TruncationFailed {
            detail: format!("tempfile: {e}"),
        })?;

    doc.save(file.path())
        .map_err(|e| SummarizeError::TruncationFailed {
            detail: e.to_string(),
        })?;

    info!(
        "Truncated document written to {} ({kept_pages} pages)",
        file.path().display()
    );

    Ok(TruncatedPdf { file, kept_pages })
}
