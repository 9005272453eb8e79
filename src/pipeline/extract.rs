//! Per-page text extraction via lopdf.
//!
//! ## Why spawn_blocking?
//!
//! Parsing a PDF and decoding its content streams is CPU-bound work that
//! can take a noticeable fraction of a second on large documents.
//! `tokio::task::spawn_blocking` moves it onto the blocking thread pool so
//! the runtime's worker threads are not stalled.
//!
//! A page whose text cannot be decoded (exotic font encodings, image-only
//! scans) yields an empty string rather than failing the run — the boundary
//! detector simply finds nothing to match on that page.

use crate::error::SummarizeError;
use std::path::Path;
use tracing::{debug, warn};

/// The extracted text of one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// 0-based index, physical order in the document.
    pub index: usize,
    pub text: String,
}

/// Extract the text of every page, in physical order.
pub async fn extract_page_texts(pdf_path: &Path) -> Result<Vec<PageText>, SummarizeError> {
    let path = pdf_path.to_path_buf();
    tokio::task::spawn_blocking(move || extract_blocking(&path))
        .await
        .map_err(|e| SummarizeError::Internal(format!("Extraction task panicked: {e}")))?
}

/// Blocking implementation of page-text extraction.
fn extract_blocking(path: &Path) -> Result<Vec<PageText>, SummarizeError> {
    let doc = lopdf::Document::load(path).map_err(|e| SummarizeError::CorruptPdf {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;

    // lopdf numbers pages from 1 in physical order.
    let pages = doc.get_pages();
    if pages.is_empty() {
        return Err(SummarizeError::EmptyDocument {
            path: path.to_path_buf(),
        });
    }

    let mut out = Vec::with_capacity(pages.len());
    for (index, (&page_num, _)) in pages.iter().enumerate() {
        let text = match doc.extract_text(&[page_num]) {
            Ok(t) => t,
            Err(e) => {
                warn!("Page {page_num}: text extraction failed ({e}); treating as empty");
                String::new()
            }
        };
        out.push(PageText { index, text });
    }

    debug!("Extracted text from {} pages", out.len());
    Ok(out)
}
