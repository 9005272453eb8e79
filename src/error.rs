//! Error types for the papersum library.
//!
//! A single run is all-or-nothing: every failure is terminal and surfaces as
//! one [`SummarizeError`] variant with a message the user can act on. There
//! is deliberately no retry machinery anywhere — a one-shot CLI that failed
//! to download or summarize is simply re-invoked by the user.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the papersum library.
#[derive(Debug, Error)]
pub enum SummarizeError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input string is not a valid file path or URL.
    #[error("Invalid input '{input}': not a file path or a valid HTTP/HTTPS URL")]
    InvalidInput { input: String },

    /// The URL is syntactically fine but not an arXiv link.
    #[error("Unsupported URL '{url}': only arxiv.org abstract or PDF links are supported")]
    UnsupportedUrl { url: String },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── Fetch errors ──────────────────────────────────────────────────────
    /// HTTP URL was syntactically valid but download failed.
    #[error("Failed to download '{url}': {reason}\nCheck your internet connection.")]
    DownloadFailed { url: String, reason: String },

    /// Download exceeded the configured timeout.
    #[error("Download timed out after {secs}s for '{url}'\nIncrease --download-timeout.")]
    DownloadTimeout { url: String, secs: u64 },

    // ── Truncation errors ─────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{path}' is corrupt: {detail}\nTry repairing with: qpdf --decrypt input.pdf output.pdf")]
    CorruptPdf { path: PathBuf, detail: String },

    /// The document parsed but contains no pages.
    #[error("PDF '{path}' has no pages")]
    EmptyDocument { path: PathBuf },

    /// Writing the truncated document failed.
    #[error("Failed to write truncated PDF: {detail}")]
    TruncationFailed { detail: String },

    // ── Summarizer errors ─────────────────────────────────────────────────
    /// The summarizer binary could not be spawned.
    #[error("Summarizer command '{command}' not found.\nInstall it, or point --summarizer at the right binary.")]
    SummarizerNotFound { command: String },

    /// The summarizer exited with a nonzero status.
    #[error("Summarizer '{command}' failed ({status}): {stderr}")]
    SummarizerFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// The summarizer exited zero but produced no output.
    #[error("Summarizer '{command}' produced no output")]
    SummarizerEmptyOutput { command: String },

    /// The summarizer outlived the caller-specified timeout and was killed.
    #[error("Summarizer '{command}' timed out after {secs}s\nRaise --timeout or drop it to wait indefinitely.")]
    SummarizerTimeout { command: String, secs: u64 },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output Markdown file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarizer_failed_display() {
        let e = SummarizeError::SummarizerFailed {
            command: "gemini".into(),
            status: "exit status: 1".into(),
            stderr: "quota exceeded".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("gemini"), "got: {msg}");
        assert!(msg.contains("quota exceeded"));
    }

    #[test]
    fn timeout_display_names_flag() {
        let e = SummarizeError::SummarizerTimeout {
            command: "gemini".into(),
            secs: 90,
        };
        assert!(e.to_string().contains("90s"));
        assert!(e.to_string().contains("--timeout"));
    }

    #[test]
    fn unsupported_url_display() {
        let e = SummarizeError::UnsupportedUrl {
            url: "https://example.com/paper.pdf".into(),
        };
        assert!(e.to_string().contains("arxiv.org"));
    }

    #[test]
    fn not_a_pdf_shows_magic() {
        let e = SummarizeError::NotAPdf {
            path: PathBuf::from("/tmp/x.pdf"),
            magic: *b"<htm",
        };
        assert!(e.to_string().contains("not a valid PDF"));
    }
}
