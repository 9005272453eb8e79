//! Pipeline stages for paper summarization.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. switch the PDF backend) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ extract ──▶ boundary ──▶ truncate ──▶ invoke
//! (URL/path) (page text)  (references  (drop refs   (summarizer
//!                          heading)     pages)       subprocess)
//! ```
//!
//! 1. [`input`]    — canonicalise the user-supplied path or URL to a local file
//! 2. [`extract`]  — per-page text of the document; runs in `spawn_blocking`
//!    because lopdf parsing is CPU-bound
//! 3. [`boundary`] — classify the first page belonging to the references
//!    section, if any
//! 4. [`truncate`] — write the pages before the boundary to a scoped temp
//!    file; pass-through when there is no boundary
//! 5. [`invoke`]   — run the external summarizer CLI; the only stage that
//!    blocks on another process

pub mod boundary;
pub mod extract;
pub mod input;
pub mod invoke;
pub mod truncate;
