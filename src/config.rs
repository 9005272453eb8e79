//! Configuration types for a summarization run.
//!
//! All run behaviour is controlled through [`SummaryConfig`], built via its
//! [`SummaryConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share configs, log them, and diff two runs to understand why
//! their outputs differ.
//!
//! # Design choice: builder over constructor
//! A ten-field constructor is unreadable and breaks on every new field. The
//! builder lets callers set only what they care about and rely on documented
//! defaults for the rest.

use crate::error::SummarizeError;
use serde::{Deserialize, Serialize};

/// Default summarizer binary, resolved from `PATH`.
pub const DEFAULT_COMMAND: &str = "gemini";

/// Default model passed to the summarizer when no override is given.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Reference-section heading labels recognised out of the box.
pub const DEFAULT_HEADING_LABELS: [&str; 4] =
    ["references", "bibliography", "works cited", "literature cited"];

/// Which backend configuration the summarizer subprocess receives.
///
/// Model names and agent profiles are the same kind of thing from this
/// crate's perspective: one opaque value handed through to the external
/// tool. Representing both in a single enum keeps the invoker to a single
/// code path that differs only in the flag name it emits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SummarizerSpec {
    /// Pass `--model <name>` to the summarizer.
    Model(String),
    /// Pass `--agent <name>` to the summarizer.
    Agent(String),
}

impl SummarizerSpec {
    /// The configured model or agent name.
    pub fn name(&self) -> &str {
        match self {
            SummarizerSpec::Model(n) | SummarizerSpec::Agent(n) => n,
        }
    }
}

impl Default for SummarizerSpec {
    fn default() -> Self {
        SummarizerSpec::Model(DEFAULT_MODEL.to_string())
    }
}

/// Configuration for one summarization run.
///
/// Built via [`SummaryConfig::builder()`] or [`SummaryConfig::default()`].
///
/// # Example
/// ```rust
/// use papersum::{SummaryConfig, SummarizerSpec};
///
/// let config = SummaryConfig::builder()
///     .summarizer(SummarizerSpec::Model("gemini-2.5-pro".into()))
///     .summarizer_timeout_secs(120)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct SummaryConfig {
    /// Summarizer binary to spawn. Default: `gemini`.
    pub summarizer_command: String,

    /// Model or agent profile handed to the summarizer. Default:
    /// `Model("gemini-2.5-flash")`.
    pub summarizer: SummarizerSpec,

    /// Custom instruction prompt. If None, uses the built-in default from
    /// [`crate::prompts`].
    pub prompt: Option<String>,

    /// Heading labels that mark the start of the references section,
    /// lower-case. Default: [`DEFAULT_HEADING_LABELS`].
    ///
    /// The set is open for extension ("bibliografía", "literatur", …); each
    /// label is matched as a whole line, case-insensitively, with optional
    /// leading section numbering.
    pub heading_labels: Vec<String>,

    /// Fraction of the document, from the front, whose pages are never
    /// classified as references. Default: 0.1.
    ///
    /// A references heading cannot plausibly appear in the first tenth of a
    /// paper; a match there is a table-of-contents entry or a running
    /// header, not the section itself.
    pub min_boundary_fraction: f64,

    /// Whether to drop reference pages at all. Default: true.
    ///
    /// Disabled by `--keep-references` when the pages after the heading
    /// (an appendix, say) should reach the summarizer.
    pub truncate: bool,

    /// Download timeout for URL inputs in seconds. Default: 120.
    pub download_timeout_secs: u64,

    /// Summarizer subprocess timeout in seconds. Default: None — the run
    /// waits as long as the external tool does. When set, an overdue child
    /// is killed and the run fails with
    /// [`SummarizeError::SummarizerTimeout`].
    pub summarizer_timeout_secs: Option<u64>,

    /// Prefix the written summary with a source front-matter block.
    /// Default: false (summary written verbatim).
    pub front_matter: bool,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            summarizer_command: DEFAULT_COMMAND.to_string(),
            summarizer: SummarizerSpec::default(),
            prompt: None,
            heading_labels: DEFAULT_HEADING_LABELS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            min_boundary_fraction: 0.1,
            truncate: true,
            download_timeout_secs: 120,
            summarizer_timeout_secs: None,
            front_matter: false,
        }
    }
}

impl SummaryConfig {
    /// Create a new builder for `SummaryConfig`.
    pub fn builder() -> SummaryConfigBuilder {
        SummaryConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`SummaryConfig`].
#[derive(Debug)]
pub struct SummaryConfigBuilder {
    config: SummaryConfig,
}

impl SummaryConfigBuilder {
    pub fn summarizer_command(mut self, cmd: impl Into<String>) -> Self {
        self.config.summarizer_command = cmd.into();
        self
    }

    pub fn summarizer(mut self, spec: SummarizerSpec) -> Self {
        self.config.summarizer = spec;
        self
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.prompt = Some(prompt.into());
        self
    }

    pub fn heading_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.heading_labels = labels
            .into_iter()
            .map(|s| s.into().to_lowercase())
            .collect();
        self
    }

    pub fn min_boundary_fraction(mut self, f: f64) -> Self {
        self.config.min_boundary_fraction = f.clamp(0.0, 1.0);
        self
    }

    pub fn truncate(mut self, v: bool) -> Self {
        self.config.truncate = v;
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs.max(1);
        self
    }

    pub fn summarizer_timeout_secs(mut self, secs: u64) -> Self {
        self.config.summarizer_timeout_secs = Some(secs);
        self
    }

    pub fn front_matter(mut self, v: bool) -> Self {
        self.config.front_matter = v;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<SummaryConfig, SummarizeError> {
        let c = &self.config;
        if c.summarizer_command.trim().is_empty() {
            return Err(SummarizeError::InvalidConfig(
                "Summarizer command must not be empty".into(),
            ));
        }
        if c.summarizer.name().trim().is_empty() {
            return Err(SummarizeError::InvalidConfig(
                "Summarizer model/agent name must not be empty".into(),
            ));
        }
        if c.heading_labels.is_empty() {
            return Err(SummarizeError::InvalidConfig(
                "At least one heading label is required".into(),
            ));
        }
        if !(0.0..=1.0).contains(&c.min_boundary_fraction) {
            return Err(SummarizeError::InvalidConfig(format!(
                "min_boundary_fraction must be in [0, 1], got {}",
                c.min_boundary_fraction
            )));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SummaryConfig::builder().build().unwrap();
        assert_eq!(config.summarizer_command, "gemini");
        assert_eq!(config.summarizer, SummarizerSpec::Model(DEFAULT_MODEL.into()));
        assert!(config.truncate);
        assert!(config.summarizer_timeout_secs.is_none());
    }

    #[test]
    fn fraction_is_clamped() {
        let config = SummaryConfig::builder()
            .min_boundary_fraction(-0.5)
            .build()
            .unwrap();
        assert_eq!(config.min_boundary_fraction, 0.0);
    }

    #[test]
    fn empty_command_rejected() {
        let err = SummaryConfig::builder()
            .summarizer_command("  ")
            .build()
            .unwrap_err();
        assert!(matches!(err, SummarizeError::InvalidConfig(_)));
    }

    #[test]
    fn empty_label_set_rejected() {
        let err = SummaryConfig::builder()
            .heading_labels(Vec::<String>::new())
            .build()
            .unwrap_err();
        assert!(matches!(err, SummarizeError::InvalidConfig(_)));
    }

    #[test]
    fn labels_are_lowercased() {
        let config = SummaryConfig::builder()
            .heading_labels(["Bibliografía"])
            .build()
            .unwrap();
        assert_eq!(config.heading_labels, vec!["bibliografía"]);
    }
}
