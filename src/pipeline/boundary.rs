//! Reference-boundary detection over per-page text.
//!
//! Headings are the only reliable structural signal plain extracted text
//! offers: anchor on whole lines, not substrings, because citation markers
//! and running headers put the word "references" on pages that are not the
//! references section. The matcher is a value (label set compiled to one
//! rule) rather than hard-coded comparisons, so callers can extend the set
//! for other languages or house styles.

use crate::config::DEFAULT_HEADING_LABELS;
use crate::error::SummarizeError;
use crate::pipeline::extract::PageText;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Line-anchored classifier for reference-section headings.
///
/// A line matches when, after trimming, it consists of exactly one of the
/// configured labels, case-insensitively, with optional leading section
/// numbering ("7. References", "3 Bibliography"). Whitespace inside a
/// label is matched loosely ("Works  Cited").
#[derive(Debug, Clone)]
pub struct HeadingMatcher {
    regex: Regex,
}

static DEFAULT_MATCHER: Lazy<HeadingMatcher> = Lazy::new(|| {
    HeadingMatcher::new(DEFAULT_HEADING_LABELS).expect("default labels compile")
});

impl HeadingMatcher {
    /// Compile a matcher from a set of heading labels.
    pub fn new<I, S>(labels: I) -> Result<Self, SummarizeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let alternation: Vec<String> = labels
            .into_iter()
            .filter(|l| !l.as_ref().trim().is_empty())
            .map(|l| {
                regex::escape(l.as_ref().trim())
                    .replace(r"\ ", r"\s+")
                    .replace(' ', r"\s+")
            })
            .collect();

        if alternation.is_empty() {
            return Err(SummarizeError::InvalidConfig(
                "At least one heading label is required".into(),
            ));
        }

        let pattern = format!(
            r"(?i)^\s*(?:\d+\s*[.:]?\s*)?(?:{})\s*$",
            alternation.join("|")
        );
        let regex = Regex::new(&pattern)
            .map_err(|e| SummarizeError::InvalidConfig(format!("Bad heading label: {e}")))?;
        Ok(Self { regex })
    }

    /// Matcher for the built-in label set.
    pub fn default_set() -> &'static HeadingMatcher {
        &DEFAULT_MATCHER
    }

    /// True when the line is exactly a references heading.
    pub fn matches_line(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    /// True when any line of the page text is a references heading.
    ///
    /// Page-granular by policy: a heading starting mid-page classifies the
    /// whole page (and everything after it) as references.
    pub fn matches_page(&self, text: &str) -> bool {
        text.lines().any(|line| self.matches_line(line))
    }
}

/// Find the first page classified as the start of the references section.
///
/// Pages whose index falls inside the leading `min_fraction` of the
/// document are never matched — a heading there is a table-of-contents
/// entry or a running header, not the section itself. Returns `None` when
/// no page matches; the caller then passes the document through untouched.
pub fn find_boundary(
    pages: &[PageText],
    matcher: &HeadingMatcher,
    min_fraction: f64,
) -> Option<usize> {
    let total = pages.len() as f64;

    for page in pages {
        if (page.index as f64) < total * min_fraction {
            continue;
        }
        if matcher.matches_page(&page.text) {
            debug!("References heading on page {}", page.index);
            return Some(page.index);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(texts: &[&str]) -> Vec<PageText> {
        texts
            .iter()
            .enumerate()
            .map(|(index, text)| PageText {
                index,
                text: text.to_string(),
            })
            .collect()
    }

    #[test]
    fn matches_bare_and_numbered_headings() {
        let m = HeadingMatcher::default_set();
        assert!(m.matches_line("References"));
        assert!(m.matches_line("REFERENCES"));
        assert!(m.matches_line("  references  "));
        assert!(m.matches_line("7. References"));
        assert!(m.matches_line("7 References"));
        assert!(m.matches_line("3: Bibliography"));
        assert!(m.matches_line("Works Cited"));
        assert!(m.matches_line("Literature Cited"));
    }

    #[test]
    fn rejects_substring_hits() {
        let m = HeadingMatcher::default_set();
        assert!(!m.matches_line("References [12] show the opposite"));
        assert!(!m.matches_line("Our references are listed below"));
        assert!(!m.matches_line("Referencesandmore"));
        assert!(!m.matches_line("See the bibliography for details"));
    }

    #[test]
    fn heading_mid_page_matches_the_page() {
        let m = HeadingMatcher::default_set();
        let text = "…and we conclude.\n\nReferences\n[1] A. Author. A paper.";
        assert!(m.matches_page(text));
    }

    #[test]
    fn custom_labels_extend_the_set() {
        let m = HeadingMatcher::new(["bibliografía"]).unwrap();
        assert!(m.matches_line("Bibliografía"));
        assert!(!m.matches_line("References"));
    }

    #[test]
    fn empty_label_set_is_invalid() {
        let err = HeadingMatcher::new(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, SummarizeError::InvalidConfig(_)));
    }

    #[test]
    fn finds_first_matching_page() {
        let pages = pages(&[
            "Title page",
            "Introduction",
            "Methods",
            "Results",
            "References\n[1] …",
            "[17] … more refs",
        ]);
        let found = find_boundary(&pages, HeadingMatcher::default_set(), 0.1);
        assert_eq!(found, Some(4));
    }

    #[test]
    fn absent_heading_yields_none() {
        let pages = pages(&["Intro", "Body", "Conclusion"]);
        assert_eq!(find_boundary(&pages, HeadingMatcher::default_set(), 0.1), None);
    }

    #[test]
    fn front_fraction_guard_skips_early_pages() {
        // A "References" line on page 0 of a 5-page document is a false
        // positive (contents listing, running header) and must not match.
        let pages = pages(&["Contents\nReferences", "Body", "Body", "Body", "Body"]);
        assert_eq!(find_boundary(&pages, HeadingMatcher::default_set(), 0.1), None);
    }

    #[test]
    fn front_fraction_zero_allows_any_page() {
        let pages = pages(&["References", "Body"]);
        assert_eq!(
            find_boundary(&pages, HeadingMatcher::default_set(), 0.0),
            Some(0)
        );
    }

    #[test]
    fn twenty_page_document_boundary_at_fifteen() {
        let mut texts: Vec<String> = (0..20).map(|i| format!("Page {i} body text")).collect();
        texts[15] = "7. References\n[1] A. Author.".to_string();
        let pages: Vec<PageText> = texts
            .iter()
            .enumerate()
            .map(|(index, text)| PageText {
                index,
                text: text.clone(),
            })
            .collect();
        assert_eq!(
            find_boundary(&pages, HeadingMatcher::default_set(), 0.1),
            Some(15)
        );
    }
}
