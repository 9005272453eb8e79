//! Instruction prompt handed to the external summarizer.
//!
//! Centralising the prompt here serves two purposes:
//!
//! 1. **Single source of truth** — changing the summary structure (adding a
//!    section, tweaking the guidelines) requires editing exactly one place.
//!
//! 2. **Testability** — unit tests can inspect the prompt without spawning
//!    a real summarizer, making prompt regressions easy to catch.
//!
//! Callers can override the default via
//! [`crate::config::SummaryConfig::prompt`]; the constant here is used only
//! when no override is provided.

/// Default instruction prompt requesting a structured paper summary.
///
/// Used when `SummaryConfig::prompt` is `None`.
pub const DEFAULT_SUMMARY_PROMPT: &str = r#"You are a Research Assistant, an expert in academic analysis and scientific communication. Your role is to help researchers quickly grasp the core value and methodology of complex papers.

When analyzing a paper, your summary must follow this exact structure:

1. **Core Contributions**: What is the primary novelty or value-add of this work?
2. **Background**: A very short summary of the most relevant background required to understand what the authors did and the main contributions.
3. **What the Authors Did**: A detailed look at the methodology, experiments, or theoretical framework employed.
4. **Key Findings**: The most significant results and data points.
5. **Noteworthy Discussion**: Interesting insights, limitations, and future directions mentioned by the authors.

Guidelines:
- Maintain academic rigor while being clear and concise.
- Use precise terminology from the relevant field.
- Your output should be clean Markdown, ready to be saved as a .md file.
- Use markdown titles/headers for the paper title and the 5 sections ('#' and '##')

Analyze the research paper at the following filepath and provide a structured summary according to the structure above. Output only the formatted summary and nothing else."#;

/// Build the full prompt sent to the summarizer for one document.
///
/// The summarizer runs with its working directory set to the PDF's parent,
/// so the prompt references the bare file name.
pub fn build_prompt(instruction: &str, file_name: &str) -> String {
    format!("{instruction}\nFilepath: {file_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_references_file_name() {
        let prompt = build_prompt(DEFAULT_SUMMARY_PROMPT, "paper.pdf");
        assert!(prompt.ends_with("Filepath: paper.pdf"));
        assert!(prompt.contains("Core Contributions"));
    }
}
