//! Summarizer invocation: run the external LLM CLI over a document.
//!
//! The summarizer is a black box reached through a subprocess contract:
//! given a file path and a model or agent name plus an instruction prompt,
//! it prints the summary on stdout and exits zero. This is the single
//! long-running step of a run (seconds to tens of seconds) and has no
//! internal timeout by default — the external tool's own limits govern.
//! Callers that want a bound set
//! [`crate::config::SummaryConfig::summarizer_timeout_secs`]; an overdue
//! child is killed (`kill_on_drop`) and the run fails with
//! [`SummarizeError::SummarizerTimeout`].
//!
//! The child's working directory is the PDF's parent and the prompt names
//! the bare file, matching how LLM CLIs resolve workspace-relative paths.

use crate::config::{SummarizerSpec, SummaryConfig};
use crate::error::SummarizeError;
use crate::prompts::{build_prompt, DEFAULT_SUMMARY_PROMPT};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tracing::{debug, info};

/// Captured result of one summarizer invocation.
pub struct SummarizerRun {
    /// Tidied stdout of the summarizer.
    pub summary: String,
    /// Wall-clock time spent waiting on the subprocess.
    pub duration_ms: u64,
}

/// Flag the summarizer receives for the configured backend value.
fn spec_flag(spec: &SummarizerSpec) -> &'static str {
    match spec {
        SummarizerSpec::Model(_) => "--model",
        SummarizerSpec::Agent(_) => "--agent",
    }
}

/// Run the external summarizer over the document at `pdf_path`.
pub async fn run_summarizer(
    pdf_path: &Path,
    config: &SummaryConfig,
) -> Result<SummarizerRun, SummarizeError> {
    let command = config.summarizer_command.clone();
    let instruction = config.prompt.as_deref().unwrap_or(DEFAULT_SUMMARY_PROMPT);
    let file_name = pdf_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| pdf_path.display().to_string());
    let prompt = build_prompt(instruction, &file_name);
    // parent() of a bare file name is Some(""), which is not a runnable cwd.
    let cwd = match pdf_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut cmd = Command::new(&command);
    cmd.arg(spec_flag(&config.summarizer))
        .arg(config.summarizer.name())
        .arg("-p")
        .arg(&prompt)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    info!(
        "Running summarizer: {} ({} {})",
        command,
        spec_flag(&config.summarizer),
        config.summarizer.name()
    );
    let start = Instant::now();

    let child = cmd.spawn().map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => SummarizeError::SummarizerNotFound {
            command: command.clone(),
        },
        _ => SummarizeError::Internal(format!("Failed to spawn '{command}': {e}")),
    })?;

    // On timeout the wait future is dropped, which drops the child handle;
    // kill_on_drop then reaps the subprocess.
    let output = match config.summarizer_timeout_secs {
        Some(secs) => {
            match tokio::time::timeout(Duration::from_secs(secs), child.wait_with_output()).await
            {
                Ok(result) => result,
                Err(_) => {
                    return Err(SummarizeError::SummarizerTimeout { command, secs });
                }
            }
        }
        None => child.wait_with_output().await,
    }
    .map_err(|e| SummarizeError::Internal(format!("Failed to read summarizer output: {e}")))?;

    let duration_ms = start.elapsed().as_millis() as u64;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(SummarizeError::SummarizerFailed {
            command,
            status: output.status.to_string(),
            stderr,
        });
    }

    let summary = tidy_summary(&String::from_utf8_lossy(&output.stdout));
    if summary.trim().is_empty() {
        return Err(SummarizeError::SummarizerEmptyOutput { command });
    }

    debug!("Summarizer produced {} bytes in {duration_ms}ms", summary.len());
    Ok(SummarizerRun {
        summary,
        duration_ms,
    })
}

static RE_OUTER_FENCES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^```(?:markdown)?\n(.*)\n```\s*$").unwrap());

/// Light deterministic tidy of the captured summary.
///
/// LLM CLIs occasionally wrap their whole answer in a ` ```markdown ` fence
/// despite being told not to, and some emit CRLF. Strip the outer fence,
/// normalise line endings, and end with exactly one newline. Content is
/// otherwise verbatim.
pub fn tidy_summary(input: &str) -> String {
    let s = match RE_OUTER_FENCES.captures(input.trim()) {
        Some(caps) => caps[1].to_string(),
        None => input.to_string(),
    };
    let s = s.replace("\r\n", "\n").replace('\r', "\n");
    let trimmed = s.trim_end();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{trimmed}\n")
    }
}
