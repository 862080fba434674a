//! Markdown job summary for CI runners

use crate::cli::WorkflowResult;
use crate::error::Result;
use crate::ui::formatter::{format_classification, format_impact};
use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::Path;

/// Render a Markdown summary of a resolved release
pub fn render_summary(result: &WorkflowResult) -> String {
    let impact = &result.impact;
    let mut out = String::from("## Release version\n\n| | |\n|---|---|\n");

    let rows = [
        (
            "Pull request",
            format_classification(impact.pr_impact.as_ref()),
        ),
        ("Max commit impact", format_impact(impact.max_commit_impact)),
        (
            "Final impact",
            format_impact(impact.final_impact.map(|info| info.impact)),
        ),
        ("Baseline", result.baseline.to_string()),
        ("Next version", result.next_version.to_string()),
        ("Tag", format!("`{}`", result.tag)),
        ("PEP 440", format!("`{}`", result.pep440)),
    ];
    for (name, value) in rows {
        let _ = writeln!(out, "| {} | {} |", name, value);
    }

    if !result.warnings.is_empty() {
        out.push_str("\n### Warnings\n\n");
        for warning in &result.warnings {
            let _ = writeln!(out, "- {}", warning);
        }
    }

    if !impact.commit_impacts.is_empty() {
        out.push_str("\n### Conventional commits\n\n");
        for info in &impact.commit_impacts {
            let _ = writeln!(out, "- {}", format_classification(Some(info)));
        }
    }

    out
}

/// Append `summary` to the file at `path`, creating it if needed
pub fn append_summary(path: &Path, summary: &str) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", summary)?;
    Ok(())
}
