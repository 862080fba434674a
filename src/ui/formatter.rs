//! Pure formatting functions for terminal output.
//!
//! Every `display_*` function prints; the `format_*` helpers build the text
//! and are what the tests exercise.

use crate::analyzer::ImpactResult;
use crate::boundary::BoundaryWarning;
use crate::domain::{Impact, ParsedCommitInfo, SemanticVersion};
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow().bold(), warning);
}

/// Short label for an optional impact
pub fn format_impact(impact: Option<Impact>) -> String {
    impact.map_or_else(|| "none".to_string(), |impact| impact.to_string())
}

/// `type → impact` for an optional classification
pub fn format_classification(info: Option<&ParsedCommitInfo>) -> String {
    match info {
        Some(info) => format!("{} → {}", info.commit_type, info.impact),
        None => "not conventional".to_string(),
    }
}

/// Lines describing an impact analysis, without styling
pub fn format_impact_result(result: &ImpactResult) -> Vec<String> {
    vec![
        format!(
            "Pull request: {}",
            format_classification(result.pr_impact.as_ref())
        ),
        format!(
            "Commits: {} conventional, highest impact {}",
            result.commit_impacts.len(),
            format_impact(result.max_commit_impact)
        ),
        format!(
            "Final: {}",
            format_impact(result.final_impact.map(|info| info.impact))
        ),
    ]
}

/// Display the impact analysis.
pub fn display_impact_result(result: &ImpactResult) {
    println!("\n{}", style("Impact analysis").bold());
    for line in format_impact_result(result) {
        println!("  {}", line);
    }
}

/// Display the proposed version change.
///
/// # Arguments
/// * `baseline` - Last released version
/// * `next` - Version this run resolves to
pub fn display_version_change(baseline: &SemanticVersion, next: &SemanticVersion) {
    println!("\n{}", style("Proposed Version:").bold());
    println!("  From: {}", style(baseline.as_tag()).red());
    println!("  To:   {}", style(next.as_tag()).green());
}
