use crate::domain::Impact;
use serde::Serialize;
use std::fmt;

/// Warnings that occur while resolving a release.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoundaryWarning {
    /// The pull request title and the highest commit impact disagree; the title wins
    ImpactConflict {
        pr_impact: Impact,
        commit_impact: Impact,
    },
    /// Latest release name cannot be parsed as a semantic version
    UnparsableTag { tag: String, reason: String },
    /// No release tag exists yet
    NoReleaseFound { initial_version: String },
    /// No commits between the last release and the target revision
    NoNewCommits { latest_tag: String, rev: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::ImpactConflict {
                pr_impact,
                commit_impact,
            } => {
                let direction = if commit_impact > pr_impact {
                    "higher"
                } else {
                    "lower"
                };
                write!(
                    f,
                    "Pull request title impact '{}' overrides {} commit impact '{}'",
                    pr_impact, direction, commit_impact
                )
            }
            BoundaryWarning::UnparsableTag { tag, reason } => {
                write!(f, "Cannot parse tag '{}': {}", tag, reason)
            }
            BoundaryWarning::NoReleaseFound { initial_version } => {
                write!(
                    f,
                    "No release tag found, starting from {}",
                    initial_version
                )
            }
            BoundaryWarning::NoNewCommits { latest_tag, rev } => {
                write!(f, "No new commits between '{}' and '{}'", latest_tag, rev)
            }
        }
    }
}
