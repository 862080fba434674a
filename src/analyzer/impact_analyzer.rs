use crate::boundary::BoundaryWarning;
use crate::domain::{get_conventional_impact, ConventionalSource, Impact, ParsedCommitInfo};
use crate::error::{ReleaseError, Result};
use serde::Serialize;

/// Outcome of classifying a pull request together with its commits
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactResult {
    pub pr_impact: Option<ParsedCommitInfo>,
    /// Classified commits in input order; unparsable commits are absent
    pub commit_impacts: Vec<ParsedCommitInfo>,
    pub max_commit_impact: Option<Impact>,
    /// `None` when nothing could be classified
    pub final_impact: Option<ParsedCommitInfo>,
    pub warning: Option<BoundaryWarning>,
}

impl ImpactResult {
    pub fn is_undetermined(&self) -> bool {
        self.final_impact.is_none()
    }

    /// The final classification, or [`ReleaseError::NoImpactDetermined`]
    pub fn require_final(&self) -> Result<ParsedCommitInfo> {
        self.final_impact.ok_or(ReleaseError::NoImpactDetermined)
    }
}

/// Combine the pull request's own classification with its commits'.
///
/// Resolution order:
/// 1. both present and different: the title wins and a conflict warning is set
/// 2. only the title: the title
/// 3. only commits: the first commit carrying the highest impact
/// 4. neither: undetermined
pub fn get_impact<P, C>(pr_item: &P, commits: &[C]) -> ImpactResult
where
    P: ConventionalSource + ?Sized,
    C: ConventionalSource,
{
    let pr_impact = get_conventional_impact(pr_item);
    let commit_impacts: Vec<ParsedCommitInfo> =
        commits.iter().filter_map(get_conventional_impact).collect();
    let max_commit_impact = commit_impacts.iter().map(|info| info.impact).max();

    let (final_impact, warning) = match (pr_impact, max_commit_impact) {
        (Some(pr), Some(max)) if pr.impact != max => (
            Some(pr),
            Some(BoundaryWarning::ImpactConflict {
                pr_impact: pr.impact,
                commit_impact: max,
            }),
        ),
        (Some(pr), _) => (Some(pr), None),
        (None, Some(max)) => (
            commit_impacts.iter().find(|info| info.impact == max).copied(),
            None,
        ),
        (None, None) => (None, None),
    };

    ImpactResult {
        pr_impact,
        commit_impacts,
        max_commit_impact,
        final_impact,
        warning,
    }
}
