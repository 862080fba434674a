//! Release resolution workflow
//!
//! Wires the repository adapter to the engine. Kept apart from `main.rs` so
//! it can run against any [`Repository`] without clap.

use serde::Serialize;
use tracing::{debug, warn};

use crate::analyzer::{get_impact, ImpactResult, ReleaseCandidateResolver};
use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::{PullRequest, SemanticVersion};
use crate::error::{ReleaseError, Result};
use crate::git::{latest_release_name, Repository};
use crate::notes::render_release_notes;

/// Arguments for the release workflow
///
/// Mirrors the CLI Args in a form the workflow can be called with
/// programmatically.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowArgs {
    /// Pull request being versioned
    pub pull_request: PullRequest,

    /// Revision whose history is analyzed
    pub rev: String,

    /// Latest release name, overriding tag discovery
    pub latest_release: Option<String>,
}

impl WorkflowArgs {
    pub fn new(pull_request: PullRequest) -> Self {
        WorkflowArgs {
            pull_request,
            rev: "HEAD".to_string(),
            latest_release: None,
        }
    }
}

/// Result of a successful release resolution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowResult {
    pub impact: ImpactResult,

    /// Version the bump is applied to
    pub baseline: SemanticVersion,

    pub next_version: SemanticVersion,

    /// `rc<N>` when a release candidate is produced
    pub prerelease: Option<String>,

    pub tag: String,

    /// Heuristic PEP 440 spelling of `next_version`
    pub pep440: String,

    pub notes: String,

    pub warnings: Vec<BoundaryWarning>,
}

fn resolve_baseline(
    latest: Option<&str>,
    config: &Config,
    warnings: &mut Vec<BoundaryWarning>,
) -> Result<SemanticVersion> {
    let initial = || {
        config.release.initial_version.parse::<SemanticVersion>().map_err(|_| {
            ReleaseError::config(format!(
                "initial_version '{}' is not a semantic version",
                config.release.initial_version
            ))
        })
    };

    match latest {
        Some(name) => match SemanticVersion::parse(name) {
            Some(version) => Ok(version),
            None => {
                warnings.push(BoundaryWarning::UnparsableTag {
                    tag: name.to_string(),
                    reason: "not a semantic version".to_string(),
                });
                initial()
            }
        },
        None => {
            warnings.push(BoundaryWarning::NoReleaseFound {
                initial_version: config.release.initial_version.clone(),
            });
            initial()
        }
    }
}

/// Main release workflow
///
/// 1. Find the latest release and parse it as the baseline
/// 2. Collect commits since that release
/// 3. Aggregate pull request and commit impact
/// 4. Resolve a release-candidate label when requested
/// 5. Bump the baseline and render release notes
///
/// # Errors
///
/// [`ReleaseError::NoImpactDetermined`] when neither the pull request nor any
/// commit is conventional; repository errors are propagated.
pub fn run_release_workflow<R: Repository>(
    repo: &R,
    args: &WorkflowArgs,
    config: &Config,
) -> Result<WorkflowResult> {
    let mut warnings = Vec::new();

    let tags = repo.list_tags()?;
    let latest = match &args.latest_release {
        Some(name) => Some(name.clone()),
        None => latest_release_name(&tags),
    };
    debug!(latest = latest.as_deref().unwrap_or("<none>"), "latest release");

    let baseline = resolve_baseline(latest.as_deref(), config, &mut warnings)?;

    // Only walk from a tag that actually exists
    let since = latest.as_deref().filter(|name| tags.iter().any(|tag| tag == name));
    let commits = repo.commits_since(since, &args.rev)?;
    if commits.is_empty() {
        warnings.push(BoundaryWarning::NoNewCommits {
            latest_tag: since.unwrap_or("<root>").to_string(),
            rev: args.rev.clone(),
        });
    }

    let impact = get_impact(&args.pull_request, &commits);
    if let Some(warning) = &impact.warning {
        warnings.push(warning.clone());
    }
    let final_impact = impact.require_final()?;
    debug!(
        impact = %final_impact.impact,
        commit_type = %final_impact.commit_type,
        "resolved impact"
    );

    let resolver = ReleaseCandidateResolver::new(&config.release.release_candidate_label);
    let prerelease = resolver.resolve(
        &args.pull_request,
        final_impact.impact,
        &baseline,
        |_| repo.list_tags(),
    )?;
    debug!(
        label = resolver.label(),
        prerelease = prerelease.as_deref().unwrap_or("<none>"),
        "release candidate"
    );

    let next_version = match &prerelease {
        Some(label) => baseline.bump_with(final_impact.impact, Some(label.as_str()), None)?,
        None => baseline.bump(final_impact.impact)?,
    };
    let tag = next_version.as_tag();
    let notes = render_release_notes(&tag, &commits, &config.notes);

    for warning in &warnings {
        warn!("{}", warning);
    }

    Ok(WorkflowResult {
        impact,
        pep440: next_version.as_pep440(),
        baseline,
        next_version,
        prerelease,
        tag,
        notes,
        warnings,
    })
}
