use conventional_bump::boundary::BoundaryWarning;
use conventional_bump::cli::{run_release_workflow, WorkflowArgs};
use conventional_bump::config::Config;
use conventional_bump::domain::{CommitRecord, Impact, PullRequest, SemanticVersion};
use conventional_bump::git::{CachedRepository, MockRepository};
use conventional_bump::ReleaseError;

fn repo_at_1_2_0(titles: &[&str]) -> MockRepository {
    let mut repo = MockRepository::new();
    repo.add_commit(CommitRecord::new("0000000000", "chore: initial"));
    repo.add_tag("v1.2.0");
    for (i, title) in titles.iter().enumerate() {
        repo.add_commit(CommitRecord::new(format!("{:010}", i + 1), *title));
    }
    repo
}

#[test]
fn test_merged_feature_bumps_minor() {
    let repo = repo_at_1_2_0(&["feat: search", "fix: typo"]);
    let args = WorkflowArgs::new(PullRequest::new("feat: search").merged(true));

    let result = run_release_workflow(&repo, &args, &Config::default()).unwrap();

    assert_eq!(result.baseline, SemanticVersion::new(1, 2, 0));
    assert_eq!(result.next_version, SemanticVersion::new(1, 3, 0));
    assert_eq!(result.tag, "v1.3.0");
    assert_eq!(result.pep440, "1.3.0");
    assert_eq!(result.prerelease, None);
    assert!(result.warnings.is_empty());
    assert!(result.notes.starts_with("## v1.3.0"));
}

#[test]
fn test_release_candidate_continues_numbering() {
    let mut repo = repo_at_1_2_0(&["feat: search"]);
    repo.add_tag("v1.3.0-rc.0");
    let pr = PullRequest::new("feat: search").with_label("release-candidate");

    let result = run_release_workflow(&repo, &WorkflowArgs::new(pr), &Config::default()).unwrap();

    assert_eq!(result.prerelease.as_deref(), Some("rc1"));
    assert_eq!(result.next_version.to_string(), "1.3.0-rc1");
    assert_eq!(result.tag, "v1.3.0-rc1");
    assert_eq!(result.pep440, "1.3.0rc1");
}

#[test]
fn test_release_candidate_without_numeric_change() {
    let mut repo = repo_at_1_2_0(&["chore: tidy"]);
    repo.add_tag("v1.2.0-rc.0");
    repo.add_tag("v1.2.0-rc.1");
    let pr = PullRequest::new("chore: tidy").with_label("release-candidate");

    let result = run_release_workflow(&repo, &WorkflowArgs::new(pr), &Config::default()).unwrap();

    assert_eq!(result.prerelease.as_deref(), Some("rc2"));
    assert_eq!(result.next_version.to_string(), "1.2.0-rc2");
}

#[test]
fn test_custom_release_candidate_label() {
    let repo = repo_at_1_2_0(&["fix: bug"]);
    let mut config = Config::default();
    config.release.release_candidate_label = "preview".to_string();

    let labelled = PullRequest::new("fix: bug").with_label("Preview");
    let result = run_release_workflow(&repo, &WorkflowArgs::new(labelled), &config).unwrap();
    assert_eq!(result.tag, "v1.2.1-rc0");

    let default_label = PullRequest::new("fix: bug").with_label("release-candidate");
    let result = run_release_workflow(&repo, &WorkflowArgs::new(default_label), &config).unwrap();
    assert_eq!(result.tag, "v1.2.1");
}

#[test]
fn test_title_conflict_is_reported() {
    let repo = repo_at_1_2_0(&["feat!: drop old api"]);
    let args = WorkflowArgs::new(PullRequest::new("fix: small change"));

    let result = run_release_workflow(&repo, &args, &Config::default()).unwrap();

    assert_eq!(result.next_version, SemanticVersion::new(1, 2, 1));
    assert_eq!(
        result.warnings,
        vec![BoundaryWarning::ImpactConflict {
            pr_impact: Impact::Patch,
            commit_impact: Impact::Major,
        }]
    );
}

#[test]
fn test_no_tags_starts_from_initial_version() {
    let mut repo = MockRepository::new();
    repo.add_commit(CommitRecord::new("a", "feat: first feature"));
    let args = WorkflowArgs::new(PullRequest::new("Initial import"));

    let result = run_release_workflow(&repo, &args, &Config::default()).unwrap();

    assert_eq!(result.baseline, SemanticVersion::new(0, 0, 0));
    assert_eq!(result.tag, "v0.1.0");
    assert!(matches!(
        result.warnings.as_slice(),
        [BoundaryWarning::NoReleaseFound { .. }]
    ));
}

#[test]
fn test_unparsable_latest_release_override() {
    let repo = repo_at_1_2_0(&["fix: bug"]);
    let mut args = WorkflowArgs::new(PullRequest::new("fix: bug"));
    args.latest_release = Some("release-2024".to_string());

    let result = run_release_workflow(&repo, &args, &Config::default()).unwrap();

    assert_eq!(result.baseline, SemanticVersion::new(0, 0, 0));
    assert!(result
        .warnings
        .iter()
        .any(|w| matches!(w, BoundaryWarning::UnparsableTag { tag, .. } if tag == "release-2024")));
}

#[test]
fn test_nothing_conventional_fails() {
    let repo = repo_at_1_2_0(&["wip", "more wip"]);
    let args = WorkflowArgs::new(PullRequest::new("Update stuff"));

    let err = run_release_workflow(&repo, &args, &Config::default()).unwrap_err();
    assert!(matches!(err, ReleaseError::NoImpactDetermined));
}

#[test]
fn test_no_new_commits_warning() {
    let repo = repo_at_1_2_0(&[]);
    let args = WorkflowArgs::new(PullRequest::new("docs: readme"));

    let result = run_release_workflow(&repo, &args, &Config::default()).unwrap();

    assert_eq!(result.next_version, SemanticVersion::new(1, 2, 0));
    assert!(result
        .warnings
        .iter()
        .any(|w| matches!(w, BoundaryWarning::NoNewCommits { .. })));
}

#[test]
fn test_invalid_initial_version_is_config_error() {
    let repo = MockRepository::new();
    let mut config = Config::default();
    config.release.initial_version = "one".to_string();
    let args = WorkflowArgs::new(PullRequest::new("feat: x"));

    let err = run_release_workflow(&repo, &args, &config).unwrap_err();
    assert!(matches!(err, ReleaseError::Config(_)));
}

#[test]
fn test_workflow_through_cached_repository() {
    let mut mock = repo_at_1_2_0(&["feat: search"]);
    mock.add_tag("v1.3.0-rc.4");
    let repo = CachedRepository::new(mock);
    let pr = PullRequest::new("feat: search").with_label("release-candidate");

    let result = run_release_workflow(&repo, &WorkflowArgs::new(pr), &Config::default()).unwrap();

    assert_eq!(result.tag, "v1.3.0-rc5");
    // Sequential calls settle before the next one starts, so nothing is shared.
    assert_eq!(repo.inner().tag_calls(), 2);
    assert_eq!(repo.inner().commit_calls(), 1);
}

#[test]
fn test_result_serializes() {
    let repo = repo_at_1_2_0(&["fix: bug"]);
    let args = WorkflowArgs::new(PullRequest::new("fix: bug"));
    let result = run_release_workflow(&repo, &args, &Config::default()).unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["next_version"], "1.2.1");
    assert_eq!(json["impact"]["final_impact"]["type"], "fix");
    assert_eq!(json["impact"]["final_impact"]["impact"], "patch");
}

#[test]
fn test_bump_past_u64_limit_is_version_error() {
    let mut repo = MockRepository::new();
    repo.add_commit(CommitRecord::new("0000000000", "chore: initial"));
    repo.add_tag("v18446744073709551615.0.0");
    repo.add_commit(CommitRecord::new("0000000001", "feat!: drop old api"));

    let merged = WorkflowArgs::new(PullRequest::new("feat!: drop old api").merged(true));
    let err = run_release_workflow(&repo, &merged, &Config::default()).unwrap_err();
    assert!(matches!(err, ReleaseError::Version(_)));

    let candidate = WorkflowArgs::new(
        PullRequest::new("feat!: drop old api").with_label("release-candidate"),
    );
    let err = run_release_workflow(&repo, &candidate, &Config::default()).unwrap_err();
    assert!(matches!(err, ReleaseError::Version(_)));
}
