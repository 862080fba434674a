use crate::domain::{next_rc_index, Impact, PullRequest, SemanticVersion};
use crate::error::ReleaseError;

/// Label that marks a pull request for release-candidate builds
pub const DEFAULT_RC_LABEL: &str = "release-candidate";

/// Decides whether a pull request build is tagged as a release candidate
#[derive(Debug, Clone)]
pub struct ReleaseCandidateResolver {
    label: String,
}

impl ReleaseCandidateResolver {
    pub fn new(label: impl Into<String>) -> Self {
        ReleaseCandidateResolver {
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Pre-release label (`rc<N>`) for this pull request, if any.
    ///
    /// Merged or unlabelled pull requests get `None` and `fetch_tags` is never
    /// called. Otherwise `fetch_tags` receives the would-be final version and
    /// returns candidate tag names; they are re-matched on major.minor.patch,
    /// so an unfiltered list is fine. A bump that overflows is returned as an
    /// error without calling `fetch_tags`.
    pub fn resolve<F, E>(
        &self,
        pr: &PullRequest,
        impact: Impact,
        last_release: &SemanticVersion,
        fetch_tags: F,
    ) -> Result<Option<String>, E>
    where
        F: FnOnce(&SemanticVersion) -> Result<Vec<String>, E>,
        E: From<ReleaseError>,
    {
        if pr.merged || !pr.has_label(&self.label) {
            return Ok(None);
        }

        let bumped_base = last_release.bump(impact)?;
        let tag_names = fetch_tags(&bumped_base)?;
        let index = next_rc_index(&bumped_base, &tag_names);

        Ok(Some(format!("rc{}", index)))
    }
}

impl Default for ReleaseCandidateResolver {
    fn default() -> Self {
        ReleaseCandidateResolver::new(DEFAULT_RC_LABEL)
    }
}

/// Release-candidate label using the default label and a known tag list.
///
/// `None` also when the bumped version cannot be represented.
pub fn resolve_release_candidate(
    pr: &PullRequest,
    impact: Impact,
    last_release: &SemanticVersion,
    tag_names: &[String],
) -> Option<String> {
    ReleaseCandidateResolver::default()
        .resolve::<_, ReleaseError>(pr, impact, last_release, |_| Ok(tag_names.to_vec()))
        .ok()
        .flatten()
}
