//! Version-resolution engine - pure rules with no I/O

pub mod commit;
pub mod impact;
pub mod prerelease;
pub mod pull_request;
pub mod version;

pub use commit::{
    get_conventional_impact, parse_conventional_body, parse_conventional_title,
    strip_quoted_release_notes, CommitType, ConventionalTitle, ParsedCommitInfo,
};
pub use impact::Impact;
pub use prerelease::{compare_prerelease, next_rc_index, to_pep440_prerelease};
pub use pull_request::{CommitRecord, ConventionalSource, Label, PullRequest};
pub use version::SemanticVersion;
