//! Source-control adapter layer
//!
//! This module provides a trait-based abstraction over the repository data
//! the release workflow needs: tag names and commit records. The engine never
//! talks to git directly.
//!
//! # Overview
//!
//! - [repository::Git2Repository]: a real implementation using the `git2` crate
//! - [mock::MockRepository]: an in-memory implementation for testing
//! - [cache::CachedRepository]: wraps either one and deduplicates concurrent
//!   identical calls through an [cache::InflightCache]
//!
//! # Usage
//!
//! ```rust
//! # use conventional_bump::git::{latest_release_name, Repository};
//! # fn example<R: Repository>(repo: &R) -> conventional_bump::Result<()> {
//! let tags = repo.list_tags()?;
//! let since = latest_release_name(&tags);
//! let commits = repo.commits_since(since.as_deref(), "HEAD")?;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod mock;
pub mod repository;

pub use cache::{CachedRepository, InflightCache};
pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::{CommitRecord, SemanticVersion};
use crate::error::Result;

/// Repository operations the release workflow depends on
///
/// ## Thread Safety
///
/// All implementors must be `Send + Sync` so a single adapter can serve
/// concurrent callers.
///
/// ## Error Handling
///
/// Implementations map their underlying errors (like `git2::Error`) to
/// [crate::error::ReleaseError] variants.
pub trait Repository: Send + Sync {
    /// All tag names in the repository
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Tag names, in no particular order
    /// * `Err` - If the tag list cannot be read
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Commits reachable from `rev` but not from `since_tag`, oldest first
    ///
    /// # Arguments
    /// * `since_tag` - Tag of the last release; `None` walks the whole history
    /// * `rev` - Revision to walk from (e.g. "HEAD", a branch, a sha)
    ///
    /// # Returns
    /// * `Ok(Vec<CommitRecord>)` - Commits in chronological order
    /// * `Err` - If either reference cannot be resolved
    fn commits_since(&self, since_tag: Option<&str>, rev: &str) -> Result<Vec<CommitRecord>>;
}

/// Name of the highest tag that is a final (non pre-release) semantic version
pub fn latest_release_name<S: AsRef<str>>(tags: &[S]) -> Option<String> {
    tags.iter()
        .filter_map(|tag| {
            let tag = tag.as_ref();
            SemanticVersion::parse(tag)
                .filter(|version| version.prerelease().is_none())
                .map(|version| (version, tag))
        })
        .max_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, tag)| tag.to_string())
}
