use crate::domain::CommitRecord;
use crate::error::{ReleaseError, Result};
use git2::{Repository as Git2Repo, Sort};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Wrapper around git2::Repository with our trait interface
///
/// `git2::Repository` is `Send` but not `Sync`; the mutex makes the adapter
/// shareable across threads.
pub struct Git2Repository {
    repo: Mutex<Git2Repo>,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository::from_git2(repo))
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository {
            repo: Mutex::new(repo),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Git2Repo> {
        self.repo
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl super::Repository for Git2Repository {
    fn list_tags(&self) -> Result<Vec<String>> {
        let repo = self.lock();
        let tags = repo.tag_names(None)?;

        let names: Vec<String> = tags.iter().flatten().map(|s| s.to_string()).collect();
        debug!(count = names.len(), "listed tags");
        Ok(names)
    }

    fn commits_since(&self, since_tag: Option<&str>, rev: &str) -> Result<Vec<CommitRecord>> {
        let repo = self.lock();

        let head = repo
            .revparse_single(rev)
            .and_then(|object| object.peel_to_commit())
            .map_err(|e| ReleaseError::tag(format!("Cannot resolve '{}': {}", rev, e)))?;

        let mut revwalk = repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)?;
        revwalk.push(head.id())?;

        if let Some(tag) = since_tag {
            let boundary = repo
                .revparse_single(&format!("refs/tags/{}", tag))
                .and_then(|object| object.peel_to_commit())
                .map_err(|e| ReleaseError::tag(format!("Cannot find tag '{}': {}", tag, e)))?;
            revwalk.hide(boundary.id())?;
        }

        let mut commits = Vec::new();

        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = repo.find_commit(oid)?;

            let title = commit.summary().unwrap_or("").to_string();
            let body = commit
                .body()
                .map(str::trim)
                .filter(|body| !body.is_empty())
                .map(str::to_string);

            commits.push(CommitRecord {
                sha: oid.to_string(),
                title,
                body,
            });
        }

        debug!(
            since = since_tag.unwrap_or("<root>"),
            rev,
            count = commits.len(),
            "collected commits"
        );
        Ok(commits)
    }
}
