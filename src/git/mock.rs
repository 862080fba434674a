use crate::domain::CommitRecord;
use crate::error::{ReleaseError, Result};
use crate::git::Repository;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory repository for testing without actual git operations
///
/// History is linear: each tag points at an index into the commit list.
#[derive(Default)]
pub struct MockRepository {
    commits: Vec<CommitRecord>,
    tags: Vec<(String, usize)>,
    tag_calls: AtomicUsize,
    commit_calls: AtomicUsize,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a commit to the history
    pub fn add_commit(&mut self, commit: CommitRecord) {
        self.commits.push(commit);
    }

    /// Tag the most recent commit
    pub fn add_tag(&mut self, name: impl Into<String>) {
        let position = self.commits.len();
        self.tags.push((name.into(), position));
    }

    /// Number of `list_tags` calls served so far
    pub fn tag_calls(&self) -> usize {
        self.tag_calls.load(Ordering::SeqCst)
    }

    /// Number of `commits_since` calls served so far
    pub fn commit_calls(&self) -> usize {
        self.commit_calls.load(Ordering::SeqCst)
    }
}

impl Repository for MockRepository {
    fn list_tags(&self) -> Result<Vec<String>> {
        self.tag_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.tags.iter().map(|(name, _)| name.clone()).collect())
    }

    fn commits_since(&self, since_tag: Option<&str>, _rev: &str) -> Result<Vec<CommitRecord>> {
        self.commit_calls.fetch_add(1, Ordering::SeqCst);

        let start = match since_tag {
            Some(tag) => self
                .tags
                .iter()
                .find(|(name, _)| name == tag)
                .map(|(_, position)| *position)
                .ok_or_else(|| ReleaseError::tag(format!("Tag not found: {}", tag)))?,
            None => 0,
        };

        Ok(self.commits[start..].to_vec())
    }
}
