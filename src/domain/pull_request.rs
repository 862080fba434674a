use serde::{Deserialize, Serialize};

/// Anything with a conventional-commit style title and optional body
pub trait ConventionalSource {
    fn title(&self) -> &str;
    fn body(&self) -> Option<&str>;
}

/// A commit as supplied by the source-control adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub sha: String,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
}

impl CommitRecord {
    pub fn new(sha: impl Into<String>, title: impl Into<String>) -> Self {
        CommitRecord {
            sha: sha.into(),
            title: title.into(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// First seven characters of the sha
    pub fn short_sha(&self) -> &str {
        self.sha.get(..7).unwrap_or(&self.sha)
    }
}

impl ConventionalSource for CommitRecord {
    fn title(&self) -> &str {
        &self.title
    }

    fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
}

/// The pull request whose merge (or pre-merge build) is being versioned
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PullRequest {
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub merged: bool,
}

impl PullRequest {
    pub fn new(title: impl Into<String>) -> Self {
        PullRequest {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_label(mut self, name: impl Into<String>) -> Self {
        self.labels.push(Label { name: name.into() });
        self
    }

    pub fn merged(mut self, merged: bool) -> Self {
        self.merged = merged;
        self
    }

    /// Case-insensitive exact match on a label name
    pub fn has_label(&self, name: &str) -> bool {
        self.labels
            .iter()
            .any(|label| label.name.to_lowercase() == name.to_lowercase())
    }
}

impl ConventionalSource for PullRequest {
    fn title(&self) -> &str {
        &self.title
    }

    fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}
