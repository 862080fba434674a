//! Conventional commit classification
//!
//! Titles follow `type(scope)!: description`. The recognized types form a
//! closed set, each mapped to a base [`Impact`]; a `!` marker forces
//! [`Impact::Major`]. Bodies only ever contribute a breaking-change signal.

use crate::domain::impact::Impact;
use crate::domain::pull_request::ConventionalSource;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

/// `type` is one or more word characters, `scope` any run of non-`)`
/// characters, `!` an optional breaking marker.
const TITLE_PATTERN: &str = r"^(\w+)(?:\(([^)]*)\))?(!)?:\s*(.*)$";

/// Renovate-style quoted changelog: a `---` line, a `### Release Notes`
/// heading, one or more `<details>` blocks, then the next `---` line. Only
/// whitespace may separate the heading, the blocks and the delimiters. Lines
/// may end in `\r\n`.
const QUOTED_NOTES_PATTERN: &str = concat!(
    r"(?msR)^---[ \t]*$\s*^### Release Notes[ \t]*$\s*",
    r"<details>.*?</details>(?:\s*<details>.*?</details>)*",
    r"\s*^---[ \t]*$",
);

const BREAKING_MARKER: &str = "BREAKING CHANGE";

fn title_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TITLE_PATTERN).expect("valid title regex"))
}

fn quoted_notes_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(QUOTED_NOTES_PATTERN).expect("valid release notes regex"))
}

/// Recognized conventional commit types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    Docs,
    Style,
    Test,
    Chore,
    Build,
    Ci,
    Refactor,
    Fix,
    Perf,
    Feat,
}

impl CommitType {
    /// Look up a type tag. Matching is case-sensitive.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let kind = match tag {
            "docs" => CommitType::Docs,
            "style" => CommitType::Style,
            "test" => CommitType::Test,
            "chore" => CommitType::Chore,
            "build" => CommitType::Build,
            "ci" => CommitType::Ci,
            "refactor" => CommitType::Refactor,
            "fix" => CommitType::Fix,
            "perf" => CommitType::Perf,
            "feat" => CommitType::Feat,
            _ => return None,
        };
        Some(kind)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Docs => "docs",
            CommitType::Style => "style",
            CommitType::Test => "test",
            CommitType::Chore => "chore",
            CommitType::Build => "build",
            CommitType::Ci => "ci",
            CommitType::Refactor => "refactor",
            CommitType::Fix => "fix",
            CommitType::Perf => "perf",
            CommitType::Feat => "feat",
        }
    }

    /// Impact of this type without a breaking marker
    pub fn base_impact(&self) -> Impact {
        match self {
            CommitType::Docs
            | CommitType::Style
            | CommitType::Test
            | CommitType::Chore
            | CommitType::Build
            | CommitType::Ci => Impact::NoImpact,
            CommitType::Refactor | CommitType::Fix | CommitType::Perf => Impact::Patch,
            CommitType::Feat => Impact::Minor,
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of one commit or pull request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParsedCommitInfo {
    #[serde(rename = "type")]
    pub commit_type: CommitType,
    pub impact: Impact,
}

/// The pieces of a conventional title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionalTitle<'a> {
    pub commit_type: CommitType,
    pub scope: Option<&'a str>,
    pub breaking: bool,
    pub description: &'a str,
}

impl<'a> ConventionalTitle<'a> {
    /// Split a title into its parts, or `None` if it is not conventional
    pub fn split(title: &'a str) -> Option<Self> {
        let captures = title_regex().captures(title)?;
        let commit_type = CommitType::from_tag(captures.get(1)?.as_str())?;

        Some(ConventionalTitle {
            commit_type,
            scope: captures.get(2).map(|m| m.as_str()).filter(|s| !s.is_empty()),
            breaking: captures.get(3).is_some(),
            description: captures.get(4).map_or("", |m| m.as_str()),
        })
    }

    pub fn info(&self) -> ParsedCommitInfo {
        let impact = if self.breaking {
            Impact::Major
        } else {
            self.commit_type.base_impact()
        };
        ParsedCommitInfo {
            commit_type: self.commit_type,
            impact,
        }
    }
}

/// Classify a commit or pull-request title.
///
/// ```
/// use conventional_bump::domain::{parse_conventional_title, Impact};
///
/// assert_eq!(parse_conventional_title("feat(api)!: drop v1").unwrap().impact, Impact::Major);
/// assert!(parse_conventional_title("Feat: capitalized").is_none());
/// ```
pub fn parse_conventional_title(title: &str) -> Option<ParsedCommitInfo> {
    ConventionalTitle::split(title).map(|parts| parts.info())
}

/// Remove quoted third-party release notes from a body
pub fn strip_quoted_release_notes(body: &str) -> std::borrow::Cow<'_, str> {
    quoted_notes_regex().replace_all(body, "")
}

/// `Some(Impact::Major)` when the body, minus quoted release notes, contains
/// a breaking-change marker.
pub fn parse_conventional_body(body: &str) -> Option<Impact> {
    strip_quoted_release_notes(body)
        .contains(BREAKING_MARKER)
        .then_some(Impact::Major)
}

/// Classify a title and optional body together.
///
/// The title decides whether the item is conventional at all; the body can
/// only raise the impact to major, keeping the title's type.
pub fn get_conventional_impact<T: ConventionalSource + ?Sized>(
    item: &T,
) -> Option<ParsedCommitInfo> {
    let mut info = parse_conventional_title(item.title())?;

    if let Some(body_impact) = item.body().and_then(parse_conventional_body) {
        if body_impact > info.impact {
            info.impact = body_impact;
        }
    }

    Some(info)
}
