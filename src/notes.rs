//! Markdown release notes grouped by conventional commit type

use crate::config::NotesConfig;
use crate::domain::{get_conventional_impact, CommitRecord, CommitType, ConventionalTitle, Impact};
use std::collections::BTreeMap;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Section {
    Breaking,
    Features,
    Fixes,
    Performance,
    Refactoring,
    Maintenance,
    Other,
}

impl Section {
    fn heading(self) -> &'static str {
        match self {
            Section::Breaking => "⚠ Breaking Changes",
            Section::Features => "Features",
            Section::Fixes => "Bug Fixes",
            Section::Performance => "Performance",
            Section::Refactoring => "Refactoring",
            Section::Maintenance => "Maintenance",
            Section::Other => "Other Changes",
        }
    }

    fn for_type(commit_type: CommitType) -> Self {
        match commit_type {
            CommitType::Feat => Section::Features,
            CommitType::Fix => Section::Fixes,
            CommitType::Perf => Section::Performance,
            CommitType::Refactor => Section::Refactoring,
            CommitType::Docs
            | CommitType::Style
            | CommitType::Test
            | CommitType::Chore
            | CommitType::Build
            | CommitType::Ci => Section::Maintenance,
        }
    }
}

fn entry(text: &str, scope: Option<&str>, commit: &CommitRecord, options: &NotesConfig) -> String {
    let mut line = String::from("- ");
    if let Some(scope) = scope {
        let _ = write!(line, "**{}:** ", scope);
    }
    line.push_str(text);
    if options.show_sha {
        let _ = write!(line, " ({})", commit.short_sha());
    }
    line
}

fn classify(commit: &CommitRecord, options: &NotesConfig) -> Option<(Section, String)> {
    let Some(title) = ConventionalTitle::split(&commit.title) else {
        return options
            .include_other
            .then(|| (Section::Other, entry(&commit.title, None, commit, options)));
    };

    let breaking = get_conventional_impact(commit).is_some_and(|info| info.impact == Impact::Major);
    let section = if breaking {
        Section::Breaking
    } else {
        Section::for_type(title.commit_type)
    };

    Some((section, entry(title.description, title.scope, commit, options)))
}

/// Render release notes for `commits` under a `## <tag>` heading.
pub fn render_release_notes(tag: &str, commits: &[CommitRecord], options: &NotesConfig) -> String {
    let mut sections: BTreeMap<Section, Vec<String>> = BTreeMap::new();
    for (section, line) in commits.iter().filter_map(|commit| classify(commit, options)) {
        sections.entry(section).or_default().push(line);
    }

    let mut notes = format!("## {}\n", tag);
    if sections.is_empty() {
        notes.push_str("\nNo changes.\n");
        return notes;
    }

    for (section, lines) in sections {
        let _ = write!(notes, "\n### {}\n\n", section.heading());
        for line in lines {
            notes.push_str(&line);
            notes.push('\n');
        }
    }
    notes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<CommitRecord> {
        vec![
            CommitRecord::new("1111111aaaa", "fix(parser): handle empty input"),
            CommitRecord::new("2222222bbbb", "feat: add search"),
            CommitRecord::new("3333333cccc", "docs: update readme"),
            CommitRecord::new("4444444dddd", "refactor(api)!: rename endpoints"),
            CommitRecord::new("5555555eeee", "Merge branch 'main'"),
            CommitRecord::new("6666666ffff", "fix: drop flag").with_body("BREAKING CHANGE: flag removed"),
        ]
    }

    #[test]
    fn test_sections_in_order() {
        let notes = render_release_notes("v2.0.0", &sample(), &NotesConfig::default());

        let breaking = notes.find("### ⚠ Breaking Changes").unwrap();
        let features = notes.find("### Features").unwrap();
        let fixes = notes.find("### Bug Fixes").unwrap();
        let maintenance = notes.find("### Maintenance").unwrap();
        let other = notes.find("### Other Changes").unwrap();

        assert!(notes.starts_with("## v2.0.0\n"));
        assert!(breaking < features && features < fixes && fixes < maintenance);
        assert!(maintenance < other);
        assert!(!notes.contains("### Refactoring"));
    }

    #[test]
    fn test_entry_format() {
        let notes = render_release_notes("v2.0.0", &sample(), &NotesConfig::default());
        assert!(notes.contains("- **parser:** handle empty input (1111111)\n"));
        assert!(notes.contains("- **api:** rename endpoints (4444444)\n"));
        assert!(notes.contains("- drop flag (6666666)\n"));
        assert!(notes.contains("- Merge branch 'main' (5555555)\n"));
    }

    #[test]
    fn test_options() {
        let options = NotesConfig {
            include_other: false,
            show_sha: false,
        };
        let notes = render_release_notes("v2.0.0", &sample(), &options);
        assert!(!notes.contains("Other Changes"));
        assert!(notes.contains("- add search\n"));
    }

    #[test]
    fn test_no_changes() {
        let notes = render_release_notes("v1.0.1", &[], &NotesConfig::default());
        assert_eq!(notes, "## v1.0.1\n\nNo changes.\n");
    }
}
