use crate::domain::impact::Impact;
use crate::domain::prerelease::{compare_prerelease, to_pep440_prerelease};
use crate::error::{ReleaseError, Result};
use regex::Regex;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Full semver 2.0.0 grammar with an optional leading `v`.
///
/// Groups: 1-3 numeric core, 4 pre-release, 5 build metadata. Numeric fields
/// and numeric pre-release identifiers reject leading zeros; an identifier
/// with a leading zero is only valid when it also contains a non-digit.
const VERSION_PATTERN: &str = concat!(
    r"^v?(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)",
    r"(?:-((?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*)",
    r"(?:\.(?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*))*))?",
    r"(?:\+([0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*))?$",
);

const PRERELEASE_PATTERN: &str = concat!(
    r"^(?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*)",
    r"(?:\.(?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*))*$",
);

const BUILD_PATTERN: &str = r"^[0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*$";

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(VERSION_PATTERN).expect("valid version regex"))
}

fn prerelease_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PRERELEASE_PATTERN).expect("valid pre-release regex"))
}

fn build_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(BUILD_PATTERN).expect("valid build metadata regex"))
}

/// Immutable semantic version value.
///
/// Build metadata is carried and rendered but never takes part in equality
/// or ordering. Every bump returns a new value.
#[derive(Debug, Clone)]
pub struct SemanticVersion {
    major: u64,
    minor: u64,
    patch: u64,
    prerelease: Option<String>,
    build: Option<String>,
}

impl SemanticVersion {
    /// Create a plain release version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
            prerelease: None,
            build: None,
        }
    }

    /// Create a version with pre-release and build metadata.
    ///
    /// # Errors
    /// Returns [`ReleaseError::Version`] when either string does not match the
    /// semver grammar.
    pub fn with_parts(
        major: u64,
        minor: u64,
        patch: u64,
        prerelease: Option<&str>,
        build: Option<&str>,
    ) -> Result<Self> {
        if let Some(pre) = prerelease {
            if !prerelease_regex().is_match(pre) {
                return Err(ReleaseError::version(format!(
                    "Invalid pre-release '{}'",
                    pre
                )));
            }
        }
        if let Some(meta) = build {
            if !build_regex().is_match(meta) {
                return Err(ReleaseError::version(format!(
                    "Invalid build metadata '{}'",
                    meta
                )));
            }
        }

        Ok(SemanticVersion {
            major,
            minor,
            patch,
            prerelease: prerelease.map(str::to_string),
            build: build.map(str::to_string),
        })
    }

    /// Parse `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]`, optionally `v`-prefixed.
    ///
    /// Returns `None` for anything outside the grammar; an unparsable tag is
    /// an ordinary outcome, not an error.
    pub fn parse(s: &str) -> Option<Self> {
        let captures = version_regex().captures(s)?;

        let major = captures.get(1)?.as_str().parse().ok()?;
        let minor = captures.get(2)?.as_str().parse().ok()?;
        let patch = captures.get(3)?.as_str().parse().ok()?;

        Some(SemanticVersion {
            major,
            minor,
            patch,
            prerelease: captures.get(4).map(|m| m.as_str().to_string()),
            build: captures.get(5).map(|m| m.as_str().to_string()),
        })
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    pub fn prerelease(&self) -> Option<&str> {
        self.prerelease.as_deref()
    }

    pub fn build(&self) -> Option<&str> {
        self.build.as_deref()
    }

    /// Whether `other` has the same major.minor.patch
    pub fn same_release(&self, other: &SemanticVersion) -> bool {
        self.major == other.major && self.minor == other.minor && self.patch == other.patch
    }

    /// Bump according to impact, dropping any pre-release and build metadata.
    ///
    /// - **Major**: major += 1, minor = 0, patch = 0
    /// - **Minor**: minor += 1, patch = 0
    /// - **Patch**: patch += 1
    /// - **NoImpact**: numbers unchanged
    ///
    /// # Errors
    /// Returns [`ReleaseError::Version`] when the bumped field would overflow.
    pub fn bump(&self, impact: Impact) -> Result<Self> {
        let overflow = || {
            ReleaseError::version(format!("Cannot apply a {} bump to {}", impact, self))
        };
        let (major, minor, patch) = match impact {
            Impact::Major => (self.major.checked_add(1).ok_or_else(overflow)?, 0, 0),
            Impact::Minor => (self.major, self.minor.checked_add(1).ok_or_else(overflow)?, 0),
            Impact::Patch => (
                self.major,
                self.minor,
                self.patch.checked_add(1).ok_or_else(overflow)?,
            ),
            Impact::NoImpact => (self.major, self.minor, self.patch),
        };
        Ok(SemanticVersion::new(major, minor, patch))
    }

    /// Bump and attach the given pre-release and build metadata verbatim,
    /// whatever the impact.
    ///
    /// # Errors
    /// Fails like [`SemanticVersion::bump`] on overflow and like
    /// [`SemanticVersion::with_parts`] on malformed identifiers.
    pub fn bump_with(
        &self,
        impact: Impact,
        prerelease: Option<&str>,
        build: Option<&str>,
    ) -> Result<Self> {
        let bumped = self.bump(impact)?;
        SemanticVersion::with_parts(
            bumped.major,
            bumped.minor,
            bumped.patch,
            prerelease,
            build,
        )
    }

    /// Render as a `v`-prefixed tag name
    pub fn as_tag(&self) -> String {
        format!("v{}", self)
    }

    /// Heuristic PEP 440 rendering.
    ///
    /// Letter runs followed by digits in the pre-release are mapped
    /// (`alpha`→`a`, `beta`→`b`, `rc`→`rc`), hyphens become dots and build
    /// metadata is dropped. Not a round-trip format and not guaranteed to be
    /// valid PEP 440 for arbitrary pre-release identifiers.
    pub fn as_pep440(&self) -> String {
        let mut rendered = format!("{}.{}.{}", self.major, self.minor, self.patch);
        if let Some(pre) = &self.prerelease {
            rendered.push_str(&to_pep440_prerelease(pre));
        }
        rendered
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.prerelease {
            write!(f, "-{}", pre)?;
        }
        if let Some(build) = &self.build {
            write!(f, "+{}", build)?;
        }
        Ok(())
    }
}

impl FromStr for SemanticVersion {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        SemanticVersion::parse(s)
            .ok_or_else(|| ReleaseError::version(format!("'{}' is not a semantic version", s)))
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then_with(|| compare_prerelease(self.prerelease(), other.prerelease()))
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SemanticVersion {}

impl Serialize for SemanticVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> SemanticVersion {
        SemanticVersion::parse(s).unwrap()
    }

    #[test]
    fn test_version_parse() {
        let version = v("v1.2.3");
        assert_eq!(version.major(), 1);
        assert_eq!(version.minor(), 2);
        assert_eq!(version.patch(), 3);
        assert_eq!(version.prerelease(), None);
        assert_eq!(version.build(), None);
    }

    #[test]
    fn test_version_parse_without_v() {
        assert_eq!(v("1.2.3"), SemanticVersion::new(1, 2, 3));
    }

    #[test]
    fn test_version_parse_full() {
        let version = v("1.0.0-alpha.1+build.5");
        assert_eq!(version.prerelease(), Some("alpha.1"));
        assert_eq!(version.build(), Some("build.5"));
    }

    #[test]
    fn test_version_parse_invalid() {
        for input in [
            "1.2",
            "v1.2.3.4",
            "V1.2.3",
            "01.2.3",
            "1.02.3",
            "1.2.03",
            "1.2.3-01",
            "1.2.3-",
            "1.2.3+",
            "1.2.3-a..b",
            "1.2.3-rc_1",
            " 1.2.3",
            "",
        ] {
            assert!(SemanticVersion::parse(input).is_none(), "{} should not parse", input);
        }
    }

    #[test]
    fn test_version_parse_leading_zero_alphanumeric_identifier() {
        assert_eq!(v("1.2.3-0a").prerelease(), Some("0a"));
        assert_eq!(v("1.2.3+001").build(), Some("001"));
    }

    #[test]
    fn test_with_parts_rejects_invalid() {
        assert!(SemanticVersion::with_parts(1, 0, 0, Some("01"), None).is_err());
        assert!(SemanticVersion::with_parts(1, 0, 0, Some("rc..1"), None).is_err());
        assert!(SemanticVersion::with_parts(1, 0, 0, None, Some("bad!meta")).is_err());
        assert!(SemanticVersion::with_parts(1, 0, 0, Some("rc.1"), Some("sha.abc")).is_ok());
    }

    #[test]
    fn test_version_bump_major() {
        assert_eq!(v("1.2.3").bump(Impact::Major).unwrap(), SemanticVersion::new(2, 0, 0));
    }

    #[test]
    fn test_version_bump_minor() {
        assert_eq!(v("1.2.3").bump(Impact::Minor).unwrap(), SemanticVersion::new(1, 3, 0));
    }

    #[test]
    fn test_version_bump_patch() {
        assert_eq!(v("1.2.3").bump(Impact::Patch).unwrap(), SemanticVersion::new(1, 2, 4));
    }

    #[test]
    fn test_version_bump_no_impact() {
        assert_eq!(v("1.2.3").bump(Impact::NoImpact).unwrap(), SemanticVersion::new(1, 2, 3));
    }

    #[test]
    fn test_version_bump_does_not_mutate() {
        let original = v("1.2.3-rc.1+meta");
        let _ = original.bump(Impact::Major);
        assert_eq!(original.to_string(), "1.2.3-rc.1+meta");
    }

    #[test]
    fn test_version_bump_overflow() {
        let max = v("18446744073709551615.0.0");
        assert!(matches!(max.bump(Impact::Major), Err(ReleaseError::Version(_))));
        assert_eq!(max.bump(Impact::Minor).unwrap().to_string(), "18446744073709551615.1.0");

        let max_patch = v("1.2.18446744073709551615");
        assert!(max_patch.bump(Impact::Patch).is_err());
        assert!(max_patch.bump_with(Impact::Patch, Some("rc0"), None).is_err());
        assert_eq!(max_patch.bump(Impact::NoImpact).unwrap(), max_patch);
    }

    #[test]
    fn test_version_bump_with_prerelease() {
        let bumped = v("1.2.0").bump_with(Impact::NoImpact, Some("rc2"), None).unwrap();
        assert_eq!(bumped.to_string(), "1.2.0-rc2");

        let bumped = v("1.2.0").bump_with(Impact::Minor, Some("rc0"), Some("ci.7")).unwrap();
        assert_eq!(bumped.to_string(), "1.3.0-rc0+ci.7");

        assert!(v("1.2.0").bump_with(Impact::Minor, Some("rc 0"), None).is_err());
    }

    #[test]
    fn test_version_display() {
        assert_eq!(SemanticVersion::new(1, 2, 3).to_string(), "1.2.3");
        assert_eq!(v("v1.2.3-beta.2+exp.sha.5114f85").to_string(), "1.2.3-beta.2+exp.sha.5114f85");
    }

    #[test]
    fn test_version_as_tag() {
        assert_eq!(v("1.2.3-rc1").as_tag(), "v1.2.3-rc1");
    }

    #[test]
    fn test_version_as_pep440() {
        assert_eq!(v("1.2.3").as_pep440(), "1.2.3");
        assert_eq!(v("1.2.3-rc1").as_pep440(), "1.2.3rc1");
        assert_eq!(v("1.2.3-alpha2+build.9").as_pep440(), "1.2.3a2");
        assert_eq!(v("1.2.3-beta1-x").as_pep440(), "1.2.3b1.x");
    }

    #[test]
    fn test_version_ordering_chain() {
        let chain = [
            "1.0.0-alpha",
            "1.0.0-alpha.1",
            "1.0.0-alpha.beta",
            "1.0.0-beta",
            "1.0.0-beta.2",
            "1.0.0-beta.11",
            "1.0.0-rc.1",
            "1.0.0",
        ];
        for pair in chain.windows(2) {
            assert!(v(pair[0]) < v(pair[1]), "{} < {}", pair[0], pair[1]);
            assert!(v(pair[1]) > v(pair[0]), "{} > {}", pair[1], pair[0]);
        }
    }

    #[test]
    fn test_version_ordering_numeric_fields() {
        assert!(v("1.10.0") > v("1.9.0"));
        assert!(v("2.0.0") > v("1.99.99"));
        assert!(v("1.0.1-alpha") > v("1.0.0"));
    }

    #[test]
    fn test_version_equality_ignores_build() {
        assert_eq!(v("1.0.0+a"), v("1.0.0+b"));
        assert_eq!(v("1.0.0-rc.1+a").cmp(&v("1.0.0-rc.1")), Ordering::Equal);
        assert_ne!(v("1.0.0-rc.1"), v("1.0.0"));
    }

    #[test]
    fn test_version_from_str() {
        let parsed: SemanticVersion = "v3.1.4".parse().unwrap();
        assert_eq!(parsed, SemanticVersion::new(3, 1, 4));
        assert!("banana".parse::<SemanticVersion>().is_err());
    }

    #[test]
    fn test_version_serializes_as_string() {
        let json = serde_json::to_string(&v("1.2.3-rc.1")).unwrap();
        assert_eq!(json, "\"1.2.3-rc.1\"");
    }
}
