//! Pre-release identifier handling
//!
//! Precedence of pre-release strings follows semver.org item 11: identifiers are
//! compared left to right, numeric identifiers numerically and below
//! alphanumeric ones, and a longer identifier list wins a tie on the shared
//! prefix. This module also holds the release-candidate index scan over
//! existing tag names and the PEP 440 identifier mapping.

use crate::domain::version::SemanticVersion;
use regex::Regex;
use std::cmp::Ordering;
use std::sync::OnceLock;

/// Letter runs rewritten by [`to_pep440_prerelease`]; anything else passes through.
const PEP440_LETTERS: [(&str, &str); 3] = [("alpha", "a"), ("beta", "b"), ("rc", "rc")];

fn is_numeric(identifier: &str) -> bool {
    !identifier.is_empty() && identifier.bytes().all(|b| b.is_ascii_digit())
}

/// Compare two digit strings by value without overflowing.
fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn compare_identifier(a: &str, b: &str) -> Ordering {
    match (is_numeric(a), is_numeric(b)) {
        (true, true) => compare_numeric(a, b),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.cmp(b),
    }
}

/// Compare two optional pre-release strings by semver precedence.
///
/// A missing pre-release denotes a final release and sorts above any
/// pre-release of the same version:
///
/// ```
/// use conventional_bump::domain::compare_prerelease;
/// use std::cmp::Ordering;
///
/// assert_eq!(compare_prerelease(None, Some("rc.1")), Ordering::Greater);
/// assert_eq!(compare_prerelease(Some("alpha"), Some("alpha.1")), Ordering::Less);
/// assert_eq!(compare_prerelease(Some("beta.2"), Some("beta.11")), Ordering::Less);
/// ```
pub fn compare_prerelease(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let left: Vec<&str> = a.split('.').collect();
            let right: Vec<&str> = b.split('.').collect();

            left.iter()
                .zip(right.iter())
                .map(|(x, y)| compare_identifier(x, y))
                .find(|ordering| *ordering != Ordering::Equal)
                .unwrap_or_else(|| left.len().cmp(&right.len()))
        }
    }
}

fn rc_token_regex() -> &'static Regex {
    static RC_TOKEN: OnceLock<Regex> = OnceLock::new();
    RC_TOKEN.get_or_init(|| Regex::new(r"^(?i:rc)([0-9]+)$").expect("valid rc token regex"))
}

/// Release-candidate numbers named by one pre-release string.
///
/// Accepts `rc<digits>` tokens, and a bare `rc` token either as the last token
/// (meaning 0) or directly followed by a numeric token. Everything else,
/// `rcX` and `rc.beta` included, is ignored.
fn rc_numbers(prerelease: &str) -> Vec<u64> {
    let tokens: Vec<&str> = prerelease.split(['.', '-', '_']).collect();
    let mut numbers = Vec::new();

    for (i, token) in tokens.iter().enumerate() {
        if let Some(captures) = rc_token_regex().captures(token) {
            if let Ok(n) = captures[1].parse::<u64>() {
                numbers.push(n);
            }
        } else if token.eq_ignore_ascii_case("rc") {
            match tokens.get(i + 1) {
                None => numbers.push(0),
                Some(next) if is_numeric(next) => {
                    if let Ok(n) = next.parse::<u64>() {
                        numbers.push(n);
                    }
                }
                Some(_) => {}
            }
        }
    }

    numbers
}

/// Next release-candidate index for `base` given existing tag names.
///
/// Only names that parse as semantic versions, carry a pre-release and share
/// `base`'s major.minor.patch are considered. Returns one past the highest
/// release-candidate number found, or 0 when none is found. A number with no
/// successor in `u64` is ignored.
pub fn next_rc_index<I, S>(base: &SemanticVersion, tag_names: I) -> u64
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tag_names
        .into_iter()
        .filter_map(|name| SemanticVersion::parse(name.as_ref()))
        .filter(|version| version.same_release(base))
        .filter_map(|version| version.prerelease().map(rc_numbers))
        .flatten()
        .filter_map(|n| n.checked_add(1))
        .max()
        .unwrap_or(0)
}

fn pep440_letters_regex() -> &'static Regex {
    static LETTERS: OnceLock<Regex> = OnceLock::new();
    LETTERS.get_or_init(|| Regex::new(r"([A-Za-z]+)([0-9]+)").expect("valid pep440 regex"))
}

/// Best-effort rewrite of a semver pre-release into PEP 440 spelling.
///
/// Lossy and one-way: unknown letter runs are kept verbatim, so the result
/// is not guaranteed to be a valid PEP 440 segment.
pub fn to_pep440_prerelease(prerelease: &str) -> String {
    let mapped = pep440_letters_regex().replace_all(prerelease, |caps: &regex::Captures| {
        let letters = &caps[1];
        let short = PEP440_LETTERS
            .iter()
            .find(|(long, _)| *long == letters)
            .map_or(letters, |(_, short)| *short);
        format!("{}{}", short, &caps[2])
    });
    mapped.replace('-', ".")
}
