use serde::Serialize;
use std::fmt;

/// Versioning severity of a change, ascending.
///
/// The derived ordering is relied upon: aggregation takes the maximum and the
/// discriminant doubles as a sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    NoImpact = 0,
    Patch = 1,
    Minor = 2,
    Major = 3,
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Impact::NoImpact => write!(f, "no impact"),
            Impact::Patch => write!(f, "patch"),
            Impact::Minor => write!(f, "minor"),
            Impact::Major => write!(f, "major"),
        }
    }
}
