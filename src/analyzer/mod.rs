//! Aggregation and release-candidate policy on top of the domain rules

pub mod impact_analyzer;
pub mod release_candidate;

pub use impact_analyzer::{get_impact, ImpactResult};
pub use release_candidate::{resolve_release_candidate, ReleaseCandidateResolver};
