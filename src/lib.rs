//! Next-version resolution from conventional commits.
//!
//! The [`domain`] and [`analyzer`] modules form a pure engine: semantic
//! version parsing and precedence, conventional-commit classification, impact
//! aggregation and release-candidate indexing. The remaining modules adapt it
//! to git repositories, configuration files and CI output.

pub mod analyzer;
pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod notes;
pub mod ui;

pub use error::{ReleaseError, Result};
