//! User interface module - terminal output and job summaries.
//!
//! Separates concerns:
//! - `formatter` - Terminal formatting
//! - `summary` - Markdown job summary rendering

pub mod formatter;
pub mod summary;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_error, display_impact_result, display_status,
    display_success, display_version_change,
};
pub use summary::{append_summary, render_summary};
