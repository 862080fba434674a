//! Workflow layer between the command line and the engine

pub mod orchestration;

pub use orchestration::{run_release_workflow, WorkflowArgs, WorkflowResult};
