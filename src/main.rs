use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use conventional_bump::cli::{run_release_workflow, WorkflowArgs};
use conventional_bump::config;
use conventional_bump::domain::{Label, PullRequest};
use conventional_bump::git::{CachedRepository, Git2Repository};
use conventional_bump::{ui, ReleaseError};

#[derive(clap::Parser)]
#[command(
    name = "conventional-bump",
    version,
    about = "Resolve the next semantic version from a pull request and its conventional commits"
)]
struct Args {
    #[arg(long, default_value = ".", help = "Repository to analyze")]
    repo: PathBuf,

    #[arg(long, default_value = "HEAD", help = "Revision whose history is analyzed")]
    rev: String,

    #[arg(long, default_value = "", help = "Pull request title")]
    title: String,

    #[arg(long, help = "Pull request body")]
    body: Option<String>,

    #[arg(long = "label", help = "Pull request label (repeatable)")]
    labels: Vec<String>,

    #[arg(long, help = "The pull request is already merged")]
    merged: bool,

    #[arg(long, help = "Latest release name, instead of discovering it from tags")]
    latest_release: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Write release notes to this file")]
    notes: Option<PathBuf>,

    #[arg(long, env = "GITHUB_STEP_SUMMARY", help = "Append a Markdown job summary to this file")]
    summary: Option<PathBuf>,

    #[arg(long, help = "Print the result as JSON")]
    json: bool,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let repo = match Git2Repository::open(&args.repo) {
        Ok(repo) => CachedRepository::new(repo),
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    let pull_request = PullRequest {
        title: args.title.clone(),
        body: args.body.clone(),
        labels: args
            .labels
            .iter()
            .map(|name| Label { name: name.clone() })
            .collect(),
        merged: args.merged,
    };
    let workflow_args = WorkflowArgs {
        pull_request,
        rev: args.rev.clone(),
        latest_release: args.latest_release.clone(),
    };

    let result = match run_release_workflow(&repo, &workflow_args, &config) {
        Ok(result) => result,
        Err(ReleaseError::NoImpactDetermined) => {
            ui::display_error("No Impact determined");
            std::process::exit(1);
        }
        Err(e) => {
            ui::display_error(&format!("Failed to resolve release: {}", e));
            std::process::exit(1);
        }
    };

    if let Some(path) = &args.notes {
        std::fs::write(path, &result.notes)?;
    }
    if let Some(path) = &args.summary {
        ui::append_summary(path, &ui::render_summary(&result))?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    for warning in &result.warnings {
        ui::display_boundary_warning(warning);
    }
    ui::display_impact_result(&result.impact);
    ui::display_version_change(&result.baseline, &result.next_version);
    if let Some(label) = &result.prerelease {
        ui::display_status(&format!("Release candidate: {}", label));
    }
    ui::display_success(&format!("Next tag: {}", result.tag));

    Ok(())
}
