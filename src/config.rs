use crate::analyzer::release_candidate::DEFAULT_RC_LABEL;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory and the user config directory
pub const CONFIG_FILE_NAME: &str = "conventional-bump.toml";

/// Represents the complete configuration for conventional-bump.
///
/// Contains release resolution settings and release-notes rendering options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub notes: NotesConfig,
}

fn default_release_candidate_label() -> String {
    DEFAULT_RC_LABEL.to_string()
}

fn default_initial_version() -> String {
    "0.0.0".to_string()
}

fn default_true() -> bool {
    true
}

/// Settings for resolving the next version.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    /// Pull request label that requests a release-candidate tag
    #[serde(default = "default_release_candidate_label")]
    pub release_candidate_label: String,

    /// Baseline used when no release tag exists or it cannot be parsed
    #[serde(default = "default_initial_version")]
    pub initial_version: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            release_candidate_label: default_release_candidate_label(),
            initial_version: default_initial_version(),
        }
    }
}

/// Settings for release-notes generation.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NotesConfig {
    /// List non-conventional commits under "Other Changes"
    #[serde(default = "default_true")]
    pub include_other: bool,

    /// Append the short sha to every entry
    #[serde(default = "default_true")]
    pub show_sha: bool,
}

impl Default for NotesConfig {
    fn default() -> Self {
        NotesConfig {
            include_other: true,
            show_sha: true,
        }
    }
}

fn discover_config_path() -> Option<PathBuf> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `conventional-bump.toml` in current directory
/// 3. `conventional-bump.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let path = match config_path {
        Some(path) => PathBuf::from(path),
        None => match discover_config_path() {
            Some(path) => path,
            None => return Ok(Config::default()),
        },
    };

    let config_str = fs::read_to_string(&path)?;
    let config: Config = toml::from_str(&config_str)?;
    tracing::debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}
