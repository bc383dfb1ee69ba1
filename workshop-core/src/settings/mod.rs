use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_command_timeout_seconds() -> u64 {
    120
}

fn default_max_listing_entries() -> usize {
    500
}

/// Server configuration. Only the base directory is required; everything
/// else has a sensible default so construction from a bare path works.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Settings {
    /// The directory all file and command operations are confined to.
    pub base_directory: PathBuf,

    /// Upper bound for tool-requested command timeouts.
    #[serde(default = "default_command_timeout_seconds")]
    pub command_timeout_seconds: u64,

    /// Maximum entries a single directory listing returns to the client.
    /// Listings beyond this are truncated and flagged - this usually means
    /// build artifacts are not covered by an ignore file yet.
    #[serde(default = "default_max_listing_entries")]
    pub max_listing_entries: usize,
}

impl Settings {
    pub fn new(base_directory: PathBuf) -> Self {
        Self {
            base_directory,
            command_timeout_seconds: default_command_timeout_seconds(),
            max_listing_entries: default_max_listing_entries(),
        }
    }

    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }
}
