//! Configuration for the CLI layer.
//!
//! The engine itself takes everything through `AnalyzeOptions`; this file
//! only decides where those values come from.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = ".rubymetrics.toml";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RubymetricsConfig {
    /// Entries kept in the largest-files listing.
    #[serde(default = "default_largest_files")]
    pub largest_files: usize,
    /// Glob patterns excluded from discovery.
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
    /// Extensions analyzed in addition to the built-in Ruby set.
    #[serde(default)]
    pub extra_extensions: Vec<String>,
}

fn default_largest_files() -> usize {
    10
}

impl Default for RubymetricsConfig {
    fn default() -> Self {
        Self {
            largest_files: default_largest_files(),
            ignore_patterns: Vec::new(),
            extra_extensions: Vec::new(),
        }
    }
}

impl RubymetricsConfig {
    /// Load from an explicit file, or from `.rubymetrics.toml` under `root`
    /// when present; defaults otherwise.
    pub fn load(explicit: Option<&Path>, root: &Path) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = root.join(CONFIG_FILE_NAME);
                if !candidate.is_file() {
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let content = std::fs::read_to_string(&path).map_err(|source| Error::FileSystem {
            message: "failed to read config".to_string(),
            path: Some(path.clone()),
            source: Some(source),
        })?;
        toml::from_str(&content)
            .map_err(|err| Error::Configuration(format!("{}: {err}", path.display())))
    }
}

/// Write a default config file into the current directory.
pub fn init_config(force: bool) -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);
    if path.exists() && !force {
        return Err(Error::Configuration(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    let content = toml::to_string_pretty(&RubymetricsConfig::default())
        .map_err(|err| Error::Configuration(err.to_string()))?;
    std::fs::write(path, content)?;
    Ok(())
}
