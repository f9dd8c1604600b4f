use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::analysis::Checks;

fn default_verbose() -> bool {
    false
}

/// Settings read from `offcheck.toml`
///
/// ```toml
/// verbose = true
///
/// [checks]
/// open_edges = false
/// ```
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct FileConfig {
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    #[serde(default)]
    pub checks: Checks,
}

impl FileConfig {
    /// Read an explicitly requested config file
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Search the usual locations and return the first config that parses
    pub fn load() -> Option<Self> {
        Self::load_from(&get_config_paths())
    }

    fn load_from(config_paths: &[PathBuf]) -> Option<Self> {
        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("offcheck.toml"));
    paths.push(PathBuf::from(".offcheck.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("offcheck").join("config.toml"));
        paths.push(config_dir.join("offcheck.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".offcheck.toml"));
        paths.push(home.join(".config").join("offcheck").join("config.toml"));
    }

    paths
}
