//! Configuration file discovery and loading.
//!
//! This module handles finding and loading configuration files from
//! the project directory in the correct priority order.

use crate::config::merger::merge_configs;
use crate::config::schema::ClusterUpConfig;
use crate::error::{ClusterUpError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding clusterup configuration inside a project.
pub const CONFIG_DIR: &str = ".clusterup";

/// Paths to configuration files in priority order (later overrides earlier).
///
/// Merge order:
/// 1. Project config (`.clusterup/config.yml`)
/// 2. Local overrides (`.clusterup/config.local.yml`)
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project config: .clusterup/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .clusterup/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            project: existing(project_root.join(CONFIG_DIR).join("config.yml")),
            project_local: existing(project_root.join(CONFIG_DIR).join("config.local.yml")),
        }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(self.project_local.iter()).collect()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Find the project root by walking up from `start`.
///
/// Looks for a `.clusterup` directory first and a `.git` directory as a
/// fallback. Returns `None` if neither is found.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(CONFIG_DIR).is_dir() {
            return Some(current);
        }

        if current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load a single config file and parse it into `ClusterUpConfig`.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ClusterUpConfig> {
    let value = load_config_value(path)?;
    parse_config_value(value, path)
}

/// Load a config file as raw YAML Value (for merging).
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ClusterUpError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ClusterUpError::Io(e)
        }
    })?;

    let value: serde_yaml::Value =
        serde_yaml::from_str(&content).map_err(|e| ClusterUpError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    // An empty file parses as null; treat it as an empty mapping.
    if value.is_null() {
        Ok(serde_yaml::Value::Mapping(Default::default()))
    } else {
        Ok(value)
    }
}

fn parse_config_value(value: serde_yaml::Value, source_path: &Path) -> Result<ClusterUpConfig> {
    serde_yaml::from_value(value).map_err(|e| ClusterUpError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and merge the project's config files.
///
/// Unlike an explicit `--config` path, missing project files are not an
/// error: the defaults describe a working kops/kubectl/jx setup.
pub fn load_merged_config(project_root: &Path) -> Result<ClusterUpConfig> {
    let paths = ConfigPaths::discover(project_root);

    let mut configs = Vec::new();
    for path in paths.all_existing() {
        tracing::debug!("Loading config from {}", path.display());
        configs.push(load_config_value(path)?);
    }

    if configs.is_empty() {
        tracing::debug!("No config files found, using defaults");
        return Ok(ClusterUpConfig::default());
    }

    let merged = merge_configs(&configs);
    parse_config_value(merged, &project_root.join(CONFIG_DIR).join("config.yml"))
}

/// Load config with optional path override.
///
/// If `config_override` is provided, loads only that file without merging.
/// Otherwise, discovers and merges the project's config files.
pub fn load_config(
    project_root: &Path,
    config_override: Option<&Path>,
) -> Result<ClusterUpConfig> {
    match config_override {
        Some(path) => load_config_file(path),
        None => load_merged_config(project_root),
    }
}
