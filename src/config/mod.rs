//! Configuration loading, parsing, and validation for clusterup.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Deep merging in [`merger`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use clusterup::config::{load_merged_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".clusterup");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "readiness:\n  max_attempts: 20\n").unwrap();
//!
//! let config = load_merged_config(temp.path()).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.readiness.max_attempts, 20);
//! ```
//!
//! # Configuration File Locations
//!
//! 1. Project config (`.clusterup/config.yml`)
//! 2. Local overrides (`.clusterup/config.local.yml`)
//!
//! `--config <path>` replaces both with a single file.

pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use loader::{
    find_project_root, load_config, load_config_file, load_config_value, load_merged_config,
    ConfigPaths, CONFIG_DIR,
};
pub use merger::{deep_merge, merge_configs};
pub use schema::{ClusterUpConfig, HandoffSettings, ProvisionerSettings, ReadinessSettings};
pub use validator::{validate, validate_config, ValidationError};
