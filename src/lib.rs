//! clusterup - Provision Kubernetes clusters on AWS with kops.
//!
//! clusterup checks that the required tools are installed, resolves the
//! cluster parameters from flags, environment, and prompts, runs
//! `kops create cluster`, waits for `kubectl get node` to succeed, and then
//! hands the cluster to a platform installer.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, merging, and validation
//! - [`error`] - Error types and result aliases
//! - [`params`] - Parameter resolution
//! - [`provision`] - Command building, readiness polling, and orchestration
//! - [`requirements`] - Required tool detection and installation
//! - [`shell`] - Subprocess execution
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use clusterup::params::ProvisionRequest;
//! use clusterup::provision::CommandBuilder;
//!
//! let request = ProvisionRequest {
//!     node_count: Some("3".to_string()),
//!     kubernetes_version: None,
//!     availability_zones: "us-east-1a".to_string(),
//!     use_rbac: true,
//! };
//! assert_eq!(
//!     CommandBuilder::default().display(&request),
//!     "kops create cluster --node-count 3 --authorization RBAC --zones us-east-1a --yes"
//! );
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod params;
pub mod provision;
pub mod requirements;
pub mod shell;
pub mod ui;

pub use error::{ClusterUpError, FailureKind, Result};
