//! Error types for clusterup operations.
//!
//! This module defines [`ClusterUpError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Each pipeline stage fails with its own variant so callers can tell
//!   which stage stopped the run (see [`FailureKind`])
//! - Use `anyhow::Error` (via `ClusterUpError::Other`) for unexpected errors
//! - All errors should provide actionable messages for users

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for clusterup operations.
#[derive(Debug, Error)]
pub enum ClusterUpError {
    /// A required tool is missing and could not be installed.
    #[error("Missing required dependencies ({tools}): {message}\nPlease fix the error or install manually then try again")]
    UnresolvedDependency { tools: String, message: String },

    /// A required parameter could not be resolved from any source.
    #[error("Missing required parameter '{name}': {message}")]
    MissingRequiredParameter { name: String, message: String },

    /// Prompting for a required value failed.
    #[error("Failed to prompt for '{field}': {message}")]
    PromptFailure { field: String, message: String },

    /// The provisioning tool exited non-successfully or could not start.
    #[error("Provisioning command failed ({reason}): {command}")]
    ProvisionInvocationFailure { command: String, reason: String },

    /// The cluster never answered a readiness probe.
    #[error("Failed to wait for Kubernetes cluster to start after {attempts} attempts: {last_error}")]
    ReadinessTimeout { attempts: u32, last_error: String },

    /// The downstream platform installer failed.
    #[error("Platform installation for provider {provider} failed: {message}")]
    InstallHandoffFailure { provider: String, message: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Shell command failed.
    #[error("Command failed ({}): {command}", exit_status(.code))]
    CommandFailed { command: String, code: Option<i32> },

    /// A program could not be started at all.
    #[error("Could not start `{command}`: {message}")]
    CommandNotStarted { command: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// The pipeline failure a [`ClusterUpError`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    UnresolvedDependency,
    MissingRequiredParameter,
    PromptFailure,
    ProvisionInvocationFailure,
    ReadinessTimeout,
    InstallHandoffFailure,
}

impl ClusterUpError {
    /// Map this error to its pipeline failure kind.
    ///
    /// Returns `None` for errors raised outside the provisioning pipeline
    /// (configuration, IO, and so on).
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            Self::UnresolvedDependency { .. } => Some(FailureKind::UnresolvedDependency),
            Self::MissingRequiredParameter { .. } => Some(FailureKind::MissingRequiredParameter),
            Self::PromptFailure { .. } => Some(FailureKind::PromptFailure),
            Self::ProvisionInvocationFailure { .. } => {
                Some(FailureKind::ProvisionInvocationFailure)
            }
            Self::ReadinessTimeout { .. } => Some(FailureKind::ReadinessTimeout),
            Self::InstallHandoffFailure { .. } => Some(FailureKind::InstallHandoffFailure),
            _ => None,
        }
    }

    /// Process exit code the binary should use for this error.
    ///
    /// Dependency failures get their own code so wrappers can tell
    /// "fix your machine" apart from "the cluster failed".
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::UnresolvedDependency { .. } => 3,
            Self::ConfigNotFound { .. }
            | Self::ConfigParseError { .. }
            | Self::ConfigValidationError { .. } => 2,
            _ => 1,
        }
    }
}

/// Describe a process exit status for messages.
///
/// `None` means the process was killed by a signal.
pub fn exit_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by a signal".to_string(),
    }
}

/// Result type alias for clusterup operations.
pub type Result<T> = std::result::Result<T, ClusterUpError>;
