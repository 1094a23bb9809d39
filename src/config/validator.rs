//! Configuration validation rules.
//!
//! This module validates configuration for correctness:
//! - Program names must be non-empty
//! - The retry policy must have at least one attempt and a non-zero interval
//! - Install recipes must not be blank

use crate::config::schema::ClusterUpConfig;
use crate::error::{ClusterUpError, Result};

/// Validation error with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            message: message.into(),
        }
    }
}

/// Validate a configuration and return all errors.
///
/// Collects every problem rather than stopping at the first one, so
/// users can fix multiple issues at once.
pub fn validate_config(config: &ClusterUpConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let programs = [
        ("provisioner.program", &config.provisioner.program),
        ("readiness.program", &config.readiness.program),
        ("handoff.program", &config.handoff.program),
    ];
    for (field, program) in programs {
        if program.trim().is_empty() {
            errors.push(ValidationError::new(
                "empty-program",
                format!("'{}' must name a program", field),
            ));
        }
    }

    if config.readiness.max_attempts == 0 {
        errors.push(ValidationError::new(
            "retry-attempts",
            "'readiness.max_attempts' must be greater than zero",
        ));
    }

    if config.readiness.interval_ms == Some(0) {
        errors.push(ValidationError::new(
            "retry-interval",
            "'readiness.interval_ms' must be greater than zero",
        ));
    }

    for tool in &config.required_tools {
        if tool.trim().is_empty() {
            errors.push(ValidationError::new(
                "empty-tool",
                "'required_tools' contains an empty name",
            ));
        }
    }

    for (tool, recipe) in &config.install_recipes {
        if recipe.trim().is_empty() {
            errors.push(ValidationError::new(
                "empty-recipe",
                format!("Install recipe for '{}' is empty", tool),
            ));
        }
    }

    errors
}

/// Validate a configuration, failing with every problem joined into one error.
pub fn validate(config: &ClusterUpConfig) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        return Ok(());
    }

    let message = errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    Err(ClusterUpError::ConfigValidationError { message })
}
