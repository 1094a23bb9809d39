//! Dependency gate: required tools must be on PATH before provisioning.
//!
//! The gate checks each required tool, collects the missing ones, and hands
//! them to a [`DependencyInstaller`] as a single batch. An installer failure
//! stops the run; there is no retry.

use crate::error::{ClusterUpError, Result};
use crate::requirements::installer::DependencyInstaller;
use crate::requirements::status::{GateReport, ToolStatus};
use crate::ui::UserInterface;
use std::path::PathBuf;

/// Checks that required external tools exist, installing missing ones.
pub struct DependencyGate<'a> {
    required: Vec<String>,
    locate: &'a dyn Fn(&str) -> Option<PathBuf>,
}

impl<'a> DependencyGate<'a> {
    /// Create a gate for `required` tools using `locate` for PATH lookups.
    ///
    /// Duplicate names are checked once, in first-seen order.
    pub fn new(required: &[String], locate: &'a dyn Fn(&str) -> Option<PathBuf>) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(required.len());
        for tool in required {
            if !unique.contains(tool) {
                unique.push(tool.clone());
            }
        }
        Self {
            required: unique,
            locate,
        }
    }

    /// Tools this gate checks.
    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Look every required tool up without installing anything.
    pub fn check(&self) -> Vec<(String, ToolStatus)> {
        self.required
            .iter()
            .map(|tool| {
                let status = match (self.locate)(tool) {
                    Some(path) => {
                        tracing::debug!("Found {} at {}", tool, path.display());
                        ToolStatus::Present { path }
                    }
                    None => {
                        tracing::debug!("{} not found on PATH", tool);
                        ToolStatus::Missing
                    }
                };
                (tool.clone(), status)
            })
            .collect()
    }

    /// Ensure every required tool is available.
    ///
    /// Missing tools are passed to `installer` in one call. When nothing is
    /// missing the installer is never invoked.
    ///
    /// # Errors
    ///
    /// Returns `UnresolvedDependency` if the installer fails for any reason.
    pub fn ensure(
        &self,
        installer: &mut dyn DependencyInstaller,
        ui: &mut dyn UserInterface,
    ) -> Result<GateReport> {
        let checked = self.check();
        let missing: Vec<String> = checked
            .iter()
            .filter(|(_, status)| !status.is_present())
            .map(|(name, _)| name.clone())
            .collect();

        if missing.is_empty() {
            return Ok(GateReport {
                checked,
                installed: Vec::new(),
            });
        }

        tracing::info!("Missing required dependencies: {}", missing.join(", "));
        installer.install(&missing, ui).map_err(|e| match e {
            err @ ClusterUpError::UnresolvedDependency { .. } => err,
            other => ClusterUpError::UnresolvedDependency {
                tools: missing.join(", "),
                message: other.to_string(),
            },
        })?;

        Ok(GateReport {
            checked,
            installed: missing,
        })
    }
}
