//! Configuration schema definitions for clusterup.
//!
//! This module contains the struct definitions that map to
//! `.clusterup/config.yml`. Every field has a default, so an absent or
//! empty file yields a working configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root configuration structure for `.clusterup/config.yml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterUpConfig {
    /// Tools that must be on PATH before provisioning starts.
    pub required_tools: Vec<String>,

    /// Shell command used to install each tool when missing.
    pub install_recipes: BTreeMap<String, String>,

    /// Provisioning tool invocation.
    pub provisioner: ProvisionerSettings,

    /// Readiness probe settings.
    pub readiness: ReadinessSettings,

    /// Platform installer handoff.
    pub handoff: HandoffSettings,
}

impl Default for ClusterUpConfig {
    fn default() -> Self {
        Self {
            required_tools: vec!["kops".to_string(), "kubectl".to_string()],
            install_recipes: default_install_recipes(),
            provisioner: ProvisionerSettings::default(),
            readiness: ReadinessSettings::default(),
            handoff: HandoffSettings::default(),
        }
    }
}

impl ClusterUpConfig {
    /// Tools the dependency gate checks: `required_tools`, then the
    /// provisioning and status programs, each listed once.
    pub fn gate_tools(&self) -> Vec<String> {
        let mut tools = self.required_tools.clone();
        for program in [&self.provisioner.program, &self.readiness.program] {
            if !tools.contains(program) {
                tools.push(program.clone());
            }
        }
        tools
    }
}

fn default_install_recipes() -> BTreeMap<String, String> {
    let mut recipes = BTreeMap::new();
    recipes.insert("kops".to_string(), "brew install kops".to_string());
    recipes.insert(
        "kubectl".to_string(),
        "brew install kubernetes-cli".to_string(),
    );
    recipes
}

/// How the provisioning tool is invoked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvisionerSettings {
    /// Provisioning binary.
    pub program: String,

    /// Subcommand tokens placed before the generated flags.
    pub subcommand: Vec<String>,
}

impl Default for ProvisionerSettings {
    fn default() -> Self {
        Self {
            program: "kops".to_string(),
            subcommand: vec!["create".to_string(), "cluster".to_string()],
        }
    }
}

/// Readiness probe and wait settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadinessSettings {
    /// Status tool binary.
    pub program: String,

    /// Arguments for one probe.
    pub args: Vec<String>,

    /// Seconds to wait after provisioning before the first probe.
    pub settle_delay_secs: u64,

    /// Maximum number of probes.
    pub max_attempts: u32,

    /// Milliseconds between probes. Unset means one second and twenty
    /// nanoseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_ms: Option<u64>,
}

impl Default for ReadinessSettings {
    fn default() -> Self {
        Self {
            program: "kubectl".to_string(),
            args: vec!["get".to_string(), "node".to_string()],
            settle_delay_secs: 30,
            max_attempts: 200,
            interval_ms: None,
        }
    }
}

/// Downstream platform installer invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandoffSettings {
    /// Installer binary.
    pub program: String,

    /// Arguments placed before the provider flag.
    pub args: Vec<String>,

    /// Flag that carries the provider name.
    pub provider_flag: String,
}

impl Default for HandoffSettings {
    fn default() -> Self {
        Self {
            program: "jx".to_string(),
            args: vec!["install".to_string()],
            provider_flag: "--provider".to_string(),
        }
    }
}
