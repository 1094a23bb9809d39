//! Building the provisioning command line.

use crate::config::ProvisionerSettings;
use crate::params::ProvisionRequest;
use crate::shell::display_command;

/// Assembles the argument vector for the provisioning tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandBuilder {
    program: String,
    subcommand: Vec<String>,
}

impl Default for CommandBuilder {
    fn default() -> Self {
        Self::from_settings(&ProvisionerSettings::default())
    }
}

impl CommandBuilder {
    pub fn from_settings(settings: &ProvisionerSettings) -> Self {
        Self {
            program: settings.program.clone(),
            subcommand: settings.subcommand.clone(),
        }
    }

    /// The provisioning binary.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Flags for `request`, without the subcommand prefix.
    ///
    /// Order: `--node-count`, `--kubernetes-version` (each only when set),
    /// then `--authorization`, `--zones`, `--yes`.
    pub fn flags(request: &ProvisionRequest) -> Vec<String> {
        let mut args = Vec::new();

        if let Some(nodes) = request.node_count.as_deref().filter(|n| !n.is_empty()) {
            args.push("--node-count".to_string());
            args.push(nodes.to_string());
        }
        if let Some(version) = request
            .kubernetes_version
            .as_deref()
            .filter(|v| !v.is_empty())
        {
            args.push("--kubernetes-version".to_string());
            args.push(version.to_string());
        }

        let authorization = if request.use_rbac { "RBAC" } else { "AlwaysAllow" };
        args.push("--authorization".to_string());
        args.push(authorization.to_string());

        args.push("--zones".to_string());
        args.push(request.availability_zones.clone());

        args.push("--yes".to_string());
        args
    }

    /// Full argument vector: subcommand prefix followed by [`flags`](Self::flags).
    pub fn build_args(&self, request: &ProvisionRequest) -> Vec<String> {
        let mut args = self.subcommand.clone();
        args.extend(Self::flags(request));
        args
    }

    /// The whole invocation as one display line.
    pub fn display(&self, request: &ProvisionRequest) -> String {
        display_command(&self.program, &self.build_args(request))
    }
}
