//! Handing a ready cluster to the platform installer.

use crate::config::HandoffSettings;
use crate::error::{ClusterUpError, Result};
use crate::shell::{display_command, CommandOptions, CommandRunner};
use std::fmt;

/// Cloud providers a cluster can be handed off for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudProvider {
    Aws,
}

impl CloudProvider {
    /// Identifier used in messages and errors.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Aws => "AWS",
        }
    }

    /// Value passed on the installer's command line.
    pub fn cli_value(&self) -> &'static str {
        match self {
            Self::Aws => "aws",
        }
    }
}

impl fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Runs the downstream install workflow for a provider.
pub trait PlatformInstaller {
    /// # Errors
    ///
    /// Returns `InstallHandoffFailure` if the install workflow fails.
    fn install(&mut self, provider: CloudProvider) -> Result<()>;
}

/// [`PlatformInstaller`] that runs an external installer command.
pub struct CommandHandoff<'a> {
    settings: HandoffSettings,
    runner: &'a mut dyn CommandRunner,
}

impl<'a> CommandHandoff<'a> {
    pub fn new(settings: HandoffSettings, runner: &'a mut dyn CommandRunner) -> Self {
        Self { settings, runner }
    }

    /// Arguments for `provider`: configured args, then the provider flag.
    pub fn args(settings: &HandoffSettings, provider: CloudProvider) -> Vec<String> {
        let mut args = settings.args.clone();
        args.push(settings.provider_flag.clone());
        args.push(provider.cli_value().to_string());
        args
    }
}

impl PlatformInstaller for CommandHandoff<'_> {
    fn install(&mut self, provider: CloudProvider) -> Result<()> {
        let args = Self::args(&self.settings, provider);
        let command = display_command(&self.settings.program, &args);
        tracing::info!("Handing off to {}", command);

        let failure = |message: String| ClusterUpError::InstallHandoffFailure {
            provider: provider.id().to_string(),
            message,
        };

        let result = self
            .runner
            .run(&self.settings.program, &args, &CommandOptions::default())
            .map_err(|e| failure(e.to_string()))?;
        if !result.success {
            return Err(failure(result.failure_summary(&command)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::MockRunner;

    #[test]
    fn provider_identifiers() {
        assert_eq!(CloudProvider::Aws.id(), "AWS");
        assert_eq!(CloudProvider::Aws.cli_value(), "aws");
        assert_eq!(CloudProvider::Aws.to_string(), "AWS");
    }

    #[test]
    fn runs_installer_with_provider_flag() {
        let mut runner = MockRunner::new();
        CommandHandoff::new(HandoffSettings::default(), &mut runner)
            .install(CloudProvider::Aws)
            .unwrap();

        let calls = runner.invocations_of("jx");
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].args, vec!["install", "--provider", "aws"]);
    }

    #[test]
    fn installer_failure_is_handoff_failure() {
        let mut runner = MockRunner::new();
        runner.set_exit("jx", 2);

        let err = CommandHandoff::new(HandoffSettings::default(), &mut runner)
            .install(CloudProvider::Aws)
            .unwrap_err();

        match err {
            ClusterUpError::InstallHandoffFailure { provider, message } => {
                assert_eq!(provider, "AWS");
                assert!(message.contains("exited with code 2"));
            }
            other => panic!("expected InstallHandoffFailure, got {:?}", other),
        }
    }

    #[test]
    fn missing_installer_is_handoff_failure() {
        let mut runner = MockRunner::new();
        runner.set_spawn_error("jx");

        let err = CommandHandoff::new(HandoffSettings::default(), &mut runner)
            .install(CloudProvider::Aws)
            .unwrap_err();
        match err {
            ClusterUpError::InstallHandoffFailure { message, .. } => {
                assert!(message.contains("os error 2"));
            }
            other => panic!("expected InstallHandoffFailure, got {:?}", other),
        }
    }
}
