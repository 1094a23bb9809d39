//! The provisioning pipeline.
//!
//! [`ProvisionOrchestrator`] runs, in order: the dependency gate, parameter
//! resolution, command building, the provisioning invocation, a settle
//! delay, the readiness loop, and the platform handoff. The first failure
//! stops the run and is returned unchanged.

use crate::config::ClusterUpConfig;
use crate::error::{exit_status, ClusterUpError, Result};
use crate::params::{ParameterResolver, ProvisionFlags, ProvisionRequest};
use crate::provision::command::CommandBuilder;
use crate::provision::handoff::{CloudProvider, PlatformInstaller};
use crate::provision::readiness::{ReadinessPoller, Sleeper};
use crate::provision::stage::ProvisionStage;
use crate::requirements::{DependencyGate, DependencyInstaller, GateReport};
use crate::shell::{CommandOptions, CommandRunner};
use crate::ui::{OutputMode, UserInterface};
use std::path::PathBuf;
use std::time::Duration;

/// Run-level switches from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProvisionOptions {
    /// Stop after printing the provisioning command.
    pub dry_run: bool,
    /// Stop once the cluster is ready, without handing off.
    pub skip_installation: bool,
}

/// The side-effecting collaborators a run needs.
pub struct Capabilities<'c> {
    pub ui: &'c mut dyn UserInterface,
    pub runner: &'c mut dyn CommandRunner,
    pub installer: &'c mut dyn DependencyInstaller,
    pub platform: &'c mut dyn PlatformInstaller,
    pub sleeper: &'c mut dyn Sleeper,
}

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionReport {
    pub gate: GateReport,
    pub request: ProvisionRequest,
    /// Provisioning command as one display line.
    pub command: String,
    /// Probes it took for the cluster to answer; `None` on a dry run.
    pub readiness_attempts: Option<u32>,
    /// Provider handed off to, if any.
    pub handed_off: Option<CloudProvider>,
}

/// Drives one provisioning run through every stage.
pub struct ProvisionOrchestrator<'a> {
    gate: DependencyGate<'a>,
    resolver: ParameterResolver<'a>,
    builder: CommandBuilder,
    poller: ReadinessPoller,
    settle_delay: Duration,
    options: ProvisionOptions,
    stage: ProvisionStage,
}

impl<'a> ProvisionOrchestrator<'a> {
    pub fn new(
        gate: DependencyGate<'a>,
        resolver: ParameterResolver<'a>,
        builder: CommandBuilder,
        poller: ReadinessPoller,
        settle_delay: Duration,
        options: ProvisionOptions,
    ) -> Self {
        Self {
            gate,
            resolver,
            builder,
            poller,
            settle_delay,
            options,
            stage: ProvisionStage::Start,
        }
    }

    /// Build an orchestrator from configuration.
    ///
    /// `locate` finds tools on PATH and `env` reads environment variables.
    /// The gate checks the configured provisioning and status programs
    /// along with `required_tools`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidationError` for an invalid readiness policy.
    pub fn from_config(
        config: &ClusterUpConfig,
        locate: &'a dyn Fn(&str) -> Option<PathBuf>,
        env: &'a dyn Fn(&str) -> Option<String>,
        options: ProvisionOptions,
    ) -> Result<Self> {
        Ok(Self::new(
            DependencyGate::new(&config.gate_tools(), locate),
            ParameterResolver::new(env),
            CommandBuilder::from_settings(&config.provisioner),
            ReadinessPoller::from_settings(&config.readiness)?,
            Duration::from_secs(config.readiness.settle_delay_secs),
            options,
        ))
    }

    /// The stage the last run reached.
    pub fn stage(&self) -> ProvisionStage {
        self.stage
    }

    /// Run the pipeline.
    ///
    /// On failure the stage becomes `Failed` with the error's kind and the
    /// error is returned unchanged.
    pub fn run(
        &mut self,
        flags: &ProvisionFlags,
        caps: &mut Capabilities<'_>,
    ) -> Result<ProvisionReport> {
        self.stage = ProvisionStage::Start;
        let result = self.run_stages(flags, caps);
        if let Err(e) = &result {
            if let Some(kind) = e.kind() {
                self.advance(ProvisionStage::Failed(kind));
            }
        }
        result
    }

    fn advance(&mut self, next: ProvisionStage) {
        tracing::debug!("Stage {} -> {}", self.stage, next);
        self.stage = next;
    }

    fn run_stages(
        &mut self,
        flags: &ProvisionFlags,
        caps: &mut Capabilities<'_>,
    ) -> Result<ProvisionReport> {
        let gate = self.check_dependencies(caps)?;
        self.advance(ProvisionStage::DependenciesChecked);

        let request = self.resolver.resolve_request(flags, caps.ui)?;
        self.advance(ProvisionStage::ParametersResolved);

        let program = self.builder.program().to_string();
        let args = self.builder.build_args(&request);
        let command = self.builder.display(&request);

        let mut report = ProvisionReport {
            gate,
            request,
            command,
            readiness_attempts: None,
            handed_off: None,
        };

        if self.options.dry_run {
            caps.ui.message(&report.command);
            self.advance(ProvisionStage::Done);
            return Ok(report);
        }

        self.invoke_provisioner(&program, &args, &report.command, caps)?;
        self.advance(ProvisionStage::ProvisionInvoked);

        self.advance(ProvisionStage::Settling);
        self.settle(caps);

        self.advance(ProvisionStage::PollingReady);
        report.readiness_attempts = Some(self.wait_for_cluster(caps)?);

        if self.options.skip_installation {
            caps.ui.show_hint("Skipping platform installation");
            self.advance(ProvisionStage::Done);
            return Ok(report);
        }

        self.advance(ProvisionStage::ReadyHandoff);
        let provider = CloudProvider::Aws;
        caps.platform.install(provider).map_err(|e| match e.kind() {
            Some(_) => e,
            None => ClusterUpError::InstallHandoffFailure {
                provider: provider.id().to_string(),
                message: e.to_string(),
            },
        })?;
        report.handed_off = Some(provider);

        self.advance(ProvisionStage::Done);
        Ok(report)
    }

    fn check_dependencies(&self, caps: &mut Capabilities<'_>) -> Result<GateReport> {
        if !self.options.dry_run {
            return self.gate.ensure(caps.installer, caps.ui);
        }

        let report = GateReport {
            checked: self.gate.check(),
            installed: Vec::new(),
        };
        let missing = report.missing();
        if !missing.is_empty() {
            caps.ui.warning(&format!(
                "Missing required tools: {} (not installed during a dry run)",
                missing.join(", ")
            ));
        }
        Ok(report)
    }

    fn invoke_provisioner(
        &self,
        program: &str,
        args: &[String],
        command: &str,
        caps: &mut Capabilities<'_>,
    ) -> Result<()> {
        tracing::debug!("Invoking provisioner: {}", command);
        caps.ui.message(&format!("Running {}", command));

        let result = caps
            .runner
            .run(program, args, &CommandOptions::default())
            .map_err(|e| {
                tracing::debug!("Provisioning tool did not start: {}", e);
                let reason = match e {
                    ClusterUpError::CommandNotStarted { message, .. } => {
                        format!("could not start: {}", message)
                    }
                    other => other.to_string(),
                };
                ClusterUpError::ProvisionInvocationFailure {
                    command: command.to_string(),
                    reason,
                }
            })?;

        if !result.success {
            return Err(ClusterUpError::ProvisionInvocationFailure {
                command: command.to_string(),
                reason: exit_status(&result.exit_code),
            });
        }
        Ok(())
    }

    fn settle(&self, caps: &mut Capabilities<'_>) {
        if self.settle_delay.is_zero() {
            return;
        }
        let mut spinner = caps.ui.start_spinner(&format!(
            "Waiting {}s for the cluster to settle",
            self.settle_delay.as_secs()
        ));
        caps.sleeper.sleep(self.settle_delay);
        spinner.finish_success("Settle delay elapsed");
    }

    fn wait_for_cluster(&self, caps: &mut Capabilities<'_>) -> Result<u32> {
        let max = self.poller.policy().max_attempts();
        if caps.ui.output_mode() == OutputMode::Verbose {
            caps.ui.message(&format!(
                "Probing readiness with `{}` (up to {} attempts, {:?} apart)",
                self.poller.probe_display(),
                max,
                self.poller.policy().interval()
            ));
        }
        let mut spinner = caps
            .ui
            .start_spinner("Waiting for Kubernetes cluster to start");

        let outcome = self.poller.wait_until_ready(
            &mut *caps.runner,
            &mut *caps.sleeper,
            &mut |attempt| {
                spinner.set_message(&format!(
                    "Waiting for Kubernetes cluster to start (attempt {}/{})",
                    attempt, max
                ));
            },
        );

        match &outcome {
            Ok(_) => spinner.finish_success("Kubernetes cluster is ready"),
            Err(_) => spinner.finish_error("Kubernetes cluster did not become ready"),
        }
        outcome
    }
}
