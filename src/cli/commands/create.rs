//! Create command implementation.
//!
//! `clusterup create aws` provisions a cluster with kops, waits for it to
//! answer `kubectl get node`, and hands off to the platform installer.

use std::path::{Path, PathBuf};

use crate::cli::args::AwsArgs;
use crate::config::{load_config, validate};
use crate::error::Result;
use crate::provision::{
    Capabilities, CommandHandoff, ProvisionOptions, ProvisionOrchestrator, ProvisionReport,
    ThreadSleeper,
};
use crate::requirements::{default_context, locate_on_path, RecipeInstaller};
use crate::shell::SystemRunner;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The `create aws` command implementation.
pub struct CreateAwsCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: AwsArgs,
}

impl CreateAwsCommand {
    /// Create a new `create aws` command.
    pub fn new(project_root: &Path, config_override: Option<&Path>, args: AwsArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: config_override.map(Path::to_path_buf),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &AwsArgs {
        &self.args
    }

    fn options(&self) -> ProvisionOptions {
        ProvisionOptions {
            dry_run: self.args.dry_run,
            skip_installation: self.args.skip_installation,
        }
    }

    fn report(&self, report: &ProvisionReport, ui: &mut dyn UserInterface) {
        if self.args.dry_run {
            ui.show_hint("Dry run: nothing was executed");
            return;
        }
        ui.success(&format!(
            "Kubernetes cluster is ready (zones {})",
            report.request.availability_zones
        ));
        if let Some(provider) = report.handed_off {
            ui.success(&format!("Platform installed for {}", provider));
        }
    }
}

impl Command for CreateAwsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = load_config(&self.project_root, self.config_override.as_deref())?;
        validate(&config)?;

        ui.show_header("Create Kubernetes cluster on AWS");

        let locate = locate_on_path;
        let env = |name: &str| std::env::var(name).ok();
        let mut orchestrator =
            ProvisionOrchestrator::from_config(&config, &locate, &env, self.options())?;

        let mut installer = RecipeInstaller::new(config.install_recipes.clone(), default_context());
        let mut handoff_runner = SystemRunner;
        let mut platform = CommandHandoff::new(config.handoff.clone(), &mut handoff_runner);
        let mut runner = SystemRunner;
        let mut sleeper = ThreadSleeper;

        let mut caps = Capabilities {
            ui: &mut *ui,
            runner: &mut runner,
            installer: &mut installer,
            platform: &mut platform,
            sleeper: &mut sleeper,
        };
        let outcome = orchestrator.run(&self.args.flags(), &mut caps);
        tracing::debug!("Provisioning finished at stage {}", orchestrator.stage());

        let report = outcome?;
        self.report(&report, ui);
        Ok(CommandResult::success())
    }
}
