//! Library integration tests.

use clusterup::config::ClusterUpConfig;
use clusterup::params::ProvisionFlags;
use clusterup::provision::{
    Capabilities, CloudProvider, PlatformInstaller, ProvisionOptions, ProvisionOrchestrator,
    ProvisionStage, RecordingSleeper,
};
use clusterup::requirements::{InstallerContext, RecipeInstaller};
use clusterup::shell::MockRunner;
use clusterup::ui::MockUI;
use clusterup::{ClusterUpError, FailureKind};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Default)]
struct RecordingPlatform {
    providers: Vec<CloudProvider>,
}

impl PlatformInstaller for RecordingPlatform {
    fn install(&mut self, provider: CloudProvider) -> clusterup::Result<()> {
        self.providers.push(provider);
        Ok(())
    }
}

fn everything_installed(tool: &str) -> Option<PathBuf> {
    Some(PathBuf::from("/usr/local/bin").join(tool))
}

fn nothing_installed(_: &str) -> Option<PathBuf> {
    None
}

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn error_types_are_public() {
    let err = ClusterUpError::MissingRequiredParameter {
        name: "zones".into(),
        message: "no availability zones provided".into(),
    };
    assert_eq!(err.kind(), Some(FailureKind::MissingRequiredParameter));
    assert!(err.to_string().contains("zones"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> clusterup::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn full_pipeline_with_configured_programs() {
    let mut config = ClusterUpConfig::default();
    config.provisioner.program = "kops-1.9".to_string();
    config.readiness.settle_delay_secs = 10;
    config.readiness.interval_ms = Some(500);

    let mut orchestrator = ProvisionOrchestrator::from_config(
        &config,
        &everything_installed,
        &no_env,
        ProvisionOptions::default(),
    )
    .unwrap();

    let mut ui = MockUI::new();
    ui.set_prompt_response("zones", "ap-south-1a");
    let mut runner = MockRunner::new();
    runner.queue_exits("kubectl", vec![1, 0]);
    let run_recipe = |_: &str| -> bool { panic!("nothing should be installed") };
    let mut installer = RecipeInstaller::new(
        config.install_recipes.clone(),
        InstallerContext {
            run_command: &run_recipe,
        },
    );
    let mut platform = RecordingPlatform::default();
    let mut sleeper = RecordingSleeper::new();

    let report = orchestrator
        .run(
            &ProvisionFlags::default(),
            &mut Capabilities {
                ui: &mut ui,
                runner: &mut runner,
                installer: &mut installer,
                platform: &mut platform,
                sleeper: &mut sleeper,
            },
        )
        .unwrap();

    assert_eq!(orchestrator.stage(), ProvisionStage::Done);
    assert_eq!(report.request.node_count.as_deref(), Some("3"));
    assert_eq!(report.request.availability_zones, "ap-south-1a");
    assert_eq!(runner.count("kops-1.9"), 1);
    assert_eq!(runner.count("kubectl"), 2);
    assert_eq!(
        sleeper.sleeps(),
        &[Duration::from_secs(10), Duration::from_millis(500)]
    );
    assert_eq!(platform.providers, vec![CloudProvider::Aws]);
    assert_eq!(ui.prompts_shown(), &["nodes", "zones"]);
}

#[test]
fn declined_install_stops_the_pipeline() {
    let config = ClusterUpConfig::default();
    let mut orchestrator = ProvisionOrchestrator::from_config(
        &config,
        &nothing_installed,
        &no_env,
        ProvisionOptions::default(),
    )
    .unwrap();

    let mut ui = MockUI::new();
    ui.set_prompt_response("install-dependencies", "no");
    let mut runner = MockRunner::new();
    let run_recipe = |_: &str| true;
    let mut installer = RecipeInstaller::new(
        config.install_recipes.clone(),
        InstallerContext {
            run_command: &run_recipe,
        },
    );
    let mut platform = RecordingPlatform::default();
    let mut sleeper = RecordingSleeper::new();

    let err = orchestrator
        .run(
            &ProvisionFlags::default(),
            &mut Capabilities {
                ui: &mut ui,
                runner: &mut runner,
                installer: &mut installer,
                platform: &mut platform,
                sleeper: &mut sleeper,
            },
        )
        .unwrap_err();

    assert_eq!(err.exit_code(), 3);
    assert_eq!(
        orchestrator.stage(),
        ProvisionStage::Failed(FailureKind::UnresolvedDependency)
    );
    assert!(runner.invocations().is_empty());
    assert_eq!(ui.prompts_shown(), &["install-dependencies"]);
}
