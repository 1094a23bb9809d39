//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::params::ProvisionFlags;

/// clusterup - Provision a Kubernetes cluster and hand it to a platform installer.
#[derive(Debug, Parser)]
#[command(name = "clusterup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .clusterup/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a Kubernetes cluster
    #[command(subcommand)]
    Create(CreateTarget),

    /// Show resolved configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Cloud targets for `create`.
#[derive(Debug, Subcommand)]
pub enum CreateTarget {
    /// Create a Kubernetes cluster on AWS using kops
    Aws(AwsArgs),
}

/// Arguments for `create aws`.
#[derive(Debug, Clone, clap::Args)]
pub struct AwsArgs {
    /// Number of worker nodes
    #[arg(short = 'o', long = "nodes", value_name = "N")]
    pub nodes: Option<String>,

    /// Kubernetes version for the new cluster
    #[arg(short = 'v', long, value_name = "VERSION")]
    pub kubernetes_version: Option<String>,

    /// Availability zones, comma-separated (defaults to $AWS_AVAILABILITY_ZONES)
    #[arg(short, long, value_name = "ZONES")]
    pub zones: Option<String>,

    /// Enable role-based access control
    #[arg(
        short,
        long,
        value_name = "BOOL",
        default_value_t = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub rbac: bool,

    /// Print the provisioning command without running anything
    #[arg(long)]
    pub dry_run: bool,

    /// Stop once the cluster is ready, without installing the platform
    #[arg(long)]
    pub skip_installation: bool,

    /// Use defaults and environment, no prompts
    #[arg(long)]
    pub non_interactive: bool,
}

impl Default for AwsArgs {
    fn default() -> Self {
        Self {
            nodes: None,
            kubernetes_version: None,
            zones: None,
            rbac: true,
            dry_run: false,
            skip_installation: false,
            non_interactive: false,
        }
    }
}

impl AwsArgs {
    /// The provisioning parameters given on the command line.
    pub fn flags(&self) -> ProvisionFlags {
        ProvisionFlags {
            nodes: self.nodes.clone(),
            kubernetes_version: self.kubernetes_version.clone(),
            zones: self.zones.clone(),
            rbac: self.rbac,
        }
    }
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("clusterup").chain(args.iter().copied())).unwrap()
    }

    fn aws(cli: Cli) -> AwsArgs {
        match cli.command {
            Commands::Create(CreateTarget::Aws(args)) => args,
            other => panic!("expected create aws, got {:?}", other),
        }
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn create_aws_defaults() {
        let args = aws(parse(&["create", "aws"]));
        assert_eq!(args.nodes, None);
        assert_eq!(args.zones, None);
        assert!(args.rbac);
        assert!(!args.dry_run);
    }

    #[test]
    fn create_aws_short_flags() {
        let args = aws(parse(&[
            "create", "aws", "-o", "5", "-v", "1.9.3", "-z", "us-east-1a", "-r", "false",
        ]));
        assert_eq!(args.nodes.as_deref(), Some("5"));
        assert_eq!(args.kubernetes_version.as_deref(), Some("1.9.3"));
        assert_eq!(args.zones.as_deref(), Some("us-east-1a"));
        assert!(!args.rbac);
    }

    #[test]
    fn rbac_flag_alone_means_true() {
        let args = aws(parse(&["create", "aws", "--rbac"]));
        assert!(args.rbac);
    }

    #[test]
    fn flags_carry_parameters() {
        let args = aws(parse(&["create", "aws", "--nodes", "2", "--zones", "a,b"]));
        let flags = args.flags();
        assert_eq!(flags.nodes.as_deref(), Some("2"));
        assert_eq!(flags.zones.as_deref(), Some("a,b"));
        assert!(flags.rbac);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["create", "aws", "--dry-run", "--debug", "--quiet"]);
        assert!(cli.debug);
        assert!(cli.quiet);
        assert!(aws(cli).dry_run);
    }

    #[test]
    fn config_json() {
        let cli = parse(&["config", "--json"]);
        assert!(matches!(cli.command, Commands::Config(ConfigArgs { json: true })));
    }

    #[test]
    fn create_requires_target() {
        let result = Cli::try_parse_from(["clusterup", "create"]);
        assert!(result.is_err());
    }
}
