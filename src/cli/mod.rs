//! Command-line interface for clusterup.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{AwsArgs, Cli, Commands, CompletionsArgs, ConfigArgs, CreateTarget};
pub use commands::{Command, CommandDispatcher, CommandResult};
