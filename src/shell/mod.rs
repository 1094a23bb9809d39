//! Subprocess execution and platform detection.

pub mod command;
pub mod mock;
pub mod platform;

pub use command::{
    display_command, execute, CommandOptions, CommandResult, CommandRunner, SystemRunner,
};
pub use mock::{Invocation, MockResponse, MockRunner};
pub use platform::{is_ci, is_ci_with_env};
