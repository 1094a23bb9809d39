//! Required external tools.
//!
//! This module checks that the tools the pipeline shells out to are on
//! PATH, and installs the missing ones before anything else runs.
//!
//! # Modules
//!
//! - [`probe`] - PATH lookups
//! - [`status`] - Tool status and gate report types
//! - [`gate`] - The dependency gate
//! - [`installer`] - Installing missing tools

pub mod gate;
pub mod installer;
pub mod probe;
pub mod status;

pub use gate::DependencyGate;
pub use installer::{default_context, DependencyInstaller, InstallerContext, RecipeInstaller};
pub use probe::{locate_on_path, parse_system_path, resolve_tool_path};
pub use status::{GateReport, ToolStatus};
