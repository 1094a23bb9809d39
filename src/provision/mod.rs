//! Cluster provisioning.
//!
//! - [`command`] - Building the provisioning command line
//! - [`readiness`] - Bounded readiness polling
//! - [`handoff`] - Platform installer handoff
//! - [`stage`] - Pipeline stages
//! - [`orchestrator`] - Running the whole pipeline

pub mod command;
pub mod handoff;
pub mod orchestrator;
pub mod readiness;
pub mod stage;

pub use command::CommandBuilder;
pub use handoff::{CloudProvider, CommandHandoff, PlatformInstaller};
pub use orchestrator::{Capabilities, ProvisionOptions, ProvisionOrchestrator, ProvisionReport};
pub use readiness::{
    ReadinessPoller, RecordingSleeper, RetryPolicy, Sleeper, ThreadSleeper, DEFAULT_INTERVAL,
    DEFAULT_MAX_ATTEMPTS,
};
pub use stage::ProvisionStage;
