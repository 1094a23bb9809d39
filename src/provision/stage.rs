//! Orchestrator stages.

use crate::error::FailureKind;
use std::fmt;

/// Where a provisioning run currently is.
///
/// Runs move forward through the stages in declaration order; any stage
/// may move to [`Failed`](ProvisionStage::Failed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionStage {
    Start,
    DependenciesChecked,
    ParametersResolved,
    ProvisionInvoked,
    Settling,
    PollingReady,
    ReadyHandoff,
    Done,
    Failed(FailureKind),
}

impl ProvisionStage {
    /// Whether the run has finished, successfully or not.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed(_))
    }
}

impl fmt::Display for ProvisionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::DependenciesChecked => write!(f, "dependencies checked"),
            Self::ParametersResolved => write!(f, "parameters resolved"),
            Self::ProvisionInvoked => write!(f, "provision invoked"),
            Self::Settling => write!(f, "settling"),
            Self::PollingReady => write!(f, "polling readiness"),
            Self::ReadyHandoff => write!(f, "handing off"),
            Self::Done => write!(f, "done"),
            Self::Failed(kind) => write!(f, "failed ({:?})", kind),
        }
    }
}
