//! Tool status types produced by the dependency gate.

use std::path::PathBuf;

/// Whether a required tool was found on the search path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolStatus {
    /// Found at this path.
    Present { path: PathBuf },
    /// Not found on any PATH entry.
    Missing,
}

impl ToolStatus {
    /// Check if the tool was found.
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present { .. })
    }
}

/// Result of running the dependency gate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GateReport {
    /// Every required tool with its status at check time, in the order given.
    pub checked: Vec<(String, ToolStatus)>,
    /// Tools handed to the installer (empty when nothing was missing).
    pub installed: Vec<String>,
}

impl GateReport {
    /// Names of the tools that were missing at check time.
    pub fn missing(&self) -> Vec<&str> {
        self.checked
            .iter()
            .filter(|(_, status)| !status.is_present())
            .map(|(name, _)| name.as_str())
            .collect()
    }
}
