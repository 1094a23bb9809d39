//! Parameter sources and provenance.

use crate::ui::Prompt;
use std::fmt;

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Flag,
    Environment,
    Prompt,
    Default,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Flag => "flag",
            Self::Environment => "environment",
            Self::Prompt => "prompt",
            Self::Default => "default",
        };
        write!(f, "{}", name)
    }
}

/// A value paired with the source that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedParameter {
    pub value: String,
    pub provenance: Provenance,
}

/// What to do when a prompt cannot be shown or answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptFailurePolicy {
    /// Abort resolution with `PromptFailure`.
    Fatal,
    /// Log a warning and move on to the next source.
    Ignore,
}

/// An interactive prompt used as a parameter source.
#[derive(Debug, Clone)]
pub struct PromptSource {
    pub prompt: Prompt,
    pub on_failure: PromptFailurePolicy,
    /// Shown once, just before the prompt.
    pub advisory: Option<String>,
}

impl PromptSource {
    pub fn new(prompt: Prompt, on_failure: PromptFailurePolicy) -> Self {
        Self {
            prompt,
            on_failure,
            advisory: None,
        }
    }

    pub fn with_advisory(mut self, advisory: &str) -> Self {
        self.advisory = Some(advisory.to_string());
        self
    }
}

/// One link in a field's fallback chain.
///
/// Sources are tried in order; the first non-empty value wins.
#[derive(Debug, Clone)]
pub enum Source {
    /// A command-line flag value, `None` when not given.
    Flag(Option<String>),
    /// An environment variable by name.
    Env(String),
    /// Ask the user.
    Prompt(PromptSource),
    /// A fixed fallback.
    Default(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provenance_display() {
        assert_eq!(Provenance::Flag.to_string(), "flag");
        assert_eq!(Provenance::Environment.to_string(), "environment");
        assert_eq!(Provenance::Prompt.to_string(), "prompt");
        assert_eq!(Provenance::Default.to_string(), "default");
    }

    #[test]
    fn prompt_source_advisory() {
        let source = PromptSource::new(
            Prompt::input("zones", "Availability zones", None),
            PromptFailurePolicy::Fatal,
        );
        assert!(source.advisory.is_none());
        let source = source.with_advisory("no zones set");
        assert_eq!(source.advisory.as_deref(), Some("no zones set"));
    }
}
