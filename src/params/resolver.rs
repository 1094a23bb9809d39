//! Resolving provisioning parameters from flags, environment, and prompts.

use crate::error::{ClusterUpError, Result};
use crate::params::source::{
    PromptFailurePolicy, PromptSource, Provenance, ResolvedParameter, Source,
};
use crate::ui::{Prompt, UserInterface};

/// Environment variable consulted for availability zones.
pub const ZONES_ENV: &str = "AWS_AVAILABILITY_ZONES";

/// Shown before prompting for zones.
pub const ZONES_ADVISORY: &str =
    "No AWS_AVAILABILITY_ZONES environment variable is defined or --zones option!";

const DEFAULT_NODE_COUNT: &str = "3";

/// Raw values from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionFlags {
    pub nodes: Option<String>,
    pub kubernetes_version: Option<String>,
    pub zones: Option<String>,
    pub rbac: bool,
}

impl Default for ProvisionFlags {
    fn default() -> Self {
        Self {
            nodes: None,
            kubernetes_version: None,
            zones: None,
            rbac: true,
        }
    }
}

/// Fully resolved parameters for one provisioning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionRequest {
    /// `None` lets the provisioning tool pick its own default.
    pub node_count: Option<String>,
    pub kubernetes_version: Option<String>,
    /// Comma-separated zone list, never empty.
    pub availability_zones: String,
    pub use_rbac: bool,
}

/// Walks each field's source chain and builds a [`ProvisionRequest`].
pub struct ParameterResolver<'a> {
    env: &'a dyn Fn(&str) -> Option<String>,
}

impl<'a> ParameterResolver<'a> {
    /// Create a resolver reading environment variables through `env`.
    pub fn new(env: &'a dyn Fn(&str) -> Option<String>) -> Self {
        Self { env }
    }

    /// Resolve one field by trying `sources` in order.
    ///
    /// Returns `Ok(None)` when every source came up empty.
    ///
    /// # Errors
    ///
    /// Returns `PromptFailure` when a prompt with the `Fatal` policy fails.
    pub fn resolve(
        &self,
        field: &str,
        sources: &[Source],
        ui: &mut dyn UserInterface,
    ) -> Result<Option<ResolvedParameter>> {
        for source in sources {
            let found = match source {
                Source::Flag(value) => non_empty(value.clone()).map(|v| (v, Provenance::Flag)),
                Source::Env(name) => {
                    non_empty((self.env)(name)).map(|v| (v, Provenance::Environment))
                }
                Source::Prompt(prompt) => {
                    self.ask(field, prompt, ui)?.map(|v| (v, Provenance::Prompt))
                }
                Source::Default(value) => {
                    non_empty(Some(value.clone())).map(|v| (v, Provenance::Default))
                }
            };

            if let Some((value, provenance)) = found {
                tracing::debug!("Resolved {} = {:?} from {}", field, value, provenance);
                return Ok(Some(ResolvedParameter { value, provenance }));
            }
        }

        tracing::debug!("No value for {}", field);
        Ok(None)
    }

    fn ask(
        &self,
        field: &str,
        source: &PromptSource,
        ui: &mut dyn UserInterface,
    ) -> Result<Option<String>> {
        if let Some(advisory) = &source.advisory {
            ui.warning(advisory);
        }

        match ui.prompt(&source.prompt) {
            Ok(answer) => Ok(non_empty(Some(answer.as_string()))),
            Err(e) => match source.on_failure {
                PromptFailurePolicy::Fatal => Err(ClusterUpError::PromptFailure {
                    field: field.to_string(),
                    message: e.to_string(),
                }),
                PromptFailurePolicy::Ignore => {
                    tracing::warn!("Ignoring failed prompt for {}: {}", field, e);
                    Ok(None)
                }
            },
        }
    }

    /// Resolve every field of a provisioning request.
    ///
    /// # Errors
    ///
    /// Fails with `PromptFailure` if the zones prompt fails, or
    /// `MissingRequiredParameter` if zones are still empty afterwards.
    pub fn resolve_request(
        &self,
        flags: &ProvisionFlags,
        ui: &mut dyn UserInterface,
    ) -> Result<ProvisionRequest> {
        let node_count = self
            .resolve("nodes", &node_count_sources(flags), ui)?
            .map(|p| p.value);

        let availability_zones = self
            .resolve("zones", &zone_sources(flags), ui)?
            .map(|p| p.value)
            .ok_or_else(|| ClusterUpError::MissingRequiredParameter {
                name: "zones".to_string(),
                message: "no availability zones provided".to_string(),
            })?;

        let kubernetes_version = self
            .resolve(
                "kubernetes-version",
                &[Source::Flag(flags.kubernetes_version.clone())],
                ui,
            )?
            .map(|p| p.value);

        Ok(ProvisionRequest {
            node_count,
            kubernetes_version,
            availability_zones,
            use_rbac: flags.rbac,
        })
    }
}

/// Node count: flag, then an optional prompt defaulting to 3.
///
/// A failed prompt leaves the count unset so the provisioning tool's own
/// default applies.
pub fn node_count_sources(flags: &ProvisionFlags) -> Vec<Source> {
    vec![
        Source::Flag(flags.nodes.clone()),
        Source::Prompt(PromptSource::new(
            Prompt::input("nodes", "nodes", Some(DEFAULT_NODE_COUNT)),
            PromptFailurePolicy::Ignore,
        )),
    ]
}

/// Zones: flag, then `AWS_AVAILABILITY_ZONES`, then a required prompt.
pub fn zone_sources(flags: &ProvisionFlags) -> Vec<Source> {
    vec![
        Source::Flag(flags.zones.clone()),
        Source::Env(ZONES_ENV.to_string()),
        Source::Prompt(
            PromptSource::new(
                Prompt::input("zones", "Availability zones", None).required(),
                PromptFailurePolicy::Fatal,
            )
            .with_advisory(ZONES_ADVISORY),
        ),
    ]
}

/// Blank values fall through to the next source; others pass unchanged.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
