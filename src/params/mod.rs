//! Parameter resolution.
//!
//! Each provisioning parameter is resolved through an ordered list of
//! [`Source`]s (flag, environment, prompt, default); the first non-empty
//! value wins.

pub mod resolver;
pub mod source;

pub use resolver::{
    node_count_sources, zone_sources, ParameterResolver, ProvisionFlags, ProvisionRequest,
    ZONES_ADVISORY, ZONES_ENV,
};
pub use source::{PromptFailurePolicy, PromptSource, Provenance, ResolvedParameter, Source};
