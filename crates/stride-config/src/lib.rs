//! TOML configuration for the Stride analysis subsystem
//!
//! Configuration is read once at process startup. API keys are expanded
//! from `{{ env.VAR }}` placeholders before deserialization so the config
//! structs hold plain `SecretString` values.

#![allow(clippy::must_use_candidate)]

pub mod analysis;
mod env;
mod loader;

use serde::Deserialize;

pub use analysis::{AnalysisConfig, ProviderConfig, ProviderType};

/// Top-level Stride configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// AI analysis configuration
    #[serde(default)]
    pub analysis: AnalysisConfig,
}
