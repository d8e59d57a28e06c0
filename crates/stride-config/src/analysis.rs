use std::time::Duration;

use indexmap::IndexMap;
use secrecy::SecretString;
use serde::Deserialize;
use stride_core::Strategy;
use url::Url;

/// AI analysis configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Default selection strategy for orchestration rounds
    #[serde(default)]
    pub strategy: Strategy,
    /// Default backend for the `single` strategy, matched against provider
    /// name or model identifier
    #[serde(default)]
    pub default_provider: Option<String>,
    /// Per-call timeout applied uniformly to every backend
    #[serde(
        default = "default_call_timeout",
        deserialize_with = "duration_str::deserialize_duration"
    )]
    pub call_timeout: Duration,
    /// Provider configurations keyed by name; order is significant for
    /// rotation fairness
    #[serde(default)]
    pub providers: IndexMap<String, ProviderConfig>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            default_provider: None,
            call_timeout: default_call_timeout(),
            providers: IndexMap::new(),
        }
    }
}

fn default_call_timeout() -> Duration {
    Duration::from_secs(10)
}

/// Configuration for a single inference backend
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Provider protocol type
    #[serde(rename = "type")]
    pub provider_type: ProviderType,
    /// Model identifier sent to the backend
    pub model: String,
    /// API key; absent or empty means the backend is unavailable for the
    /// life of the process
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<Url>,
}

/// Supported inference backend protocols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderType {
    /// Anthropic Messages API
    Anthropic,
    /// OpenAI chat completions API
    Openai,
    /// Google Generative Language API
    Google,
}
