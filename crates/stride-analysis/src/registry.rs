//! Provider registry built once at process startup

use std::sync::Arc;

use stride_config::{AnalysisConfig, ProviderType};

use crate::provider::{AnthropicProvider, GoogleProvider, OpenAiProvider, Provider};

/// Named collection of usable provider adapters
///
/// Populated once at startup and read-only thereafter; adapters without
/// credentials are excluded here and never reconsidered without a process
/// restart. Order follows the configuration file, which makes rotation
/// fairness deterministic.
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn Provider>>,
}

impl ProviderRegistry {
    /// Construct every configured adapter and keep the usable ones
    #[must_use]
    pub fn from_config(config: &AnalysisConfig) -> Self {
        let mut providers: Vec<Arc<dyn Provider>> = Vec::new();

        for (name, provider_config) in &config.providers {
            let provider: Arc<dyn Provider> = match provider_config.provider_type {
                ProviderType::Anthropic => Arc::new(AnthropicProvider::new(name.clone(), provider_config)),
                ProviderType::Openai => Arc::new(OpenAiProvider::new(name.clone(), provider_config)),
                ProviderType::Google => Arc::new(GoogleProvider::new(name.clone(), provider_config)),
            };

            if provider.is_available() {
                tracing::info!(
                    provider = %name,
                    model = %provider.identity().model,
                    "registered analysis provider"
                );
                providers.push(provider);
            } else {
                tracing::warn!(
                    provider = %name,
                    "no API key configured, provider excluded for the life of the process"
                );
            }
        }

        Self { providers }
    }

    /// Build a registry from pre-constructed adapters
    #[must_use]
    pub fn from_providers(providers: Vec<Arc<dyn Provider>>) -> Self {
        Self { providers }
    }

    /// Registered adapters in configuration order
    pub fn providers(&self) -> &[Arc<dyn Provider>] {
        &self.providers
    }

    /// Look up an adapter by configured name or model identifier
    pub fn find(&self, id: &str) -> Option<Arc<dyn Provider>> {
        self.providers
            .iter()
            .find(|p| p.name() == id || p.identity().model == id)
            .cloned()
    }

    /// Number of registered adapters
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether no adapter is usable
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
