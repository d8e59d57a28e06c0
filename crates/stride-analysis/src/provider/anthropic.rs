//! Anthropic Messages API adapter

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use stride_config::ProviderConfig;
use stride_core::ProviderIdentity;
use url::Url;

use super::{Completion, MAX_OUTPUT_TOKENS, Provider, estimate_tokens, present_key};
use crate::error::AnalysisError;
use crate::protocol::anthropic::{AnthropicMessage, AnthropicRequest, AnthropicResponse};

/// Default Anthropic API base URL
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";

/// Anthropic API version header value
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic Messages API adapter
///
/// When the upstream response omits usage accounting, token counts are
/// estimated at four characters per token.
pub struct AnthropicProvider {
    name: String,
    model: String,
    client: Client,
    base_url: Url,
    api_key: Option<SecretString>,
}

impl AnthropicProvider {
    /// Create from provider configuration
    ///
    /// An absent or empty API key leaves the adapter constructed but
    /// permanently unavailable.
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded default base URL is invalid (should never happen).
    #[must_use]
    pub fn new(name: String, config: &ProviderConfig) -> Self {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| Url::parse(DEFAULT_BASE_URL).expect("valid default URL"));

        Self {
            name,
            model: config.model.clone(),
            client: Client::new(),
            base_url,
            api_key: present_key(config.api_key.clone()),
        }
    }

    /// Build the messages endpoint URL
    fn messages_url(&self) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/messages")
    }
}

#[async_trait]
impl Provider for AnthropicProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn identity(&self) -> ProviderIdentity {
        ProviderIdentity::new(self.model.clone(), "anthropic")
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, prompt: &str) -> Result<Completion, AnalysisError> {
        let Some(ref api_key) = self.api_key else {
            return Err(AnalysisError::MissingCredentials {
                provider: self.name.clone(),
            });
        };

        let wire_request = AnthropicRequest {
            model: self.model.clone(),
            max_tokens: MAX_OUTPUT_TOKENS,
            messages: vec![AnthropicMessage {
                role: "user".to_owned(),
                content: prompt.to_owned(),
            }],
        };

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", api_key.expose_secret())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(provider = %self.name, error = %e, "upstream request failed");
                AnalysisError::Upstream(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                provider = %self.name,
                status = %status,
                "upstream returned error"
            );
            return Err(AnalysisError::Upstream(format!("provider returned {status}: {body}")));
        }

        let wire_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Upstream(format!("failed to parse response: {e}")))?;

        let text = wire_response
            .content
            .iter()
            .filter(|block| block.block_type == "text")
            .find_map(|block| block.text.clone())
            .ok_or_else(|| AnalysisError::MalformedResponse("response contained no text content".to_owned()))?;

        let (input_tokens, output_tokens) = wire_response.usage.map_or_else(
            || (estimate_tokens(prompt), estimate_tokens(&text)),
            |usage| (usage.input_tokens, usage.output_tokens),
        );

        Ok(Completion {
            text,
            input_tokens,
            output_tokens,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stride_config::ProviderType;

    fn config(api_key: Option<&str>) -> ProviderConfig {
        ProviderConfig {
            provider_type: ProviderType::Anthropic,
            model: "claude-sonnet-4".to_owned(),
            api_key: api_key.map(SecretString::from),
            base_url: None,
        }
    }

    #[test]
    fn missing_key_means_unavailable() {
        let provider = AnthropicProvider::new("anthropic".to_owned(), &config(None));
        assert!(!provider.is_available());
    }

    #[test]
    fn empty_key_means_unavailable() {
        let provider = AnthropicProvider::new("anthropic".to_owned(), &config(Some("")));
        assert!(!provider.is_available());
    }

    #[test]
    fn identity_reports_model_and_vendor() {
        let provider = AnthropicProvider::new("anthropic".to_owned(), &config(Some("sk-test")));
        assert!(provider.is_available());
        let identity = provider.identity();
        assert_eq!(identity.model, "claude-sonnet-4");
        assert_eq!(identity.vendor, "anthropic");
    }
}
