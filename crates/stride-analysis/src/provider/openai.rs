//! `OpenAI` chat completions adapter

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use stride_config::ProviderConfig;
use stride_core::ProviderIdentity;
use url::Url;

use super::{Completion, MAX_OUTPUT_TOKENS, Provider, estimate_tokens, present_key};
use crate::error::AnalysisError;
use crate::protocol::openai::{OpenAiMessage, OpenAiRequest, OpenAiResponse};

/// Default `OpenAI` API base URL
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// `OpenAI` chat completions adapter
///
/// When the upstream response omits usage accounting, token counts are
/// estimated at four characters per token.
pub struct OpenAiProvider {
    name: String,
    model: String,
    client: Client,
    base_url: Url,
    api_key: Option<SecretString>,
}

impl OpenAiProvider {
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

    /// Build the chat completions endpoint URL
    fn completions_url(&self) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/chat/completions")
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn identity(&self) -> ProviderIdentity {
        ProviderIdentity::new(self.model.clone(), "openai")
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

        let wire_request = OpenAiRequest {
            model: self.model.clone(),
            messages: vec![OpenAiMessage {
                role: "user".to_owned(),
                content: prompt.to_owned(),
            }],
            max_tokens: Some(MAX_OUTPUT_TOKENS),
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(api_key.expose_secret())
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

        let wire_response: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Upstream(format!("failed to parse response: {e}")))?;

        let text = wire_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AnalysisError::MalformedResponse("response contained no choices".to_owned()))?;

        let (input_tokens, output_tokens) = wire_response.usage.map_or_else(
            || (estimate_tokens(prompt), estimate_tokens(&text)),
            |usage| (usage.prompt_tokens, usage.completion_tokens),
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

    #[test]
    fn missing_key_means_unavailable() {
        let config = ProviderConfig {
            provider_type: ProviderType::Openai,
            model: "gpt-4o".to_owned(),
            api_key: None,
            base_url: None,
        };
        let provider = OpenAiProvider::new("openai".to_owned(), &config);

        assert!(!provider.is_available());
        assert_eq!(provider.identity().vendor, "openai");
    }
}
