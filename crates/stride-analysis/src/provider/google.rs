//! Google Generative Language API adapter

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use stride_config::ProviderConfig;
use stride_core::ProviderIdentity;
use url::Url;

use super::{Completion, MAX_OUTPUT_TOKENS, Provider, estimate_tokens, present_key};
use crate::error::AnalysisError;
use crate::protocol::google::{GoogleContent, GoogleGenerationConfig, GooglePart, GoogleRequest, GoogleResponse};

/// Default Google Generative Language API base URL
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google Generative Language API adapter
///
/// When the upstream response omits usage metadata, token counts are
/// estimated at four characters per token.
pub struct GoogleProvider {
    name: String,
    model: String,
    client: Client,
    base_url: Url,
    api_key: Option<SecretString>,
}

impl GoogleProvider {
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

    /// Build the `generateContent` endpoint URL, key as query parameter
    fn generate_url(&self, api_key: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/models/{}:generateContent?key={api_key}", self.model)
    }
}

#[async_trait]
impl Provider for GoogleProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn identity(&self) -> ProviderIdentity {
        ProviderIdentity::new(self.model.clone(), "google")
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

        let wire_request = GoogleRequest {
            contents: vec![GoogleContent {
                role: Some("user".to_owned()),
                parts: vec![GooglePart {
                    text: Some(prompt.to_owned()),
                }],
            }],
            generation_config: Some(GoogleGenerationConfig {
                max_output_tokens: MAX_OUTPUT_TOKENS,
            }),
        };

        let url = self.generate_url(api_key.expose_secret());

        let response = self.client.post(&url).json(&wire_request).send().await.map_err(|e| {
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

        let wire_response: GoogleResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Upstream(format!("failed to parse response: {e}")))?;

        let text = wire_response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().find_map(|part| part.text))
            .ok_or_else(|| AnalysisError::MalformedResponse("response contained no candidates".to_owned()))?;

        let (input_tokens, output_tokens) = wire_response.usage_metadata.map_or_else(
            || (estimate_tokens(prompt), estimate_tokens(&text)),
            |usage| (usage.prompt_token_count, usage.candidates_token_count),
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
            provider_type: ProviderType::Google,
            model: "gemini-2.5-flash".to_owned(),
            api_key: None,
            base_url: None,
        };
        let provider = GoogleProvider::new("google".to_owned(), &config);

        assert!(!provider.is_available());
        assert_eq!(provider.identity().vendor, "google");
    }
}
