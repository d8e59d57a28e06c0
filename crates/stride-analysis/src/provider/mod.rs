//! Provider trait and adapters for inference backends

pub mod anthropic;
pub mod google;
pub mod openai;

use std::time::Instant;

use async_trait::async_trait;
use stride_core::{AnalysisRequest, AnalysisResult, ProviderIdentity, UsageMetrics};

use crate::error::AnalysisError;
use crate::{pricing, prompt};

pub use anthropic::AnthropicProvider;
pub use google::GoogleProvider;
pub use openai::OpenAiProvider;

/// Maximum tokens requested from every backend for one analysis reply
const MAX_OUTPUT_TOKENS: u32 = 1024;

/// Characters per token used when a backend omits usage accounting
const CHARS_PER_TOKEN: usize = 4;

/// Raw output of one backend call
#[derive(Debug, Clone)]
pub struct Completion {
    /// Model output text
    pub text: String,
    /// Tokens consumed by the prompt (reported or estimated)
    pub input_tokens: u32,
    /// Tokens generated by the model (reported or estimated)
    pub output_tokens: u32,
}

/// Output of one successful analysis call
#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    /// Parsed structured insight
    pub result: AnalysisResult,
    /// Normalized accounting for the call
    pub usage: UsageMetrics,
}

/// Trait implemented by each inference backend adapter
///
/// Adapters speak one backend's protocol and nothing else: no persistence,
/// no timeouts (the orchestrator wraps the deadline), no mutation of the
/// request.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Configured provider name
    fn name(&self) -> &str;

    /// Identity carried alongside every persisted outcome
    fn identity(&self) -> ProviderIdentity;

    /// Whether credentials were present at construction
    ///
    /// An unavailable provider stays unavailable for the life of the
    /// process and must never be selected.
    fn is_available(&self) -> bool;

    /// Send a single-turn prompt to the backend
    async fn complete(&self, prompt: &str) -> Result<Completion, AnalysisError>;

    /// Run the structured analysis flow: prompt, complete, parse, price
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisOutput, AnalysisError> {
        let started = Instant::now();
        let prompt = prompt::build_analysis_prompt(request);

        let completion = self.complete(&prompt).await?;
        let result = prompt::parse_analysis(&completion.text)?;

        let identity = self.identity();
        let cost = pricing::cost(&identity.model, completion.input_tokens, completion.output_tokens);

        // Clamp to 1ms so successful calls always report nonzero latency
        // even under coarse clock resolution.
        let latency_ms = elapsed_millis(started).max(1);

        Ok(AnalysisOutput {
            result,
            usage: UsageMetrics::success(completion.input_tokens, completion.output_tokens, latency_ms, cost),
        })
    }
}

/// Treat empty keys as absent; the config layer expands unset env vars to
/// empty strings via `default("")`
pub(crate) fn present_key(key: Option<secrecy::SecretString>) -> Option<secrecy::SecretString> {
    use secrecy::ExposeSecret;
    key.filter(|k| !k.expose_secret().is_empty())
}

/// Whole milliseconds elapsed since `started`
pub(crate) fn elapsed_millis(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Estimate a token count from text length when the upstream omits usage
pub(crate) fn estimate_tokens(text: &str) -> u32 {
    u32::try_from(text.len() / CHARS_PER_TOKEN).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stride_core::{GoalContext, Sentiment};

    /// Adapter stub that returns a fixed completion
    struct FixedProvider {
        text: String,
    }

    #[async_trait]
    impl Provider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        fn identity(&self) -> ProviderIdentity {
            ProviderIdentity::new("claude-sonnet-4", "anthropic")
        }

        fn is_available(&self) -> bool {
            true
        }

        async fn complete(&self, _prompt: &str) -> Result<Completion, AnalysisError> {
            Ok(Completion {
                text: self.text.clone(),
                input_tokens: 1000,
                output_tokens: 500,
            })
        }
    }

    fn request() -> AnalysisRequest {
        AnalysisRequest::new(
            "felt great".to_owned(),
            GoalContext {
                title: "Read 20 books".to_owned(),
                category: "learning".to_owned(),
                progress_percent: 25,
                target_date: None,
                description: None,
            },
            Vec::new(),
        )
    }

    #[tokio::test]
    async fn analyze_parses_and_prices() {
        let provider = FixedProvider {
            text: r#"{"insight": "on track", "sentiment": "positive"}"#.to_owned(),
        };

        let output = provider.analyze(&request()).await.unwrap();
        assert_eq!(output.result.sentiment, Sentiment::Positive);
        assert_eq!(output.usage.total_tokens, 1500);
        assert_eq!(output.usage.cost_usd, "0.010500");
        assert!(output.usage.latency_ms >= 1);
    }

    #[tokio::test]
    async fn analyze_fails_on_unparseable_reply() {
        let provider = FixedProvider {
            text: "I'd rather not say.".to_owned(),
        };

        let err = provider.analyze(&request()).await.unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[test]
    fn token_estimate_uses_text_length() {
        assert_eq!(estimate_tokens("12345678"), 2);
        assert_eq!(estimate_tokens(""), 0);
    }
}
