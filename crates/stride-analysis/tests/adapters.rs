//! Provider adapter wire-format tests against a mock HTTP server

use secrecy::SecretString;
use serde_json::json;
use stride_analysis::{AnalysisError, Provider};
use stride_analysis::provider::{AnthropicProvider, GoogleProvider, OpenAiProvider};
use stride_config::{ProviderConfig, ProviderType};
use stride_core::{AnalysisRequest, GoalContext, Sentiment};
use url::Url;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(provider_type: ProviderType, model: &str, server: &MockServer) -> ProviderConfig {
    ProviderConfig {
        provider_type,
        model: model.to_owned(),
        api_key: Some(SecretString::from("sk-test")),
        base_url: Some(Url::parse(&server.uri()).unwrap()),
    }
}

const ANALYSIS_JSON: &str = r#"{"insight": "good pace", "suggestion": "add a rest day", "sentiment": "positive"}"#;

#[tokio::test]
async fn anthropic_success_reports_usage() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .and(header("x-api-key", "sk-test"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({"model": "claude-sonnet-4"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"type": "text", "text": ANALYSIS_JSON}],
            "usage": {"input_tokens": 120, "output_tokens": 40}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = AnthropicProvider::new(
        "anthropic".to_owned(),
        &config(ProviderType::Anthropic, "claude-sonnet-4", &server),
    );

    let completion = provider.complete("analyze this").await.unwrap();
    assert_eq!(completion.text, ANALYSIS_JSON);
    assert_eq!(completion.input_tokens, 120);
    assert_eq!(completion.output_tokens, 40);
}

#[tokio::test]
async fn anthropic_estimates_tokens_when_usage_missing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"type": "text", "text": "12345678"}]
        })))
        .mount(&server)
        .await;

    let provider = AnthropicProvider::new(
        "anthropic".to_owned(),
        &config(ProviderType::Anthropic, "claude-sonnet-4", &server),
    );

    // 12 prompt chars and 8 reply chars at 4 chars per token
    let completion = provider.complete("abcdefghijkl").await.unwrap();
    assert_eq!(completion.input_tokens, 3);
    assert_eq!(completion.output_tokens, 2);
}

#[tokio::test]
async fn anthropic_upstream_error_surfaces_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(529).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let provider = AnthropicProvider::new(
        "anthropic".to_owned(),
        &config(ProviderType::Anthropic, "claude-sonnet-4", &server),
    );

    let err = provider.complete("analyze this").await.unwrap_err();
    match err {
        AnalysisError::Upstream(message) => {
            assert!(message.contains("529"), "unexpected message: {message}");
            assert!(message.contains("overloaded"));
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn anthropic_rejects_response_without_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"type": "tool_use"}]
        })))
        .mount(&server)
        .await;

    let provider = AnthropicProvider::new(
        "anthropic".to_owned(),
        &config(ProviderType::Anthropic, "claude-sonnet-4", &server),
    );

    let err = provider.complete("analyze this").await.unwrap_err();
    assert!(matches!(err, AnalysisError::MalformedResponse(_)));
}

#[tokio::test]
async fn openai_success_reports_usage() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({"model": "gpt-4o"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": ANALYSIS_JSON}}],
            "usage": {"prompt_tokens": 90, "completion_tokens": 30}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OpenAiProvider::new("openai".to_owned(), &config(ProviderType::Openai, "gpt-4o", &server));

    let completion = provider.complete("analyze this").await.unwrap();
    assert_eq!(completion.text, ANALYSIS_JSON);
    assert_eq!(completion.input_tokens, 90);
    assert_eq!(completion.output_tokens, 30);
}

#[tokio::test]
async fn openai_rejects_empty_choices() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let provider = OpenAiProvider::new("openai".to_owned(), &config(ProviderType::Openai, "gpt-4o", &server));

    let err = provider.complete("analyze this").await.unwrap_err();
    assert!(matches!(err, AnalysisError::MalformedResponse(_)));
}

#[tokio::test]
async fn google_success_sends_key_as_query_param() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .and(query_param("key", "sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": ANALYSIS_JSON}]}}],
            "usageMetadata": {"promptTokenCount": 75, "candidatesTokenCount": 25}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = GoogleProvider::new(
        "google".to_owned(),
        &config(ProviderType::Google, "gemini-2.5-flash", &server),
    );

    let completion = provider.complete("analyze this").await.unwrap();
    assert_eq!(completion.text, ANALYSIS_JSON);
    assert_eq!(completion.input_tokens, 75);
    assert_eq!(completion.output_tokens, 25);
}

#[tokio::test]
async fn google_rejects_response_without_candidates() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&server)
        .await;

    let provider = GoogleProvider::new(
        "google".to_owned(),
        &config(ProviderType::Google, "gemini-2.5-flash", &server),
    );

    let err = provider.complete("analyze this").await.unwrap_err();
    assert!(matches!(err, AnalysisError::MalformedResponse(_)));
}

#[tokio::test]
async fn analyze_prices_a_live_wire_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"type": "text", "text": ANALYSIS_JSON}],
            "usage": {"input_tokens": 1000, "output_tokens": 500}
        })))
        .mount(&server)
        .await;

    let provider = AnthropicProvider::new(
        "anthropic".to_owned(),
        &config(ProviderType::Anthropic, "claude-sonnet-4", &server),
    );

    let request = AnalysisRequest::new(
        "ran 5k today".to_owned(),
        GoalContext {
            title: "Run a marathon".to_owned(),
            category: "fitness".to_owned(),
            progress_percent: 40,
            target_date: None,
            description: None,
        },
        Vec::new(),
    );

    let output = provider.analyze(&request).await.unwrap();
    assert_eq!(output.result.insight, "good pace");
    assert_eq!(output.result.suggestion.as_deref(), Some("add a rest day"));
    assert_eq!(output.result.sentiment, Sentiment::Positive);
    assert_eq!(output.usage.total_tokens, 1500);
    assert_eq!(output.usage.cost_usd, "0.010500");
}

#[tokio::test]
async fn missing_credentials_fail_without_any_request() {
    let provider = AnthropicProvider::new(
        "anthropic".to_owned(),
        &ProviderConfig {
            provider_type: ProviderType::Anthropic,
            model: "claude-sonnet-4".to_owned(),
            api_key: None,
            base_url: None,
        },
    );

    let err = provider.complete("analyze this").await.unwrap_err();
    assert!(matches!(err, AnalysisError::MissingCredentials { .. }));
}
