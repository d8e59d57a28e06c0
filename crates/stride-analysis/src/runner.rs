//! Ad hoc multi-model prompt comparison
//!
//! Same fan-out shape as the orchestrator, but the provider subset is a
//! caller-supplied allow-list and successful calls persist the raw model
//! output for side-by-side human comparison instead of a parsed insight.

use std::sync::Arc;
use std::time::{Duration, Instant};

use stride_core::UsageMetrics;
use stride_store::{CallStatus, PromptRunRecord, ResultStore};
use tokio::task::JoinSet;
use uuid::Uuid;

use crate::error::AnalysisError;
use crate::orchestrator::RoundSummary;
use crate::pricing;
use crate::provider::{Provider, elapsed_millis};
use crate::registry::ProviderRegistry;

/// Fans a user-supplied prompt out to an allow-listed provider subset
#[derive(Clone)]
pub struct PromptTestRunner {
    registry: Arc<ProviderRegistry>,
    store: Arc<dyn ResultStore>,
    call_timeout: Duration,
}

impl PromptTestRunner {
    /// Create a runner over the process-wide registry
    #[must_use]
    pub fn new(registry: Arc<ProviderRegistry>, store: Arc<dyn ResultStore>, call_timeout: Duration) -> Self {
        Self {
            registry,
            store,
            call_timeout,
        }
    }

    /// Fire-and-forget entry point
    pub fn submit(&self, run_id: Uuid, prompt: String, allow_list: Vec<String>) {
        let runner = self.clone();
        tokio::spawn(async move {
            runner.run(run_id, &prompt, &allow_list).await;
        });
    }

    /// Run one prompt test to completion
    ///
    /// The allow-list holds exact backend identifiers (model id or
    /// configured name) and is intersected with available providers in
    /// registry order; identifiers matching nothing are silently ignored.
    pub async fn run(&self, run_id: Uuid, prompt: &str, allow_list: &[String]) -> RoundSummary {
        let providers: Vec<Arc<dyn Provider>> = self
            .registry
            .providers()
            .iter()
            .filter(|p| {
                p.is_available()
                    && allow_list
                        .iter()
                        .any(|id| *id == p.identity().model || id == p.name())
            })
            .cloned()
            .collect();

        if providers.is_empty() {
            tracing::info!(%run_id, "allow-list matched no available providers, skipping prompt test");
            return RoundSummary::default();
        }

        let prompt: Arc<str> = Arc::from(prompt);
        let mut calls = JoinSet::new();

        for provider in providers {
            let prompt = Arc::clone(&prompt);
            let store = Arc::clone(&self.store);
            let call_timeout = self.call_timeout;
            calls.spawn(run_prompt_call(run_id, provider, prompt, store, call_timeout));
        }

        let mut summary = RoundSummary::default();
        while let Some(settled) = calls.join_next().await {
            match settled {
                Ok(CallStatus::Success) => summary.successes += 1,
                Ok(CallStatus::Failure) => summary.failures += 1,
                Err(e) => {
                    summary.failures += 1;
                    tracing::error!(%run_id, error = %e, "prompt test task panicked");
                }
            }
        }

        tracing::info!(
            %run_id,
            successes = summary.successes,
            failures = summary.failures,
            "prompt test settled"
        );

        summary
    }
}

impl std::fmt::Debug for PromptTestRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptTestRunner")
            .field("call_timeout", &self.call_timeout)
            .finish_non_exhaustive()
    }
}

/// Run one prompt call and persist its outcome
async fn run_prompt_call(
    run_id: Uuid,
    provider: Arc<dyn Provider>,
    prompt: Arc<str>,
    store: Arc<dyn ResultStore>,
    call_timeout: Duration,
) -> CallStatus {
    let identity = provider.identity();
    let started = Instant::now();

    let outcome = match tokio::time::timeout(call_timeout, provider.complete(&prompt)).await {
        Ok(settled) => settled,
        Err(_) => Err(AnalysisError::Timeout(call_timeout)),
    };

    match outcome {
        Ok(completion) => {
            let cost = pricing::cost(&identity.model, completion.input_tokens, completion.output_tokens);
            let metrics = UsageMetrics::success(
                completion.input_tokens,
                completion.output_tokens,
                elapsed_millis(started).max(1),
                cost,
            );

            let record = PromptRunRecord::success(run_id, identity, completion.text, metrics);
            if let Err(e) = store.append_prompt_run(record).await {
                tracing::warn!(%run_id, error = %e, "failed to persist prompt run record");
            }

            CallStatus::Success
        }
        Err(error) => {
            tracing::warn!(%run_id, model = %identity.model, error = %error, "prompt test call failed");

            let record = PromptRunRecord::failure(run_id, identity, elapsed_millis(started), error.to_string());
            if let Err(e) = store.append_prompt_run(record).await {
                tracing::warn!(%run_id, error = %e, "failed to persist prompt run record");
            }

            CallStatus::Failure
        }
    }
}
