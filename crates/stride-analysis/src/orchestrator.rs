//! Fan-out/fan-in engine for analysis rounds
//!
//! One round dispatches a single request to the selected providers
//! concurrently, races every call against the per-call deadline, and
//! persists each outcome the moment it settles. There is no cross-task
//! transaction: a failure or delay in one provider's persistence never
//! blocks, delays, or rolls back another's.

use std::sync::Arc;
use std::time::{Duration, Instant};

use stride_core::{AnalysisRequest, Strategy};
use stride_store::{CallStatus, InsightRecord, ResultStore, UsageRecord};
use tokio::task::JoinSet;
use uuid::Uuid;

use crate::error::AnalysisError;
use crate::provider::{Provider, elapsed_millis};
use crate::strategy::Selector;

/// Success/failure counts for one settled round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundSummary {
    /// Calls that produced a persisted insight
    pub successes: usize,
    /// Calls that failed or timed out
    pub failures: usize,
}

/// Dispatches analysis rounds to the selected providers
#[derive(Clone)]
pub struct Orchestrator {
    selector: Arc<Selector>,
    store: Arc<dyn ResultStore>,
    call_timeout: Duration,
}

impl Orchestrator {
    /// Create an orchestrator
    ///
    /// `call_timeout` bounds every provider call uniformly; it is a
    /// configuration knob, not a constant.
    #[must_use]
    pub fn new(selector: Arc<Selector>, store: Arc<dyn ResultStore>, call_timeout: Duration) -> Self {
        Self {
            selector,
            store,
            call_timeout,
        }
    }

    /// Fire-and-forget entry point for the CRUD layer
    ///
    /// Returns immediately; the triggering caller never waits for any
    /// provider call, and individual provider failures are routine and
    /// never escalated.
    pub fn submit(&self, entity_id: Uuid, request: AnalysisRequest, strategy: Strategy) {
        let orchestrator = self.clone();
        tokio::spawn(async move {
            orchestrator.run_round(entity_id, request, strategy).await;
        });
    }

    /// Run one round to completion
    ///
    /// Awaitable variant of [`Self::submit`] for callers that need the
    /// summary (tests, the CLI).
    pub async fn run_round(&self, entity_id: Uuid, request: AnalysisRequest, strategy: Strategy) -> RoundSummary {
        let providers = self.selector.select(strategy);
        if providers.is_empty() {
            tracing::info!(%entity_id, ?strategy, "no providers available, skipping analysis round");
            return RoundSummary::default();
        }

        let request = Arc::new(request);
        let mut calls = JoinSet::new();

        for provider in providers {
            let request = Arc::clone(&request);
            let store = Arc::clone(&self.store);
            let call_timeout = self.call_timeout;
            calls.spawn(run_call(entity_id, provider, request, store, call_timeout));
        }

        let mut summary = RoundSummary::default();
        while let Some(settled) = calls.join_next().await {
            match settled {
                Ok(CallStatus::Success) => summary.successes += 1,
                Ok(CallStatus::Failure) => summary.failures += 1,
                Err(e) => {
                    summary.failures += 1;
                    tracing::error!(%entity_id, error = %e, "analysis call task panicked");
                }
            }
        }

        tracing::info!(
            %entity_id,
            successes = summary.successes,
            failures = summary.failures,
            "analysis round settled"
        );

        summary
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("call_timeout", &self.call_timeout)
            .finish_non_exhaustive()
    }
}

/// Run one provider call and persist its outcome
///
/// Produces exactly one persisted usage record regardless of which side of
/// the timeout race resolves first. The slow call's future is dropped with
/// the race, so the round never waits for it.
async fn run_call(
    entity_id: Uuid,
    provider: Arc<dyn Provider>,
    request: Arc<AnalysisRequest>,
    store: Arc<dyn ResultStore>,
    call_timeout: Duration,
) -> CallStatus {
    let identity = provider.identity();
    let started = Instant::now();

    let outcome = match tokio::time::timeout(call_timeout, provider.analyze(&request)).await {
        Ok(settled) => settled,
        Err(_) => Err(AnalysisError::Timeout(call_timeout)),
    };

    match outcome {
        Ok(output) => {
            let insight = InsightRecord::new(entity_id, identity.clone(), output.result);
            if let Err(e) = store.append_insight(insight).await {
                tracing::warn!(%entity_id, model = %identity.model, error = %e, "failed to persist insight");
            }

            let usage = UsageRecord::success(entity_id, identity, output.usage);
            if let Err(e) = store.append_usage(usage).await {
                tracing::warn!(%entity_id, error = %e, "failed to persist usage record");
            }

            CallStatus::Success
        }
        Err(error) => {
            tracing::warn!(%entity_id, model = %identity.model, error = %error, "analysis call failed");

            let usage = UsageRecord::failure(entity_id, identity, elapsed_millis(started), error.to_string());
            if let Err(e) = store.append_usage(usage).await {
                tracing::warn!(%entity_id, error = %e, "failed to persist usage record");
            }

            CallStatus::Failure
        }
    }
}
