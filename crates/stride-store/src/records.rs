use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use stride_core::{AnalysisResult, ProviderIdentity, Sentiment, UsageMetrics};
use uuid::Uuid;

/// Whether a provider call settled successfully
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    /// Call completed and produced a result
    Success,
    /// Call failed or timed out
    Failure,
}

/// Persisted insight from one successful provider call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightRecord {
    /// Record identifier
    pub id: Uuid,
    /// Originating entity (e.g. the check-in that triggered the round)
    pub entity_id: Uuid,
    /// Adapter that produced the insight
    pub provider: ProviderIdentity,
    /// Short insight about the note
    pub insight: String,
    /// Optional actionable suggestion
    pub suggestion: Option<String>,
    /// Sentiment classification
    pub sentiment: Sentiment,
    /// When the record was appended
    pub recorded_at: Timestamp,
}

impl InsightRecord {
    /// Build a record from a provider's analysis result
    pub fn new(entity_id: Uuid, provider: ProviderIdentity, result: AnalysisResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            entity_id,
            provider,
            insight: result.insight,
            suggestion: result.suggestion,
            sentiment: result.sentiment,
            recorded_at: Timestamp::now(),
        }
    }
}

/// Persisted usage accounting for one settled provider call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageRecord {
    /// Record identifier
    pub id: Uuid,
    /// Originating entity
    pub entity_id: Uuid,
    /// Adapter the call went to
    pub provider: ProviderIdentity,
    /// Call outcome tag
    pub status: CallStatus,
    /// Normalized accounting
    pub metrics: UsageMetrics,
    /// Human-readable error for failed calls
    pub error: Option<String>,
    /// When the record was appended
    pub recorded_at: Timestamp,
}

impl UsageRecord {
    /// Record a successful call
    pub fn success(entity_id: Uuid, provider: ProviderIdentity, metrics: UsageMetrics) -> Self {
        Self {
            id: Uuid::new_v4(),
            entity_id,
            provider,
            status: CallStatus::Success,
            metrics,
            error: None,
            recorded_at: Timestamp::now(),
        }
    }

    /// Record a failed or timed-out call
    pub fn failure(entity_id: Uuid, provider: ProviderIdentity, latency_ms: u64, error: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            entity_id,
            provider,
            status: CallStatus::Failure,
            metrics: UsageMetrics::failure(latency_ms),
            error: Some(error),
            recorded_at: Timestamp::now(),
        }
    }
}

/// Persisted outcome of one prompt-test call
///
/// Holds the raw model output rather than a parsed insight; the prompt
/// test path exists for side-by-side human comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptRunRecord {
    /// Record identifier
    pub id: Uuid,
    /// The prompt-test run this outcome belongs to
    pub run_id: Uuid,
    /// Adapter the call went to
    pub provider: ProviderIdentity,
    /// Call outcome tag
    pub status: CallStatus,
    /// Raw model output text for successful calls
    pub output: Option<String>,
    /// Normalized accounting
    pub metrics: UsageMetrics,
    /// Human-readable error for failed calls
    pub error: Option<String>,
    /// When the record was appended
    pub recorded_at: Timestamp,
}

impl PromptRunRecord {
    /// Record a successful call with its raw output
    pub fn success(run_id: Uuid, provider: ProviderIdentity, output: String, metrics: UsageMetrics) -> Self {
        Self {
            id: Uuid::new_v4(),
            run_id,
            provider,
            status: CallStatus::Success,
            output: Some(output),
            metrics,
            error: None,
            recorded_at: Timestamp::now(),
        }
    }

    /// Record a failed or timed-out call
    pub fn failure(run_id: Uuid, provider: ProviderIdentity, latency_ms: u64, error: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            run_id,
            provider,
            status: CallStatus::Failure,
            output: None,
            metrics: UsageMetrics::failure(latency_ms),
            error: Some(error),
            recorded_at: Timestamp::now(),
        }
    }
}
