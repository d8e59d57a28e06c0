use serde::{Deserialize, Serialize};

/// Identifies which adapter produced a result
///
/// Carried alongside every persisted outcome so multi-backend comparisons
/// remain possible after the fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderIdentity {
    /// Backend model identifier (e.g. "claude-sonnet-4")
    pub model: String,
    /// Vendor name (e.g. "anthropic")
    pub vendor: String,
}

impl ProviderIdentity {
    /// Create an identity from model and vendor names
    pub fn new(model: impl Into<String>, vendor: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            vendor: vendor.into(),
        }
    }
}

/// Normalized per-call accounting
///
/// Produced for every settled call, success or failure. Cost is kept as a
/// fixed-decimal string to avoid floating-point drift across persistence
/// boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageMetrics {
    /// Tokens consumed by the prompt
    pub input_tokens: u32,
    /// Tokens generated by the model
    pub output_tokens: u32,
    /// Total tokens (input + output)
    pub total_tokens: u32,
    /// Wall-clock call duration in milliseconds
    pub latency_ms: u64,
    /// Estimated cost in USD as a decimal string
    pub cost_usd: String,
}

impl UsageMetrics {
    /// Accounting for a successful call
    pub fn success(input_tokens: u32, output_tokens: u32, latency_ms: u64, cost_usd: String) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens: input_tokens + output_tokens,
            latency_ms,
            cost_usd,
        }
    }

    /// Accounting for a failed or timed-out call: zero counts, zero cost,
    /// elapsed time up to the failure
    pub fn failure(latency_ms: u64) -> Self {
        Self {
            input_tokens: 0,
            output_tokens: 0,
            total_tokens: 0,
            latency_ms,
            cost_usd: "0".to_owned(),
        }
    }
}
