use std::time::Duration;

use thiserror::Error;

/// Errors that can occur during a provider analysis call
///
/// These are scoped to a single call within a single round; nothing here
/// escalates to other provider calls or to the caller that triggered the
/// round.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Provider was constructed without credentials and should never have
    /// been selected
    #[error("provider '{provider}' has no credentials configured")]
    MissingCredentials {
        /// Configured provider name
        provider: String,
    },

    /// Upstream returned a network failure, non-2xx status, or unparsable
    /// body
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Upstream responded but the payload lacked required fields
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// The call exceeded the per-call deadline
    #[error("call timed out after {0:?}")]
    Timeout(Duration),
}
