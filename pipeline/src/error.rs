//! Pipeline error taxonomy
//!
//! Every `GenerateError` is recovered internally by substituting the
//! deterministic fallback; only `ConfigError` ever reaches a caller as a
//! failure.

use thiserror::Error;

/// Failures of the bounded generator call or response validation.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// No response arrived within the configured deadline.
    #[error("model call timed out after {0}s")]
    Timeout(u64),

    /// Transport, auth, or rate-limit failure surfaced by the provider.
    #[error("upstream provider error: {0}")]
    Upstream(String),

    /// The provider answered but with no textual content block.
    #[error("provider returned an empty response")]
    EmptyResponse,

    /// Response text could not be turned into a valid app description.
    #[error("malformed model response: {0}")]
    MalformedResponse(String),
}

/// Fatal configuration problems — no generation can occur at all.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no API credential configured (set ANTHROPIC_API_KEY)")]
    MissingCredential,
}
