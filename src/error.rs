// src/error.rs
// Failure taxonomy for model and storage calls

use thiserror::Error;

/// Errors raised while talking to the generative model or cloud storage.
///
/// None of these escape the workflow: every stage converts them into its
/// own fallback output. The duplicate check is the one place a
/// `ProviderError` crosses a stage boundary, and only so the orchestrator
/// can log it and continue.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("provider not configured")]
    NotConfigured,

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status} from provider")]
    Status { status: u16 },

    #[error("call timed out after {0}s")]
    Timeout(u64),

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Convenience alias for provider call results
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

impl ProviderError {
    /// Whether the failure is a definitive HTTP rejection rather than a
    /// network-level problem. Used by the hub access probe, which fails
    /// open on anything inconclusive.
    pub fn is_definitive_rejection(&self) -> bool {
        matches!(self, ProviderError::Status { .. })
    }
}
