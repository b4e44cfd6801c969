//! Errors from the reasoning boundary.

use thiserror::Error;

/// Errors a [`Reasoner`](crate::Reasoner) can surface.
///
/// `Unconfigured` is deliberately distinct from transport faults: it means
/// no usable backend was wired up at deployment time, not that something
/// failed at runtime.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ReasonerError {
    /// No usable reasoning backend is available.
    #[error("no reasoning backend is configured")]
    Unconfigured,

    /// The backend failed while producing a response.
    #[error("reasoning backend error: {0}")]
    Backend(String),

    /// The response was cut off before completion.
    #[error("response interrupted: {0}")]
    Interrupted(String),

    /// Catch-all. Include context.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}
