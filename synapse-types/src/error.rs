//! Error types shared across the synapse crates.

use thiserror::Error;

/// Errors from the MCP transport layer.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TransportError {
    /// No connection has been established (or it was already released).
    #[error("transport is not connected")]
    NotConnected,

    /// Establishing the connection failed.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The server answered, but the exchange failed at the protocol level
    /// (request rejected, malformed response, remote-side tool error).
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Catch-all. Include context.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors from adapted-tool invocation.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool is not in the current capability snapshot.
    #[error("tool not found: {0}")]
    NotFound(String),

    /// The arguments could not be forwarded as given.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The transport raised while executing the call.
    #[error("execution failed: {0}")]
    ExecutionFailed(String),
}

impl From<TransportError> for ToolError {
    fn from(err: TransportError) -> Self {
        ToolError::ExecutionFailed(err.to_string())
    }
}
