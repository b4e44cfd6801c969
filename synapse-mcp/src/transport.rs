//! The transport contract: what any MCP-compatible client must offer.

use async_trait::async_trait;
use serde_json::{Map, Value};
use synapse_types::TransportError;

/// Raw discovery and invocation primitives against one MCP server.
///
/// Implementations differ only in wire transport (child process, HTTP,
/// canned test data); the bridge above them is transport-agnostic. Listing
/// operations return raw JSON on purpose: servers disagree about listing
/// shapes, and normalization is the
/// [`CapabilityRegistry`](crate::CapabilityRegistry)'s job, not the wire
/// layer's.
///
/// No operation here carries its own timeout. Deadlines and cancellation
/// belong to the caller, which enforces them by ceasing to await the
/// returned future.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Establish the connection.
    ///
    /// Returns `Ok(true)` once a connection is live; calling it again on a
    /// live connection is a no-op that also returns `Ok(true)`.
    async fn connect(&self) -> Result<bool, TransportError>;

    /// Opaque identity metadata for the connected server.
    async fn server_info(&self) -> Result<Value, TransportError>;

    /// Enumerate tools. Shape is server-defined; not normalized here.
    async fn list_tools(&self) -> Result<Value, TransportError>;

    /// Enumerate resources. Shape is server-defined; not normalized here.
    async fn list_resources(&self) -> Result<Value, TransportError>;

    /// Enumerate prompts. Shape is server-defined; not normalized here.
    async fn list_prompts(&self) -> Result<Value, TransportError>;

    /// Invoke a named tool, forwarding `arguments` verbatim.
    async fn call_tool(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<Value, TransportError>;

    /// Read a resource by URI.
    async fn read_resource(&self, uri: &str) -> Result<Value, TransportError>;

    /// Release the connection. Idempotent; a second call is a no-op.
    async fn close(&self) -> Result<(), TransportError>;
}
