//! The object-safe contract an adapted remote tool fulfils.

use std::future::Future;
use std::pin::Pin;

use serde_json::{Map, Value};

use crate::error::ToolError;

/// Boxed future used by object-safe async methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A callable tool as seen by the reasoning loop and the dispatch gate.
///
/// Implementations own their descriptor data outright. The invariant that
/// makes dispatch correct: invoking implementation #k always sends
/// descriptor #k's name to the transport, never any other tool's name,
/// regardless of the order the set was built in.
pub trait SessionTool: Send + Sync {
    /// Name the transport dispatches on.
    fn name(&self) -> &str;

    /// Human-readable description, surfaced to the reasoning loop.
    fn description(&self) -> &str;

    /// JSON Schema for the tool's input. Informational only.
    fn input_schema(&self) -> Value;

    /// Invoke the tool, forwarding `arguments` verbatim.
    fn invoke(&self, arguments: Map<String, Value>) -> BoxFuture<'_, Result<Value, ToolError>>;
}
