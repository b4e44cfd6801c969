#![deny(missing_docs)]
//! Shared types for the synapse MCP bridge.
//!
//! Everything a capability bridge passes between its layers lives here:
//!
//! - [`ToolDescriptor`], [`ResourceDescriptor`], [`PromptDescriptor`] — the
//!   normalized shape of whatever a remote MCP server advertises.
//! - [`CapabilitySnapshot`] — one immutable picture of a server's catalog,
//!   replaced wholesale on every discovery, never patched in place.
//! - [`ToolCallResult`] / [`ResourceReadResult`] — per-call outcomes in the
//!   shape the web layer serializes directly.
//! - [`StreamFragment`] — one unit of a streamed response, independently
//!   serializable (SSE-ready).
//! - [`SessionTool`] — the object-safe contract an adapted remote tool
//!   fulfils for the reasoning loop and the dispatch gate.
//!
//! Error enums ([`TransportError`], [`ToolError`]) follow the same
//! split as the rest of the workspace: wire-level faults stay in
//! `TransportError`, tool-level faults in `ToolError`, and each public
//! boundary converts them into result values rather than letting them
//! propagate.

pub mod descriptor;
pub mod error;
pub mod result;
pub mod snapshot;
pub mod stream;
pub mod tool;

pub use descriptor::{PromptDescriptor, ResourceDescriptor, ToolDescriptor};
pub use error::{ToolError, TransportError};
pub use result::{ResourceReadResult, ToolCallResult};
pub use snapshot::CapabilitySnapshot;
pub use stream::StreamFragment;
pub use tool::{BoxFuture, SessionTool};
