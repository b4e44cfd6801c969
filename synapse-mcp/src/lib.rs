#![deny(missing_docs)]
//! MCP transport, capability discovery, and tool adaptation.
//!
//! Three layers, leaves first:
//!
//! - [`Transport`] is the external-collaborator boundary: enumerate tools,
//!   resources, and prompts, invoke a named tool, read a resource.
//!   [`McpTransport`] implements it over rmcp (stdio child process or
//!   streamable HTTP); [`test_utils::StaticTransport`] implements it over
//!   canned data for tests.
//! - [`CapabilityRegistry`] queries a transport once per discovery pass and
//!   normalizes whatever comes back into a
//!   [`CapabilitySnapshot`](synapse_types::CapabilitySnapshot). Transport
//!   failures degrade the snapshot instead of propagating.
//! - [`AdaptedTool`] wraps one discovered descriptor as a
//!   [`SessionTool`](synapse_types::SessionTool), forwarding invocations to
//!   the transport under the descriptor's own name.

pub mod adapter;
pub mod catalog;
pub mod client;
pub mod transport;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use adapter::{AdaptedTool, adapt_all};
pub use catalog::CapabilityRegistry;
pub use client::{McpTransport, TransportConfig};
pub use transport::Transport;
