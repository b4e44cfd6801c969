#![deny(missing_docs)]
//! # synapse — umbrella crate
//!
//! Single import surface for the synapse MCP bridge. Re-exports the member
//! crates behind feature flags, plus a `prelude` for the happy path:
//! connect a transport, discover its capabilities, hand the adapted tools
//! to a reasoner, and serve the session to a web layer.

#[cfg(feature = "core")]
pub use synapse_agent;
#[cfg(feature = "mcp")]
pub use synapse_mcp;
#[cfg(feature = "session")]
pub use synapse_session;
#[cfg(feature = "core")]
pub use synapse_types;

/// Happy-path imports for composing a bridge.
pub mod prelude {
    #[cfg(feature = "core")]
    pub use synapse_types::{
        CapabilitySnapshot, PromptDescriptor, ResourceDescriptor, ResourceReadResult,
        SessionTool, StreamFragment, ToolCallResult, ToolDescriptor, ToolError, TransportError,
    };

    #[cfg(feature = "core")]
    pub use synapse_agent::{
        DEFAULT_MAX_STEPS, Reasoner, ReasonerError, ReasonerSetup, ReasonerStream,
        default_directive,
    };

    #[cfg(feature = "mcp")]
    pub use synapse_mcp::{
        AdaptedTool, CapabilityRegistry, McpTransport, Transport, TransportConfig, adapt_all,
    };

    #[cfg(feature = "session")]
    pub use synapse_session::{
        DispatchGate, Session, SessionConfig, SessionError, SessionState, SessionStore,
        SessionStream,
    };
}
