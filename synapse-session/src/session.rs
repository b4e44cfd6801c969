//! The session facade.

use std::sync::Arc;

use futures_util::StreamExt;
use futures_util::stream;
use serde_json::{Map, Value};
use thiserror::Error;

use synapse_agent::{DEFAULT_MAX_STEPS, Reasoner, ReasonerError, ReasonerSetup, default_directive};
use synapse_mcp::adapter::adapt_all;
use synapse_mcp::catalog::CapabilityRegistry;
use synapse_mcp::transport::Transport;
use synapse_types::{
    CapabilitySnapshot, ResourceReadResult, StreamFragment, ToolCallResult, ToolDescriptor,
};

use crate::gate::DispatchGate;
use crate::state::SessionState;

/// Errors the facade surfaces to the web layer.
///
/// Tool dispatch and resource reads do not use this type; they come back
/// as result values ([`ToolCallResult`], [`ResourceReadResult`]) so one
/// failed call never aborts the enclosing conversation.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SessionError {
    /// The session was closed; no operation may touch the transport.
    #[error("session is closed")]
    Inactive,

    /// No reasoning backend was wired up for this session.
    #[error("no reasoning backend is configured for this session")]
    ReasonerUnconfigured,

    /// The reasoning backend failed.
    #[error("reasoner error: {0}")]
    Reasoner(#[from] ReasonerError),
}

/// A lazy fragment sequence handed to the web layer.
pub type SessionStream = synapse_agent::ReasonerStream;

/// Static configuration for one session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Directive handed to the reasoner. `None` builds the default one
    /// from the discovered catalog.
    pub directive: Option<String>,
    /// Reasoning-step bound per response.
    pub max_steps: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            directive: None,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

/// One conversation's bridge to one MCP server.
///
/// Owns its transport for its whole lifetime and releases it exactly once
/// in [`cleanup`](Session::cleanup). The snapshot and the gate's tool
/// table are rebuilt wholesale by every [`initialize`](Session::initialize)
/// pass; nothing is patched incrementally.
///
/// Discovery and dispatch on one session must not interleave; the `&mut`
/// receivers make the compiler enforce that for a single owner, and shared
/// use goes through the per-session mutex in
/// [`SessionStore`](crate::SessionStore).
pub struct Session {
    transport: Arc<dyn Transport>,
    registry: CapabilityRegistry,
    reasoner: Option<Box<dyn Reasoner>>,
    config: SessionConfig,
    snapshot: CapabilitySnapshot,
    gate: DispatchGate,
    state: SessionState,
}

impl Session {
    /// Create a session over the given transport.
    ///
    /// `reasoner` may be absent: tool dispatch and capability inspection
    /// work without one, and reasoning operations surface
    /// [`SessionError::ReasonerUnconfigured`].
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        reasoner: Option<Box<dyn Reasoner>>,
        config: SessionConfig,
    ) -> Self {
        Self {
            registry: CapabilityRegistry::new(Arc::clone(&transport)),
            transport,
            reasoner,
            config,
            snapshot: CapabilitySnapshot::empty(),
            gate: DispatchGate::new(),
            state: SessionState::Uninitialized,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The snapshot from the most recent discovery pass.
    #[must_use]
    pub fn get_capabilities(&self) -> &CapabilitySnapshot {
        &self.snapshot
    }

    /// Descriptors of the currently discovered tools. Empty before the
    /// first discovery and after a fully failed one.
    #[must_use]
    pub fn get_tools(&self) -> &[ToolDescriptor] {
        &self.snapshot.tools
    }

    /// Connect, discover capabilities, rebuild the tool table, and
    /// configure the reasoner.
    ///
    /// Callable again on a `Ready` session to re-fetch the catalog; the
    /// previous snapshot and adapter table are discarded wholesale.
    /// Discovery failure does not abort: the session reaches `Ready` with
    /// a degraded snapshot and an empty tool set. If the reasoner rejects
    /// the tool-bearing setup it is re-configured tool-less; only a
    /// failure of that fallback propagates.
    pub async fn initialize(&mut self) -> Result<(), SessionError> {
        if !self.state.is_active() {
            return Err(SessionError::Inactive);
        }
        self.state = SessionState::Discovering;

        self.snapshot = match self.transport.connect().await {
            Ok(_) => self.registry.discover().await,
            Err(e) => {
                tracing::warn!(error = %e, "transport connection failed; continuing without tools");
                CapabilitySnapshot::degraded(Value::Null, e.to_string())
            }
        };

        let tools = adapt_all(&self.snapshot, &self.transport);
        self.gate.replace(tools.clone());

        if let Some(reasoner) = self.reasoner.as_mut() {
            let directive = self
                .config
                .directive
                .clone()
                .unwrap_or_else(|| default_directive(&self.snapshot.tools));
            let setup =
                ReasonerSetup::new(tools, directive).with_max_steps(self.config.max_steps);

            if let Err(e) = reasoner.configure(setup).await {
                tracing::warn!(error = %e, "reasoner rejected tool setup; falling back to tool-less configuration");
                reasoner
                    .configure(
                        ReasonerSetup::without_tools().with_max_steps(self.config.max_steps),
                    )
                    .await?;
            }
        }

        self.state = SessionState::Ready;
        tracing::info!(
            tools = self.snapshot.tools.len(),
            degraded = self.snapshot.is_degraded(),
            "session ready"
        );
        Ok(())
    }

    /// Answer one user message through the reasoner.
    ///
    /// Initializes lazily if no discovery has run yet. A degraded session
    /// with zero tools still answers conversationally.
    pub async fn query(&mut self, message: &str) -> Result<String, SessionError> {
        self.ensure_ready().await?;
        let reasoner = self
            .reasoner
            .as_ref()
            .ok_or(SessionError::ReasonerUnconfigured)?;
        Ok(reasoner.respond(message).await?)
    }

    /// Answer one user message as a fragment stream.
    ///
    /// Never fails out of the sequence: initialization and configuration
    /// problems become a single terminal error fragment. An override
    /// directive, when given, is prefixed onto the message for this call
    /// only; the configured directive is untouched.
    pub async fn stream(
        &mut self,
        message: &str,
        directive_override: Option<&str>,
    ) -> SessionStream {
        if let Err(e) = self.ensure_ready().await {
            return error_stream(e.to_string());
        }
        let Some(reasoner) = self.reasoner.as_ref() else {
            return error_stream(SessionError::ReasonerUnconfigured.to_string());
        };

        let prompt = match directive_override {
            Some(directive) => format!("{directive}\n\n{message}"),
            None => message.to_string(),
        };
        reasoner.respond_streaming(&prompt)
    }

    /// Invoke a discovered tool directly, bypassing the reasoner.
    ///
    /// Requires a completed discovery; before one, every name is unknown
    /// and refused locally. After [`cleanup`](Session::cleanup) the call is
    /// refused without touching the transport.
    pub async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> ToolCallResult {
        if !self.state.is_active() {
            return ToolCallResult::err(name, SessionError::Inactive.to_string());
        }
        self.gate.call(name, arguments).await
    }

    /// Read a resource from the connected server by URI.
    pub async fn read_resource(&self, uri: &str) -> ResourceReadResult {
        if !self.state.is_active() {
            return ResourceReadResult::err(uri, SessionError::Inactive.to_string());
        }
        match self.transport.read_resource(uri).await {
            Ok(content) => ResourceReadResult::ok(uri, content),
            Err(e) => {
                tracing::warn!(uri = %uri, error = %e, "resource read failed");
                ResourceReadResult::err(uri, e.to_string())
            }
        }
    }

    /// Release the transport. Idempotent; a second call is a no-op.
    ///
    /// Reachable from every state, including after a failed
    /// initialization or an abandoned stream.
    pub async fn cleanup(&mut self) {
        if !self.state.is_active() {
            return;
        }
        self.state = SessionState::Closed;
        self.gate.replace(Vec::new());

        if let Err(e) = self.transport.close().await {
            tracing::debug!(error = %e, "transport close reported an error");
        }
        tracing::info!("session closed");
    }

    async fn ensure_ready(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Closed => Err(SessionError::Inactive),
            SessionState::Ready => Ok(()),
            SessionState::Uninitialized | SessionState::Discovering => self.initialize().await,
        }
    }
}

/// A stream that yields one terminal error fragment.
fn error_stream(message: String) -> SessionStream {
    stream::iter(vec![StreamFragment::error(message)]).boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use synapse_mcp::test_utils::StaticTransport;

    #[tokio::test]
    async fn new_session_starts_uninitialized_with_empty_catalog() {
        let transport: Arc<dyn Transport> = Arc::new(StaticTransport::new());
        let session = Session::new(transport, None, SessionConfig::default());
        assert_eq!(session.state(), SessionState::Uninitialized);
        assert!(session.get_tools().is_empty());
        assert!(!session.get_capabilities().is_degraded());
    }

    #[tokio::test]
    async fn initialize_without_reasoner_reaches_ready() {
        let transport: Arc<dyn Transport> = Arc::new(StaticTransport::new());
        let mut session = Session::new(transport, None, SessionConfig::default());
        session.initialize().await.unwrap();
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[tokio::test]
    async fn query_without_reasoner_is_unconfigured() {
        let transport: Arc<dyn Transport> = Arc::new(StaticTransport::new());
        let mut session = Session::new(transport, None, SessionConfig::default());
        let err = session.query("hello").await.unwrap_err();
        assert!(matches!(err, SessionError::ReasonerUnconfigured));
    }

    #[tokio::test]
    async fn operations_after_cleanup_are_inactive() {
        let spy = Arc::new(StaticTransport::new());
        let transport: Arc<dyn Transport> = spy.clone();
        let mut session = Session::new(transport, None, SessionConfig::default());
        session.initialize().await.unwrap();
        session.cleanup().await;

        assert!(matches!(
            session.initialize().await,
            Err(SessionError::Inactive)
        ));
        let result = session.call_tool("t", Map::new()).await;
        assert!(!result.success);
        assert!(result.error.as_deref().unwrap().contains("closed"));
        // No transport traffic after close.
        assert_eq!(spy.call_count(), 0);
    }
}
