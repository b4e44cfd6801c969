//! Reasoner doubles for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use futures_util::StreamExt;
use futures_util::stream;
use serde_json::{Map, Value};

use synapse_types::StreamFragment;

use crate::{Reasoner, ReasonerError, ReasonerSetup, ReasonerStream};

/// Reasoner that echoes the message back. Never fails.
pub struct EchoReasoner {
    setup: Mutex<Option<ReasonerSetup>>,
}

impl EchoReasoner {
    /// Create an unconfigured echo reasoner.
    #[must_use]
    pub fn new() -> Self {
        Self {
            setup: Mutex::new(None),
        }
    }
}

impl Default for EchoReasoner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Reasoner for EchoReasoner {
    async fn configure(&mut self, setup: ReasonerSetup) -> Result<(), ReasonerError> {
        *self.setup.lock().expect("setup lock poisoned") = Some(setup);
        Ok(())
    }

    async fn respond(&self, message: &str) -> Result<String, ReasonerError> {
        Ok(format!("echo: {message}"))
    }

    fn respond_streaming(&self, message: &str) -> ReasonerStream {
        let fragments = vec![
            StreamFragment::text("echo: "),
            StreamFragment::text(message.to_string()),
        ];
        stream::iter(fragments).boxed()
    }
}

/// Reasoner that replays queued responses and records its configuration.
///
/// Optionally invokes one configured tool before answering, which exercises
/// the adapted-tool wiring end to end: the reasoner can only reach tools
/// that were in the setup it was given.
pub struct ScriptedReasoner {
    responses: Mutex<VecDeque<String>>,
    setup: Mutex<Option<ReasonerSetup>>,
    fail_configure_remaining: Mutex<u32>,
    fail_configure_message: String,
    tool_to_call: Option<(String, Map<String, Value>)>,
}

impl ScriptedReasoner {
    /// Queue the given responses, replayed in order.
    #[must_use]
    pub fn new(responses: Vec<&str>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(str::to_string).collect()),
            setup: Mutex::new(None),
            fail_configure_remaining: Mutex::new(0),
            fail_configure_message: String::new(),
            tool_to_call: None,
        }
    }

    /// Fail the next `count` `configure` calls with the given message.
    ///
    /// Use `u32::MAX` for a reasoner that can never be configured.
    #[must_use]
    pub fn with_configure_failures(mut self, count: u32, message: impl Into<String>) -> Self {
        self.fail_configure_remaining = Mutex::new(count);
        self.fail_configure_message = message.into();
        self
    }

    /// Invoke the named configured tool before every response.
    #[must_use]
    pub fn with_tool_call(mut self, name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        self.tool_to_call = Some((name.into(), arguments));
        self
    }

    /// Apply a setup through a shared handle.
    ///
    /// The trait takes `&mut self` so real backends can rebuild internal
    /// state; this double only stores the setup behind a mutex, so tests
    /// holding an `Arc<ScriptedReasoner>` can delegate here.
    pub fn record_configure(&self, setup: ReasonerSetup) -> Result<(), ReasonerError> {
        {
            let mut remaining = self
                .fail_configure_remaining
                .lock()
                .expect("failure counter lock poisoned");
            if *remaining > 0 {
                *remaining = remaining.saturating_sub(1);
                return Err(ReasonerError::Backend(self.fail_configure_message.clone()));
            }
        }
        *self.setup.lock().expect("setup lock poisoned") = Some(setup);
        Ok(())
    }

    /// The setup from the most recent `configure` call.
    #[must_use]
    pub fn configured_setup(&self) -> Option<ReasonerSetup> {
        self.setup.lock().expect("setup lock poisoned").clone()
    }

    /// Names of the tools from the most recent `configure` call.
    #[must_use]
    pub fn configured_tool_names(&self) -> Vec<String> {
        self.configured_setup()
            .map(|s| s.tools.iter().map(|t| t.name().to_string()).collect())
            .unwrap_or_default()
    }

    fn next_response(&self) -> Result<String, ReasonerError> {
        self.responses
            .lock()
            .expect("responses lock poisoned")
            .pop_front()
            .ok_or_else(|| ReasonerError::Backend("script exhausted".into()))
    }
}

#[async_trait]
impl Reasoner for ScriptedReasoner {
    async fn configure(&mut self, setup: ReasonerSetup) -> Result<(), ReasonerError> {
        self.record_configure(setup)
    }

    async fn respond(&self, _message: &str) -> Result<String, ReasonerError> {
        if let Some((name, arguments)) = &self.tool_to_call {
            let setup = self.configured_setup().ok_or(ReasonerError::Unconfigured)?;
            let tool = setup
                .tools
                .iter()
                .find(|t| t.name() == name.as_str())
                .ok_or_else(|| {
                    ReasonerError::Backend(format!("tool '{name}' not in configured set"))
                })?;
            tool.invoke(arguments.clone())
                .await
                .map_err(|e| ReasonerError::Backend(e.to_string()))?;
        }
        self.next_response()
    }

    fn respond_streaming(&self, _message: &str) -> ReasonerStream {
        let fragments = match self.next_response() {
            Ok(text) => text
                .split_inclusive(' ')
                .map(StreamFragment::text)
                .collect(),
            Err(e) => vec![StreamFragment::error(e.to_string())],
        };
        stream::iter(fragments).boxed()
    }
}

/// Reasoner whose backend fails mid-generation.
///
/// `respond` errors outright; `respond_streaming` yields one partial text
/// fragment and then the terminal error fragment, pinning the contract
/// that streams end with an error marker instead of panicking.
pub struct FailingReasoner {
    message: String,
}

impl FailingReasoner {
    /// Fail with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl Reasoner for FailingReasoner {
    async fn configure(&mut self, _setup: ReasonerSetup) -> Result<(), ReasonerError> {
        Ok(())
    }

    async fn respond(&self, _message: &str) -> Result<String, ReasonerError> {
        Err(ReasonerError::Backend(self.message.clone()))
    }

    fn respond_streaming(&self, _message: &str) -> ReasonerStream {
        let fragments = vec![
            StreamFragment::text("..."),
            StreamFragment::error(self.message.clone()),
        ];
        stream::iter(fragments).boxed()
    }
}
