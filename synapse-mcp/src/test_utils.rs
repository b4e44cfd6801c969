//! Canned transports for tests.
//!
//! [`StaticTransport`] serves a fixed catalog, records every tool call for
//! spy-style assertions, and can be told to fail specific operations.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use synapse_types::TransportError;

use crate::transport::Transport;

/// One recorded `call_tool` invocation.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// Name the transport was asked to dispatch.
    pub name: String,
    /// Arguments as forwarded.
    pub arguments: Map<String, Value>,
}

/// Transport that serves canned data and records what reaches it.
pub struct StaticTransport {
    server: Value,
    tools: Value,
    resources: Value,
    prompts: Value,
    fail_connect: Option<String>,
    fail_list_tools: Option<String>,
    fail_list_resources: Option<String>,
    fail_call_tool: Option<String>,
    calls: Mutex<Vec<RecordedCall>>,
    connect_count: AtomicUsize,
    close_count: AtomicUsize,
}

impl StaticTransport {
    /// A transport with an empty catalog and no failures.
    #[must_use]
    pub fn new() -> Self {
        Self {
            server: json!({"name": "static", "version": "0"}),
            tools: json!([]),
            resources: json!([]),
            prompts: json!([]),
            fail_connect: None,
            fail_list_tools: None,
            fail_list_resources: None,
            fail_call_tool: None,
            calls: Mutex::new(Vec::new()),
            connect_count: AtomicUsize::new(0),
            close_count: AtomicUsize::new(0),
        }
    }

    /// Serve the given raw tool listing.
    #[must_use]
    pub fn with_tools(mut self, tools: Value) -> Self {
        self.tools = tools;
        self
    }

    /// Serve the given raw resource listing.
    #[must_use]
    pub fn with_resources(mut self, resources: Value) -> Self {
        self.resources = resources;
        self
    }

    /// Serve the given raw prompt listing.
    #[must_use]
    pub fn with_prompts(mut self, prompts: Value) -> Self {
        self.prompts = prompts;
        self
    }

    /// Serve the given server identity.
    #[must_use]
    pub fn with_server(mut self, server: Value) -> Self {
        self.server = server;
        self
    }

    /// Fail every `connect` with the given message.
    #[must_use]
    pub fn with_connect_failure(mut self, message: impl Into<String>) -> Self {
        self.fail_connect = Some(message.into());
        self
    }

    /// Fail every `list_tools` with the given message.
    #[must_use]
    pub fn with_list_tools_failure(mut self, message: impl Into<String>) -> Self {
        self.fail_list_tools = Some(message.into());
        self
    }

    /// Fail every `list_resources` with the given message.
    #[must_use]
    pub fn with_list_resources_failure(mut self, message: impl Into<String>) -> Self {
        self.fail_list_resources = Some(message.into());
        self
    }

    /// Fail every `call_tool` with the given message.
    ///
    /// Failing calls are still recorded, so a spy can distinguish "the
    /// transport rejected the call" from "the call never reached it".
    #[must_use]
    pub fn with_call_tool_failure(mut self, message: impl Into<String>) -> Self {
        self.fail_call_tool = Some(message.into());
        self
    }

    /// Every `call_tool` invocation that reached this transport, in order.
    #[must_use]
    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    /// How many `call_tool` invocations reached this transport.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock poisoned").len()
    }

    /// How many times `connect` succeeded.
    #[must_use]
    pub fn connect_count(&self) -> usize {
        self.connect_count.load(Ordering::SeqCst)
    }

    /// How many times `close` was observed.
    #[must_use]
    pub fn close_count(&self) -> usize {
        self.close_count.load(Ordering::SeqCst)
    }
}

impl Default for StaticTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for StaticTransport {
    async fn connect(&self) -> Result<bool, TransportError> {
        if let Some(msg) = &self.fail_connect {
            return Err(TransportError::Connection(msg.clone()));
        }
        self.connect_count.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }

    async fn server_info(&self) -> Result<Value, TransportError> {
        Ok(self.server.clone())
    }

    async fn list_tools(&self) -> Result<Value, TransportError> {
        match &self.fail_list_tools {
            Some(msg) => Err(TransportError::Protocol(msg.clone())),
            None => Ok(self.tools.clone()),
        }
    }

    async fn list_resources(&self) -> Result<Value, TransportError> {
        match &self.fail_list_resources {
            Some(msg) => Err(TransportError::Protocol(msg.clone())),
            None => Ok(self.resources.clone()),
        }
    }

    async fn list_prompts(&self) -> Result<Value, TransportError> {
        Ok(self.prompts.clone())
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<Value, TransportError> {
        self.calls
            .lock()
            .expect("calls lock poisoned")
            .push(RecordedCall {
                name: name.to_string(),
                arguments: arguments.clone(),
            });
        match &self.fail_call_tool {
            Some(msg) => Err(TransportError::Protocol(msg.clone())),
            None => Ok(json!({"tool": name, "arguments": Value::Object(arguments)})),
        }
    }

    async fn read_resource(&self, uri: &str) -> Result<Value, TransportError> {
        Ok(json!({"uri": uri}))
    }

    async fn close(&self) -> Result<(), TransportError> {
        self.close_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
