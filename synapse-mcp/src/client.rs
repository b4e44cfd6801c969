//! rmcp-backed [`Transport`] implementation.
//!
//! [`McpTransport`] connects to an MCP server via a stdio child process or
//! streamable HTTP (supersedes SSE), holds the running service behind a
//! mutex, and releases it exactly once on [`close`](Transport::close).

use std::borrow::Cow;
use std::collections::HashMap;

use async_trait::async_trait;
use rmcp::ServiceExt;
use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, RawContent, ReadResourceRequestParams,
};
use rmcp::service::{RoleClient, RunningService};
use rmcp::transport::child_process::TokioChildProcess;
use rmcp::transport::streamable_http_client::StreamableHttpClientTransport;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use synapse_types::TransportError;

use crate::transport::Transport;

/// How to reach the MCP server.
#[derive(Debug, Clone)]
pub enum TransportConfig {
    /// Spawn the server as a child process and speak MCP over stdio.
    Stdio {
        /// Executable to launch.
        command: String,
        /// Arguments passed to the executable.
        args: Vec<String>,
        /// Environment variables set for the child process.
        env: HashMap<String, String>,
    },
    /// Connect to the server's streamable HTTP endpoint
    /// (e.g. `http://localhost:8080/mcp`).
    Http {
        /// The endpoint URL.
        url: String,
    },
}

impl TransportConfig {
    /// Stdio configuration with no extra arguments or environment.
    #[must_use]
    pub fn stdio(command: impl Into<String>) -> Self {
        Self::Stdio {
            command: command.into(),
            args: Vec::new(),
            env: HashMap::new(),
        }
    }

    /// HTTP configuration for the given endpoint URL.
    #[must_use]
    pub fn http(url: impl Into<String>) -> Self {
        Self::Http { url: url.into() }
    }

    /// Read the configuration from the process environment.
    ///
    /// `SYNAPSE_MCP_URL` selects HTTP; otherwise `SYNAPSE_MCP_COMMAND`
    /// (with whitespace-separated `SYNAPSE_MCP_ARGS`) selects stdio.
    /// Returns `None` when neither variable is set.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        if let Ok(url) = std::env::var("SYNAPSE_MCP_URL") {
            return Some(Self::Http { url });
        }
        let command = std::env::var("SYNAPSE_MCP_COMMAND").ok()?;
        let args = std::env::var("SYNAPSE_MCP_ARGS")
            .map(|raw| raw.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();
        Some(Self::Stdio {
            command,
            args,
            env: HashMap::new(),
        })
    }
}

/// MCP transport over rmcp.
///
/// The connection is established by [`connect`](Transport::connect) and
/// owned by this value until [`close`](Transport::close) takes it out and
/// cancels it. All other operations fail with
/// [`TransportError::NotConnected`] outside that window.
pub struct McpTransport {
    config: TransportConfig,
    service: Mutex<Option<RunningService<RoleClient, ()>>>,
}

impl McpTransport {
    /// Create an unconnected transport for the given configuration.
    #[must_use]
    pub fn new(config: TransportConfig) -> Self {
        Self {
            config,
            service: Mutex::new(None),
        }
    }

    /// Clone the peer handle out of the live connection.
    async fn peer(&self) -> Result<rmcp::service::Peer<RoleClient>, TransportError> {
        let guard = self.service.lock().await;
        let service = guard.as_ref().ok_or(TransportError::NotConnected)?;
        Ok(service.peer().clone())
    }
}

#[async_trait]
impl Transport for McpTransport {
    async fn connect(&self) -> Result<bool, TransportError> {
        let mut guard = self.service.lock().await;
        if guard.is_some() {
            return Ok(true);
        }

        let service = match &self.config {
            TransportConfig::Stdio { command, args, env } => {
                let mut cmd = tokio::process::Command::new(command);
                cmd.args(args);
                for (key, value) in env {
                    cmd.env(key, value);
                }
                tracing::debug!(command = %command, "spawning MCP server process");
                let transport = TokioChildProcess::new(cmd)
                    .map_err(|e| TransportError::Connection(e.to_string()))?;
                ().serve(transport)
                    .await
                    .map_err(|e| TransportError::Connection(e.to_string()))?
            }
            TransportConfig::Http { url } => {
                tracing::debug!(url = %url, "connecting to MCP server over streamable HTTP");
                let transport = StreamableHttpClientTransport::from_uri(url.as_str());
                ().serve(transport)
                    .await
                    .map_err(|e| TransportError::Connection(e.to_string()))?
            }
        };

        tracing::info!("MCP connection established");
        *guard = Some(service);
        Ok(true)
    }

    async fn server_info(&self) -> Result<Value, TransportError> {
        let guard = self.service.lock().await;
        let service = guard.as_ref().ok_or(TransportError::NotConnected)?;
        match service.peer_info() {
            Some(info) => Ok(serde_json::to_value(info)
                .map_err(|e| TransportError::Protocol(e.to_string()))?),
            None => Ok(Value::Null),
        }
    }

    async fn list_tools(&self) -> Result<Value, TransportError> {
        let peer = self.peer().await?;
        let tools = peer
            .list_all_tools()
            .await
            .map_err(|e| TransportError::Protocol(e.to_string()))?;
        serde_json::to_value(tools).map_err(|e| TransportError::Protocol(e.to_string()))
    }

    async fn list_resources(&self) -> Result<Value, TransportError> {
        let peer = self.peer().await?;
        let resources = peer
            .list_all_resources()
            .await
            .map_err(|e| TransportError::Protocol(e.to_string()))?;
        serde_json::to_value(resources).map_err(|e| TransportError::Protocol(e.to_string()))
    }

    async fn list_prompts(&self) -> Result<Value, TransportError> {
        let peer = self.peer().await?;
        let prompts = peer
            .list_all_prompts()
            .await
            .map_err(|e| TransportError::Protocol(e.to_string()))?;
        serde_json::to_value(prompts).map_err(|e| TransportError::Protocol(e.to_string()))
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<Value, TransportError> {
        let peer = self.peer().await?;
        tracing::debug!(tool = %name, "calling remote tool");

        let params = CallToolRequestParams {
            meta: None,
            name: Cow::Owned(name.to_string()),
            arguments: Some(arguments),
            task: None,
        };

        let result: CallToolResult = peer
            .call_tool(params)
            .await
            .map_err(|e| TransportError::Protocol(e.to_string()))?;

        if result.is_error == Some(true) {
            let msg = extract_text_from_content(&result.content);
            return Err(TransportError::Protocol(msg));
        }

        // Prefer structured content when the server provides it.
        if let Some(structured) = result.structured_content {
            return Ok(structured);
        }

        let text = extract_text_from_content(&result.content);
        Ok(Value::String(text))
    }

    async fn read_resource(&self, uri: &str) -> Result<Value, TransportError> {
        let peer = self.peer().await?;
        let params = ReadResourceRequestParams {
            uri: uri.to_string(),
            meta: None,
        };
        let result = peer
            .read_resource(params)
            .await
            .map_err(|e| TransportError::Protocol(e.to_string()))?;
        serde_json::to_value(result.contents).map_err(|e| TransportError::Protocol(e.to_string()))
    }

    async fn close(&self) -> Result<(), TransportError> {
        let service = self.service.lock().await.take();
        match service {
            Some(service) => {
                tracing::info!("releasing MCP connection");
                service
                    .cancel()
                    .await
                    .map_err(|e| TransportError::Connection(e.to_string()))?;
                Ok(())
            }
            // Already released; a second close is a no-op.
            None => Ok(()),
        }
    }
}

/// Extract text from MCP content blocks.
fn extract_text_from_content(content: &[Content]) -> String {
    content
        .iter()
        .filter_map(|c| match &c.raw {
            RawContent::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}
