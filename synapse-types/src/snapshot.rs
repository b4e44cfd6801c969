//! One immutable picture of a remote server's capabilities.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::descriptor::{PromptDescriptor, ResourceDescriptor, ToolDescriptor};

/// Everything a transport exposed at one discovery pass.
///
/// A snapshot is built once per (re-)initialization and replaced wholesale;
/// nothing ever mutates an existing snapshot in place. A failed discovery
/// still produces a snapshot (empty catalogs tagged with `error`) so
/// callers degrade instead of crashing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CapabilitySnapshot {
    /// Opaque server identity metadata, as reported by the transport.
    #[serde(default)]
    pub server: Value,
    /// Discovered tools, in catalog order.
    #[serde(default)]
    pub tools: Vec<ToolDescriptor>,
    /// Discovered resources, in catalog order.
    #[serde(default)]
    pub resources: Vec<ResourceDescriptor>,
    /// Discovered prompts, in catalog order.
    #[serde(default)]
    pub prompts: Vec<PromptDescriptor>,
    /// Set when discovery partially or fully failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CapabilitySnapshot {
    /// An empty snapshot with no error tag. The state before first discovery.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// An empty snapshot tagged with a discovery failure.
    #[must_use]
    pub fn degraded(server: Value, error: impl Into<String>) -> Self {
        Self {
            server,
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Whether discovery recorded a failure for this snapshot.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }

    /// Names of all discovered tools, in catalog order.
    #[must_use]
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    /// Look up a tool descriptor by name.
    #[must_use]
    pub fn find_tool(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.name == name)
    }
}
