//! Capability discovery and listing normalization.

use std::sync::Arc;

use serde_json::Value;

use synapse_types::{CapabilitySnapshot, PromptDescriptor, ResourceDescriptor, ToolDescriptor};

use crate::transport::Transport;

/// Discovers what a transport's server can do.
///
/// `discover` never fails: every transport error is folded into the
/// returned snapshot's `error` tag so callers proceed degraded instead of
/// crashing. The snapshot is built fresh on every call and replaced
/// wholesale by the caller; nothing here is cached or patched.
pub struct CapabilityRegistry {
    transport: Arc<dyn Transport>,
}

impl CapabilityRegistry {
    /// Create a registry over the given transport.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Query the transport and snapshot its catalog.
    ///
    /// Listing failures degrade the snapshot; whatever was enumerated
    /// before the failure is kept. A missing server identity alone does
    /// not degrade the snapshot.
    pub async fn discover(&self) -> CapabilitySnapshot {
        let mut errors: Vec<String> = Vec::new();

        let server = match self.transport.server_info().await {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(error = %e, "server identity unavailable");
                Value::Null
            }
        };

        let tools: Vec<ToolDescriptor> = match self.transport.list_tools().await {
            Ok(raw) => unwrap_listing(raw, "tools")
                .iter()
                .map(ToolDescriptor::from_value)
                .collect(),
            Err(e) => {
                errors.push(format!("tools: {e}"));
                Vec::new()
            }
        };

        let resources: Vec<ResourceDescriptor> = match self.transport.list_resources().await {
            Ok(raw) => unwrap_listing(raw, "resources")
                .iter()
                .map(ResourceDescriptor::from_value)
                .collect(),
            Err(e) => {
                errors.push(format!("resources: {e}"));
                Vec::new()
            }
        };

        let prompts: Vec<PromptDescriptor> = match self.transport.list_prompts().await {
            Ok(raw) => unwrap_listing(raw, "prompts")
                .iter()
                .map(PromptDescriptor::from_value)
                .collect(),
            Err(e) => {
                errors.push(format!("prompts: {e}"));
                Vec::new()
            }
        };

        let error = if errors.is_empty() {
            None
        } else {
            Some(errors.join("; "))
        };

        match &error {
            Some(err) => tracing::warn!(error = %err, "capability discovery degraded"),
            None => tracing::info!(
                tools = tools.len(),
                resources = resources.len(),
                prompts = prompts.len(),
                "capability discovery complete"
            ),
        }

        CapabilitySnapshot {
            server,
            tools,
            resources,
            prompts,
            error,
        }
    }
}

/// Flatten a raw listing into its entries.
///
/// Accepts both a raw array and a wrapper object carrying the named field
/// (`{"tools": [...]}`). Anything else that is not null is treated as a
/// single entry so it survives normalization instead of disappearing.
fn unwrap_listing(raw: Value, field: &str) -> Vec<Value> {
    match raw {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        Value::Object(mut obj) => match obj.remove(field) {
            Some(Value::Array(items)) => items,
            Some(Value::Null) | None => {
                tracing::warn!(field, "listing object carries no entry array");
                vec![Value::Object(obj)]
            }
            Some(single) => vec![single],
        },
        other => {
            tracing::warn!(field, "unrecognized listing shape");
            vec![other]
        }
    }
}
