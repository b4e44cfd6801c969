//! Normalized descriptors for remote capabilities.
//!
//! MCP servers disagree about the exact shape of their listings. The
//! `from_value` constructors are the single place that disagreement is
//! absorbed: a well-formed object maps field by field, and anything else is
//! coerced to a best-effort descriptor keyed on its string representation.
//! Entries are never dropped during normalization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tool advertised by a remote MCP server.
///
/// Immutable once captured. `name` is unique within one
/// [`CapabilitySnapshot`](crate::CapabilitySnapshot).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Name the transport dispatches on.
    pub name: String,
    /// Human-readable description, shown to the reasoning loop.
    pub description: String,
    /// JSON Schema for the tool's input, if the server provided one.
    /// Informational only; arguments are forwarded without validation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<Value>,
}

impl ToolDescriptor {
    /// Create a descriptor from explicit parts.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: None,
        }
    }

    /// Normalize one raw listing entry into a descriptor.
    ///
    /// Objects carrying a string `name` map directly; the schema is read
    /// from either `input_schema` or the wire-cased `inputSchema`. Any
    /// other shape becomes a descriptor named after the value's string
    /// representation.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        if let Some(obj) = value.as_object() {
            if let Some(name) = obj.get("name").and_then(Value::as_str) {
                let description = obj
                    .get("description")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("MCP tool: {name}"));
                let input_schema = obj
                    .get("input_schema")
                    .or_else(|| obj.get("inputSchema"))
                    .filter(|v| !v.is_null())
                    .cloned();
                return Self {
                    name: name.to_string(),
                    description,
                    input_schema,
                };
            }
        }
        let name = fallback_repr(value);
        Self {
            description: format!("MCP tool: {name}"),
            name,
            input_schema: None,
        }
    }
}

/// A resource advertised by a remote MCP server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    /// URI the resource is read by. Unique within a snapshot.
    pub uri: String,
    /// Display name; defaults to the URI.
    pub name: String,
    /// Human-readable description; may be empty.
    pub description: String,
    /// MIME type, if the server provided one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl ResourceDescriptor {
    /// Normalize one raw listing entry into a descriptor.
    ///
    /// Objects carrying a string `uri` map directly; anything else is
    /// coerced via its string representation.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        if let Some(obj) = value.as_object() {
            if let Some(uri) = obj.get("uri").and_then(Value::as_str) {
                let name = obj
                    .get("name")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| uri.to_string());
                let description = obj
                    .get("description")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                let mime_type = obj
                    .get("mime_type")
                    .or_else(|| obj.get("mimeType"))
                    .and_then(Value::as_str)
                    .map(str::to_string);
                return Self {
                    uri: uri.to_string(),
                    name,
                    description,
                    mime_type,
                };
            }
        }
        let repr = fallback_repr(value);
        Self {
            uri: repr.clone(),
            name: repr,
            description: String::new(),
            mime_type: None,
        }
    }
}

/// A prompt template advertised by a remote MCP server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptDescriptor {
    /// Prompt name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Declared prompt arguments, passed through as-is.
    #[serde(default)]
    pub arguments: Vec<Value>,
}

impl PromptDescriptor {
    /// Normalize one raw listing entry into a descriptor.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        if let Some(obj) = value.as_object() {
            if let Some(name) = obj.get("name").and_then(Value::as_str) {
                let description = obj
                    .get("description")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("MCP prompt: {name}"));
                let arguments = obj
                    .get("arguments")
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default();
                return Self {
                    name: name.to_string(),
                    description,
                    arguments,
                };
            }
        }
        let name = fallback_repr(value);
        Self {
            description: format!("MCP prompt: {name}"),
            name,
            arguments: Vec::new(),
        }
    }
}

/// String representation used when an entry has no recognizable shape.
///
/// Bare strings keep their content; everything else uses its JSON
/// rendering so the entry stays identifiable in logs and catalogs.
fn fallback_repr(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
