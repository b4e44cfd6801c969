//! Per-call outcome types, shaped for direct serialization to the web layer.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of one gated tool invocation.
///
/// `result` and `error` are mutually exclusive; the constructors are the
/// only way this type is built, so a result never carries both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallResult {
    /// Whether the call reached the transport and came back cleanly.
    pub success: bool,
    /// Name the caller asked for, echoed back verbatim.
    pub tool_name: String,
    /// Raw transport result, present only on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Failure description, present only on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolCallResult {
    /// A successful call carrying the transport's raw result.
    #[must_use]
    pub fn ok(tool_name: impl Into<String>, result: Value) -> Self {
        Self {
            success: true,
            tool_name: tool_name.into(),
            result: Some(result),
            error: None,
        }
    }

    /// A failed call carrying the failure text.
    #[must_use]
    pub fn err(tool_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            tool_name: tool_name.into(),
            result: None,
            error: Some(error.into()),
        }
    }
}

/// Outcome of one resource read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceReadResult {
    /// Whether the read succeeded.
    pub success: bool,
    /// URI the caller asked for, echoed back verbatim.
    pub uri: String,
    /// Resource content, present only on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
    /// Failure description, present only on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResourceReadResult {
    /// A successful read carrying the resource content.
    #[must_use]
    pub fn ok(uri: impl Into<String>, content: Value) -> Self {
        Self {
            success: true,
            uri: uri.into(),
            content: Some(content),
            error: None,
        }
    }

    /// A failed read carrying the failure text.
    #[must_use]
    pub fn err(uri: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            uri: uri.into(),
            content: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_never_carries_error() {
        let res = ToolCallResult::ok("speak", json!({"url": "https://x/y.mp3"}));
        assert!(res.success);
        assert_eq!(res.tool_name, "speak");
        assert!(res.result.is_some());
        assert!(res.error.is_none());
    }

    #[test]
    fn err_never_carries_result() {
        let res = ToolCallResult::err("speak", "server unreachable");
        assert!(!res.success);
        assert!(res.result.is_none());
        assert_eq!(res.error.as_deref(), Some("server unreachable"));
    }

    #[test]
    fn absent_fields_are_skipped_in_serialization() {
        let json = serde_json::to_value(ToolCallResult::err("t", "nope")).unwrap();
        assert!(json.get("result").is_none());
        assert_eq!(
            json,
            serde_json::json!({"success": false, "tool_name": "t", "error": "nope"})
        );
    }

    #[test]
    fn resource_read_result_constructors() {
        let ok = ResourceReadResult::ok("mem://x", json!("data"));
        assert!(ok.success && ok.error.is_none());
        let err = ResourceReadResult::err("mem://x", "gone");
        assert!(!err.success && err.content.is_none());
    }
}
