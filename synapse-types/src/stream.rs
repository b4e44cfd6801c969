//! Incremental response fragments.

use serde::{Deserialize, Serialize};

/// One unit of a streamed response.
///
/// Fragments are independently serializable so the web layer can forward
/// each one as a server-sent event without buffering. A stream is finite
/// and non-restartable; an `Error` fragment is always the last element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamFragment {
    /// Incremental text content.
    Text {
        /// The text delta.
        text: String,
    },
    /// The stream failed; no further fragments follow.
    Error {
        /// Failure description.
        message: String,
    },
}

impl StreamFragment {
    /// Build a text fragment.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Build an error fragment.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Whether this fragment terminates the stream with a failure.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_fragment_serializes_tagged() {
        let json = serde_json::to_value(StreamFragment::text("hel")).unwrap();
        assert_eq!(json, serde_json::json!({"type": "text", "text": "hel"}));
    }

    #[test]
    fn error_fragment_serializes_tagged() {
        let json = serde_json::to_value(StreamFragment::error("backend died")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "error", "message": "backend died"})
        );
    }

    #[test]
    fn is_error_discriminates() {
        assert!(!StreamFragment::text("x").is_error());
        assert!(StreamFragment::error("x").is_error());
    }
}
