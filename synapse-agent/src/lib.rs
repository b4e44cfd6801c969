#![deny(missing_docs)]
//! The reasoning-capability boundary.
//!
//! The bridge does not implement an LLM loop; it configures one. A
//! [`Reasoner`] is the external decision-maker that, per user message,
//! chooses between answering directly and invoking one of the
//! [`SessionTool`]s it was configured with. The session facade builds a
//! [`ReasonerSetup`] from each capability snapshot and hands it over; which
//! backend sits behind the trait (a hosted model, a local one, a scripted
//! test double) is a deployment concern.
//!
//! Streaming contract: [`Reasoner::respond_streaming`] returns a lazy,
//! finite, non-restartable fragment sequence. Implementations convert their
//! internal failures into a terminal
//! [`StreamFragment::Error`](synapse_types::StreamFragment) instead of
//! panicking out of the stream.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::stream::BoxStream;

use synapse_types::{SessionTool, StreamFragment};

pub mod directive;
pub mod error;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use directive::default_directive;
pub use error::ReasonerError;

/// Step bound applied when the caller does not set one.
pub const DEFAULT_MAX_STEPS: u32 = 10;

/// A lazy sequence of response fragments.
pub type ReasonerStream = BoxStream<'static, StreamFragment>;

/// Everything a reasoner is (re-)configured with.
///
/// Built wholesale from one capability snapshot; a reconfiguration replaces
/// the previous tool set, it never extends it.
#[derive(Clone)]
pub struct ReasonerSetup {
    /// Tools the reasoner may select from, in catalog order.
    pub tools: Vec<Arc<dyn SessionTool>>,
    /// Behavioral directive. Must instruct the reasoner to invoke tools
    /// only when the user's request requires the corresponding action.
    pub directive: String,
    /// Upper bound on reasoning steps per response.
    pub max_steps: u32,
}

impl ReasonerSetup {
    /// Setup with the default step bound.
    #[must_use]
    pub fn new(tools: Vec<Arc<dyn SessionTool>>, directive: impl Into<String>) -> Self {
        Self {
            tools,
            directive: directive.into(),
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    /// Override the step bound.
    #[must_use]
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// A tool-less setup, used as the fallback configuration.
    #[must_use]
    pub fn without_tools() -> Self {
        Self::new(Vec::new(), default_directive(&[]))
    }
}

impl std::fmt::Debug for ReasonerSetup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReasonerSetup")
            .field(
                "tools",
                &self.tools.iter().map(|t| t.name()).collect::<Vec<_>>(),
            )
            .field("directive", &self.directive)
            .field("max_steps", &self.max_steps)
            .finish()
    }
}

/// The external reasoning loop behind an object-safe boundary.
#[async_trait]
pub trait Reasoner: Send + Sync {
    /// Replace the reasoner's tool set, directive, and step bound.
    async fn configure(&mut self, setup: ReasonerSetup) -> Result<(), ReasonerError>;

    /// Produce a complete textual response to one user message.
    ///
    /// The reasoner may invoke zero or more configured tools first.
    async fn respond(&self, message: &str) -> Result<String, ReasonerError>;

    /// Produce the response as a lazy fragment stream.
    ///
    /// The stream is finite and non-restartable; failures surface as a
    /// terminal error fragment, never as a panic out of the sequence.
    fn respond_streaming(&self, message: &str) -> ReasonerStream;
}
