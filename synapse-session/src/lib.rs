#![deny(missing_docs)]
//! Session facade for the synapse bridge.
//!
//! A [`Session`] ties one transport, one capability snapshot, and one
//! optional reasoner into the surface the web layer calls:
//! initialize, query, stream, call a tool directly, read a resource,
//! clean up.
//!
//! Tool invocation is gated twice. The reasoner can only select tools that
//! exist because its configured set is exactly the current snapshot; the
//! [`DispatchGate`] re-checks existence for direct callers and never
//! forwards an unknown name to the transport.
//!
//! One session is single-writer: discovery and dispatch take `&mut self` /
//! `&self` on the same value, so cross-task sharing goes through the
//! per-session mutex in [`SessionStore`]. Independent sessions are fully
//! isolated from one another.

pub mod gate;
pub mod session;
pub mod state;
pub mod store;

pub use gate::DispatchGate;
pub use session::{Session, SessionConfig, SessionError, SessionStream};
pub use state::SessionState;
pub use store::SessionStore;
