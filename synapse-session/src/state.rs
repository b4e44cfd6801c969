//! Session lifecycle states.

use std::fmt;

/// Where a session is in its lifecycle.
///
/// `Uninitialized → Discovering → Ready`, with `Discovering` re-entered on
/// explicit re-initialization. `Discovering` reaches `Ready` even when
/// discovery failed (degraded snapshot, empty tool set); there is no
/// permanent error state, failures stay recoverable by re-running
/// discovery. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No discovery has run yet.
    Uninitialized,
    /// Discovery is in flight.
    Discovering,
    /// The session answers queries and dispatches tools.
    Ready,
    /// The transport has been released. Terminal.
    Closed,
}

impl SessionState {
    /// Whether operations may still touch the transport.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Whether the session has a current snapshot to serve from.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Discovering => "discovering",
            Self::Ready => "ready",
            Self::Closed => "closed",
        };
        f.write_str(name)
    }
}
