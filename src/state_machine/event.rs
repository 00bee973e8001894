//! Events that can occur in a conversation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque user identity. Sessions are keyed by this; two users never
/// share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inbound events that trigger state transitions.
///
/// Each variant carries only fields that are guaranteed present, so the
/// transition function never null-checks. The user identity is routed
/// separately by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The /start command: begin (or restart) an order.
    Start,

    /// The /cancel command: abandon the order from any state.
    Cancel,

    /// A plain text reply.
    Message { text: String },
}
