//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the controller with mock implementations.

use crate::state_machine::{Keyboard, OrderState, UserId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Outbound send failure. The controller logs these and moves on; a
/// failed send is not distinguished from a successful one in the state
/// machine's view.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct GatewayError {
    pub message: String,
}

impl GatewayError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Storage for per-user conversation state.
///
/// Cross-user entries are independent; implementations only need to
/// serialize access per key.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Get the current state for a user, `OrderState::Idle` if none.
    async fn load(&self, user: UserId) -> OrderState;

    /// Replace the state for a user.
    async fn save(&self, user: UserId, state: OrderState);

    /// Drop the session entry for a user, if any.
    async fn remove(&self, user: UserId);
}

/// Outbound reply channel to the messaging platform.
#[async_trait]
pub trait MessagingGateway: Send + Sync {
    /// Send a text reply, optionally with a reply keyboard, optionally
    /// rendered as Markdown. Fire-and-forget: no retry semantics.
    async fn send_text(
        &self,
        user: UserId,
        body: &str,
        keyboard: Option<&Keyboard>,
        markdown: bool,
    ) -> Result<(), GatewayError>;
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    async fn load(&self, user: UserId) -> OrderState {
        (**self).load(user).await
    }

    async fn save(&self, user: UserId, state: OrderState) {
        (**self).save(user, state).await;
    }

    async fn remove(&self, user: UserId) {
        (**self).remove(user).await;
    }
}

#[async_trait]
impl<T: MessagingGateway + ?Sized> MessagingGateway for Arc<T> {
    async fn send_text(
        &self,
        user: UserId,
        body: &str,
        keyboard: Option<&Keyboard>,
        markdown: bool,
    ) -> Result<(), GatewayError> {
        (**self).send_text(user, body, keyboard, markdown).await
    }
}

// ============================================================================
// Production store
// ============================================================================

/// Process-wide in-memory session map. No expiry: an abandoned mid-flow
/// session stays until the next /start or /cancel for that user.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<UserId, OrderState>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A poisoned lock only means another handler panicked mid-insert;
    /// the map itself is still usable.
    fn sessions(&self) -> std::sync::MutexGuard<'_, HashMap<UserId, OrderState>> {
        self.sessions
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, user: UserId) -> OrderState {
        self.sessions().get(&user).cloned().unwrap_or_default()
    }

    async fn save(&self, user: UserId, state: OrderState) {
        self.sessions().insert(user, state);
    }

    async fn remove(&self, user: UserId) {
        self.sessions().remove(&user);
    }
}
