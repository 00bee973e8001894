//! Mock implementations for testing
//!
//! These mocks enable integration testing without real I/O.

use super::traits::{GatewayError, MessagingGateway};
use crate::state_machine::{Keyboard, UserId};
use async_trait::async_trait;
use std::sync::Mutex;

/// A reply recorded by [`MockGateway`].
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub user: UserId,
    pub body: String,
    pub keyboard: Option<Keyboard>,
    pub markdown: bool,
}

/// Mock gateway that records every outbound reply.
#[derive(Default)]
pub struct MockGateway {
    sent: Mutex<Vec<SentMessage>>,
    fail_sends: bool,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway whose every send fails, for delivery-failure tests.
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_sends: true,
        }
    }

    /// Get all recorded replies in send order.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// Body of the most recent reply, if any.
    pub fn last_body(&self) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .last()
            .map(|message| message.body.clone())
    }
}

#[async_trait]
impl MessagingGateway for MockGateway {
    async fn send_text(
        &self,
        user: UserId,
        body: &str,
        keyboard: Option<&Keyboard>,
        markdown: bool,
    ) -> Result<(), GatewayError> {
        self.sent.lock().unwrap().push(SentMessage {
            user,
            body: body.to_string(),
            keyboard: keyboard.cloned(),
            markdown,
        });
        if self.fail_sends {
            return Err(GatewayError::new("mock delivery failure"));
        }
        Ok(())
    }
}
