//! Conversation state types

use serde::{Deserialize, Serialize};

/// A completed order, ready to be summarized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub city: String,
    pub product: String,
    pub quantity: String,
}

/// Per-user conversation state.
///
/// Each variant carries exactly the data collected up to that step, so a
/// session can never hold a product without a city or a quantity without
/// a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrderState {
    /// No conversation in progress.
    #[default]
    Idle,

    /// Waiting for the user to pick a city.
    AwaitingCity,

    /// City stored, waiting for a product choice.
    AwaitingProduct { city: String },

    /// City and product stored, waiting for a quantity.
    AwaitingQuantity { city: String, product: String },

    /// Order summary sent. The session is retained but inert.
    Completed { order: Order },

    /// Conversation aborted via /cancel; partial data abandoned.
    Cancelled,
}

impl OrderState {
    /// Check if this is a terminal state (only /start leaves it).
    #[allow(dead_code)] // Useful for tests
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderState::Completed { .. } | OrderState::Cancelled)
    }

    /// Check if an order flow is mid-conversation.
    #[allow(dead_code)] // State query utility
    pub fn in_conversation(&self) -> bool {
        matches!(
            self,
            OrderState::AwaitingCity
                | OrderState::AwaitingProduct { .. }
                | OrderState::AwaitingQuantity { .. }
        )
    }
}
