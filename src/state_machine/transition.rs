//! Pure state transition function

use super::{Effect, Event, Order, OrderState};
use crate::catalog::Catalog;
use crate::texts;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: OrderState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: OrderState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Pure transition function.
///
/// Given the same state, catalog, and event it always produces the same
/// result; all I/O happens afterwards when the effects are executed.
///
/// City and quantity accept arbitrary text (the keyboard constrains
/// honest clients, the machine does not re-validate). Product is the one
/// strictly validated step: the quantity option set is derived from the
/// matched catalog entry, so an unmatched product would leave the next
/// step without options.
pub fn transition(state: &OrderState, catalog: &Catalog, event: Event) -> TransitionResult {
    match (state, event) {
        // /start resets the session from any state, including terminal ones.
        (_, Event::Start) => TransitionResult::new(OrderState::AwaitingCity)
            .with_effect(Effect::prompt(texts::CITY_PROMPT, texts::CITY_OPTIONS.iter().copied())),

        // /cancel is valid from any state and needs no prior session.
        (_, Event::Cancel) => TransitionResult::new(OrderState::Cancelled)
            .with_effect(Effect::notice(texts::CANCELLED)),

        // City: stored as given, no validation.
        (OrderState::AwaitingCity, Event::Message { text }) => {
            TransitionResult::new(OrderState::AwaitingProduct { city: text })
                .with_effect(Effect::prompt(texts::PRODUCT_PROMPT, catalog.labels()))
        }

        // Product: the validated step. Failures re-enter, keeping the city.
        (OrderState::AwaitingProduct { city }, Event::Message { text }) => {
            if text.is_empty() {
                return TransitionResult::new(OrderState::AwaitingProduct { city: city.clone() })
                    .with_effect(Effect::notice(texts::MISSING_PRODUCT));
            }
            match catalog.match_product(&text) {
                Some(entry) => TransitionResult::new(OrderState::AwaitingQuantity {
                    city: city.clone(),
                    product: text,
                })
                .with_effect(Effect::prompt(
                    texts::QUANTITY_PROMPT,
                    entry.quantities.iter().copied(),
                )),
                None => TransitionResult::new(OrderState::AwaitingProduct { city: city.clone() })
                    .with_effect(Effect::notice(texts::UNKNOWN_PRODUCT)),
            }
        }

        // Quantity: stored as given, then the summary closes the flow.
        (OrderState::AwaitingQuantity { city, product }, Event::Message { text }) => {
            let order = Order {
                city: city.clone(),
                product: product.clone(),
                quantity: text,
            };
            let summary = texts::order_summary(&order);
            TransitionResult::new(OrderState::Completed { order })
                .with_effect(Effect::markdown(summary))
        }

        // Text outside a conversation is ignored.
        (
            OrderState::Idle | OrderState::Completed { .. } | OrderState::Cancelled,
            Event::Message { .. },
        ) => TransitionResult::new(state.clone()),
    }
}
