//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::state::*;
use super::transition::*;
use super::{Effect, Event};
use crate::catalog::Catalog;
use crate::texts;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ėų]{0,30}"
}

fn arb_order() -> impl Strategy<Value = Order> {
    (arb_text(), arb_text(), arb_text()).prop_map(|(city, product, quantity)| Order {
        city,
        product,
        quantity,
    })
}

fn arb_state() -> impl Strategy<Value = OrderState> {
    prop_oneof![
        Just(OrderState::Idle),
        Just(OrderState::AwaitingCity),
        arb_text().prop_map(|city| OrderState::AwaitingProduct { city }),
        (arb_text(), arb_text())
            .prop_map(|(city, product)| OrderState::AwaitingQuantity { city, product }),
        arb_order().prop_map(|order| OrderState::Completed { order }),
        Just(OrderState::Cancelled),
    ]
}

/// Free text that mentions a catalog key about half the time, so the
/// matching branch actually gets exercised.
fn arb_product_text() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_text(),
        (
            arb_text(),
            prop_oneof![Just("Product A"), Just("Product B"), Just("Product C")],
            arb_text(),
        )
            .prop_map(|(pre, key, post)| format!("{pre}{key}{post}")),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        Just(Event::Start),
        Just(Event::Cancel),
        arb_text().prop_map(|text| Event::Message { text }),
    ]
}

fn catalog() -> Catalog {
    Catalog::builtin()
}

fn summary_sent(effects: &[Effect]) -> bool {
    effects.iter().any(|effect| {
        let Effect::SendText { body, .. } = effect;
        body.contains(texts::PAYMENT_ADDRESS)
    })
}

// ============================================================================
// Invariants
// ============================================================================

proptest! {
    /// /start resets to AwaitingCity from any prior state and always
    /// offers the same city keyboard.
    #[test]
    fn start_always_resets(state in arb_state()) {
        let result = transition(&state, &catalog(), Event::Start);
        prop_assert_eq!(&result.new_state, &OrderState::AwaitingCity);
        prop_assert_eq!(result.effects.len(), 1);
        let Effect::SendText { body, keyboard, .. } = &result.effects[0];
        prop_assert_eq!(body.as_str(), texts::CITY_PROMPT);
        prop_assert_eq!(&keyboard.as_ref().unwrap().options, texts::CITY_OPTIONS);
    }

    /// /cancel is terminal from any state and never emits a summary.
    #[test]
    fn cancel_always_terminal_never_summarizes(state in arb_state()) {
        let result = transition(&state, &catalog(), Event::Cancel);
        prop_assert_eq!(&result.new_state, &OrderState::Cancelled);
        prop_assert!(!summary_sent(&result.effects));
    }

    /// The transition function is pure: applying the same event to the
    /// same state twice gives identical results.
    #[test]
    fn transition_is_deterministic(state in arb_state(), event in arb_event()) {
        let a = transition(&state, &catalog(), event.clone());
        let b = transition(&state, &catalog(), event);
        prop_assert_eq!(a.new_state, b.new_state);
        prop_assert_eq!(a.effects, b.effects);
    }

    /// Any city text is accepted verbatim.
    #[test]
    fn city_is_stored_verbatim(text in arb_text()) {
        let result = transition(
            &OrderState::AwaitingCity,
            &catalog(),
            Event::Message { text: text.clone() },
        );
        prop_assert_eq!(result.new_state, OrderState::AwaitingProduct { city: text });
    }

    /// Product matching agrees with a naive first-match scan over the
    /// catalog order, and the offered quantities come from that entry.
    #[test]
    fn product_match_is_first_wins(city in arb_text(), text in arb_product_text()) {
        let catalog = catalog();
        let state = OrderState::AwaitingProduct { city: city.clone() };
        let result = transition(&state, &catalog, Event::Message { text: text.clone() });

        let expected = ["Product A", "Product B", "Product C"]
            .iter()
            .find(|key| text.contains(*key));

        match (expected, &result.new_state) {
            (Some(_), OrderState::AwaitingQuantity { product, .. }) => {
                prop_assert_eq!(product, &text);
                let entry = catalog.match_product(&text).unwrap();
                let Effect::SendText { keyboard, .. } = &result.effects[0];
                prop_assert_eq!(&keyboard.as_ref().unwrap().options, entry.quantities);
            }
            (None, OrderState::AwaitingProduct { city: kept }) => {
                prop_assert_eq!(kept, &city);
            }
            (expected, got) => {
                prop_assert!(false, "expected match {:?}, got state {:?}", expected, got);
            }
        }
    }

    /// Any quantity text completes the order, and the summary carries
    /// every collected field.
    #[test]
    fn quantity_always_completes(city in arb_text(), product in arb_text(), qty in arb_text()) {
        let state = OrderState::AwaitingQuantity {
            city: city.clone(),
            product: product.clone(),
        };
        let result = transition(&state, &catalog(), Event::Message { text: qty.clone() });
        match &result.new_state {
            OrderState::Completed { order } => {
                prop_assert_eq!(&order.city, &city);
                prop_assert_eq!(&order.product, &product);
                prop_assert_eq!(&order.quantity, &qty);
                prop_assert!(summary_sent(&result.effects));
            }
            other => prop_assert!(false, "expected Completed, got {:?}", other),
        }
    }

    /// Text outside a conversation changes nothing and sends nothing.
    #[test]
    fn text_when_not_in_conversation_is_inert(order in arb_order(), text in arb_text()) {
        for state in [
            OrderState::Idle,
            OrderState::Completed { order: order.clone() },
            OrderState::Cancelled,
        ] {
            let result = transition(&state, &catalog(), Event::Message { text: text.clone() });
            prop_assert_eq!(result.new_state, state);
            prop_assert!(result.effects.is_empty());
        }
    }
}
