//! Order conversation controller
//!
//! Processes one inbound event at a time: load the session, run the
//! pure transition, commit the new state, then execute the effects.

use super::traits::{MessagingGateway, SessionStore};
use crate::catalog::Catalog;
use crate::state_machine::{transition, Effect, Event, OrderState, UserId};

/// Generic controller that can work with any session store and gateway
/// implementations.
pub struct OrderController<S, G>
where
    S: SessionStore,
    G: MessagingGateway,
{
    store: S,
    gateway: G,
    catalog: Catalog,
}

impl<S, G> OrderController<S, G>
where
    S: SessionStore,
    G: MessagingGateway,
{
    pub fn new(store: S, gateway: G, catalog: Catalog) -> Self {
        Self {
            store,
            gateway,
            catalog,
        }
    }

    /// Process one inbound event for a user to completion.
    ///
    /// The state is committed before any reply is sent, so a slow or
    /// failed delivery never leaves the session behind the conversation.
    pub async fn handle_event(&self, user: UserId, event: Event) {
        let state = self.store.load(user).await;
        let result = transition(&state, &self.catalog, event);

        if result.new_state == state && result.effects.is_empty() {
            tracing::debug!(%user, ?state, "ignoring event outside a conversation");
            return;
        }

        match &result.new_state {
            // Cancellation abandons the partial session entirely; the
            // next event for this user starts from Idle.
            OrderState::Cancelled => self.store.remove(user).await,
            new_state => self.store.save(user, new_state.clone()).await,
        }
        tracing::debug!(%user, new_state = ?result.new_state, "session advanced");

        for effect in result.effects {
            self.execute_effect(user, effect).await;
        }
    }

    async fn execute_effect(&self, user: UserId, effect: Effect) {
        match effect {
            Effect::SendText {
                body,
                keyboard,
                markdown,
            } => {
                // Fire-and-forget: a failed delivery is logged and the
                // session keeps its committed state.
                if let Err(error) = self
                    .gateway
                    .send_text(user, &body, keyboard.as_ref(), markdown)
                    .await
                {
                    tracing::warn!(%user, %error, "failed to deliver reply");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::testing::MockGateway;
    use crate::runtime::InMemorySessionStore;
    use crate::texts;
    use std::sync::Arc;

    type TestController = OrderController<Arc<InMemorySessionStore>, Arc<MockGateway>>;

    fn controller() -> (TestController, Arc<InMemorySessionStore>, Arc<MockGateway>) {
        let store = Arc::new(InMemorySessionStore::new());
        let gateway = Arc::new(MockGateway::new());
        let controller =
            OrderController::new(store.clone(), gateway.clone(), Catalog::builtin());
        (controller, store, gateway)
    }

    fn msg(text: &str) -> Event {
        Event::Message {
            text: text.to_string(),
        }
    }

    const USER: UserId = UserId(7);

    #[tokio::test]
    async fn full_flow_produces_summary() {
        let (controller, store, gateway) = controller();

        controller.handle_event(USER, Event::Start).await;
        controller.handle_event(USER, msg("🏙️ Vilnius")).await;
        controller.handle_event(USER, msg("☘️ Product A")).await;
        controller.handle_event(USER, msg("5")).await;

        let sent = gateway.sent();
        assert_eq!(sent.len(), 4);
        assert_eq!(sent[0].body, texts::CITY_PROMPT);
        assert_eq!(sent[1].body, texts::PRODUCT_PROMPT);
        assert_eq!(sent[2].body, texts::QUANTITY_PROMPT);
        assert_eq!(
            sent[2].keyboard.as_ref().unwrap().options,
            vec!["2", "5", "10"]
        );

        let summary = &sent[3];
        assert!(summary.markdown);
        assert!(summary.body.contains("Miestas: 🏙️ Vilnius"));
        assert!(summary.body.contains("Produktas: ☘️ Product A"));
        assert!(summary.body.contains("Kiekis: 5"));
        assert!(summary.body.contains(texts::PAYMENT_ADDRESS));

        // Completed sessions stay in the store.
        assert!(matches!(
            store.load(USER).await,
            OrderState::Completed { .. }
        ));
    }

    #[tokio::test]
    async fn empty_product_choice_reprompts() {
        let (controller, store, gateway) = controller();

        controller.handle_event(USER, Event::Start).await;
        controller.handle_event(USER, msg("🏙️ Kaunas")).await;
        controller.handle_event(USER, msg("")).await;

        assert_eq!(gateway.last_body().unwrap(), texts::MISSING_PRODUCT);
        assert_eq!(
            store.load(USER).await,
            OrderState::AwaitingProduct {
                city: "🏙️ Kaunas".to_string()
            }
        );
    }

    #[tokio::test]
    async fn unknown_product_reprompts() {
        let (controller, store, gateway) = controller();

        controller.handle_event(USER, Event::Start).await;
        controller.handle_event(USER, msg("🏙️ Klaipėda")).await;
        controller.handle_event(USER, msg("Unknown Thing")).await;

        assert_eq!(gateway.last_body().unwrap(), texts::UNKNOWN_PRODUCT);
        assert_eq!(
            store.load(USER).await,
            OrderState::AwaitingProduct {
                city: "🏙️ Klaipėda".to_string()
            }
        );
    }

    #[tokio::test]
    async fn cancel_without_prior_session_still_acknowledges() {
        let (controller, store, gateway) = controller();

        controller.handle_event(USER, Event::Cancel).await;

        assert_eq!(gateway.last_body().unwrap(), texts::CANCELLED);
        assert_eq!(store.load(USER).await, OrderState::Idle);
    }

    #[tokio::test]
    async fn cancel_mid_flow_abandons_the_session() {
        let (controller, store, gateway) = controller();

        controller.handle_event(USER, Event::Start).await;
        controller.handle_event(USER, msg("🏙️ Vilnius")).await;
        controller.handle_event(USER, Event::Cancel).await;

        assert_eq!(gateway.last_body().unwrap(), texts::CANCELLED);
        // The entry is gone: the next event sees Idle.
        assert_eq!(store.load(USER).await, OrderState::Idle);

        // And a later text does nothing.
        controller.handle_event(USER, msg("☘️ Product A")).await;
        assert_eq!(gateway.sent().len(), 3);
    }

    #[tokio::test]
    async fn start_resets_a_session_mid_flow() {
        let (controller, store, gateway) = controller();

        controller.handle_event(USER, Event::Start).await;
        controller.handle_event(USER, msg("🏙️ Kaunas")).await;
        controller.handle_event(USER, Event::Start).await;

        assert_eq!(store.load(USER).await, OrderState::AwaitingCity);
        assert_eq!(gateway.last_body().unwrap(), texts::CITY_PROMPT);
    }

    #[tokio::test]
    async fn sessions_are_independent_per_user() {
        let (controller, store, gateway) = controller();
        let other = UserId(8);

        controller.handle_event(USER, Event::Start).await;
        controller.handle_event(other, Event::Start).await;
        controller.handle_event(USER, msg("🏙️ Vilnius")).await;

        assert_eq!(
            store.load(USER).await,
            OrderState::AwaitingProduct {
                city: "🏙️ Vilnius".to_string()
            }
        );
        assert_eq!(store.load(other).await, OrderState::AwaitingCity);

        // Replies are routed to the user whose event triggered them.
        let sent = gateway.sent();
        assert_eq!(sent[1].user, other);
        assert_eq!(sent[2].user, USER);
    }

    #[tokio::test]
    async fn failed_send_does_not_roll_back_the_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let gateway = Arc::new(MockGateway::failing());
        let controller =
            OrderController::new(store.clone(), gateway.clone(), Catalog::builtin());

        controller.handle_event(USER, Event::Start).await;

        assert_eq!(store.load(USER).await, OrderState::AwaitingCity);
    }
}
