//! kioskas - Telegram order-taking bot
//!
//! Walks a user through city, product, and quantity selection, then
//! presents a payment address. The conversation logic is a pure state
//! machine; this binary wires it to Telegram long polling.

mod catalog;
mod config;
mod runtime;
mod state_machine;
mod telegram;
mod texts;

use catalog::Catalog;
use config::Config;
use runtime::{InMemorySessionStore, OrderController};
use std::sync::Arc;
use telegram::{BotController, TelegramGateway};
use teloxide::dptree;
use teloxide::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kioskas=info,teloxide=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Configuration: a missing token is fatal.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(%error, "startup failed");
            return Err(error.into());
        }
    };

    tracing::info!("Starting Telegram order bot");
    let bot = Bot::new(config.bot_token);

    let controller: Arc<BotController> = Arc::new(OrderController::new(
        InMemorySessionStore::new(),
        TelegramGateway::new(bot.clone()),
        Catalog::builtin(),
    ));

    tracing::info!("Handlers registered, starting long polling");
    Dispatcher::builder(bot, telegram::schema())
        .dependencies(dptree::deps![controller])
        .default_handler(|update| async move {
            tracing::debug!(update_id = ?update.id, "unhandled update");
        })
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
