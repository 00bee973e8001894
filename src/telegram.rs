//! Telegram transport adapter
//!
//! Decodes inbound updates into conversation events, renders outbound
//! effects as Telegram messages, and provides the dispatcher handler
//! tree. Everything platform-specific lives here; the state machine
//! never sees a teloxide type.

use crate::runtime::{GatewayError, InMemorySessionStore, MessagingGateway, OrderController};
use crate::state_machine::{Event, Keyboard, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::dptree;
use teloxide::prelude::*;
use teloxide::types::{ChatId, KeyboardButton, KeyboardMarkup as ReplyKeyboardMarkup, Message, ParseMode};
use teloxide::utils::command::BotCommands;
use thiserror::Error;

pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Controller wired to the production store and the Telegram gateway.
pub type BotController = OrderController<InMemorySessionStore, TelegramGateway>;

/// Commands this bot recognizes. Anything else falls through to the
/// dispatcher's default handler.
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    /// Begin or restart an order.
    Start,
    /// Abandon the current order.
    Cancel,
}

/// Inbound messages that cannot be attributed to a user. Logged and
/// discarded: without a sender identity there is no session to act on.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("message has no sender identity")]
    MissingSender,
}

fn sender(msg: &Message) -> Result<UserId, DecodeError> {
    msg.from
        .as_ref()
        .map(|user| UserId(user.id.0))
        .ok_or(DecodeError::MissingSender)
}

/// The bot's handler tree: commands first, then plain text replies.
/// Non-text messages and unrecognized commands fall through untouched.
pub fn schema() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(handle_command),
        )
        .branch(
            dptree::filter_map(|msg: Message| {
                msg.text()
                    .filter(|text| !text.starts_with('/'))
                    .map(ToOwned::to_owned)
            })
            .endpoint(handle_text),
        )
}

async fn handle_command(
    msg: Message,
    command: Command,
    controller: Arc<BotController>,
) -> HandlerResult {
    let user = match sender(&msg) {
        Ok(user) => user,
        Err(error) => {
            tracing::error!(%error, chat = %msg.chat.id, "dropping malformed update");
            return Ok(());
        }
    };
    let event = match command {
        Command::Start => Event::Start,
        Command::Cancel => Event::Cancel,
    };
    controller.handle_event(user, event).await;
    Ok(())
}

async fn handle_text(
    msg: Message,
    text: String,
    controller: Arc<BotController>,
) -> HandlerResult {
    let user = match sender(&msg) {
        Ok(user) => user,
        Err(error) => {
            tracing::error!(%error, chat = %msg.chat.id, "dropping malformed update");
            return Ok(());
        }
    };
    controller.handle_event(user, Event::Message { text }).await;
    Ok(())
}

/// Outbound side: renders effects as Telegram sendMessage calls.
pub struct TelegramGateway {
    bot: Bot,
}

impl TelegramGateway {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

/// One option per row, single-use, auto-resizing.
fn reply_keyboard(keyboard: &Keyboard) -> ReplyKeyboardMarkup {
    let rows = keyboard
        .options
        .iter()
        .map(|option| vec![KeyboardButton::new(option.clone())]);
    let mut markup = ReplyKeyboardMarkup::new(rows);
    markup.resize_keyboard = true;
    markup.one_time_keyboard = true;
    markup
}

#[async_trait]
impl MessagingGateway for TelegramGateway {
    async fn send_text(
        &self,
        user: UserId,
        body: &str,
        keyboard: Option<&Keyboard>,
        markdown: bool,
    ) -> Result<(), GatewayError> {
        // Orders are taken in private chats, where the chat id is the
        // user id.
        let chat = ChatId(
            i64::try_from(user.0)
                .map_err(|_| GatewayError::new("user id exceeds the chat id range"))?,
        );
        let mut request = self.bot.send_message(chat, body);
        if markdown {
            request = request.parse_mode(ParseMode::Markdown);
        }
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(reply_keyboard(keyboard));
        }
        request
            .await
            .map(|_| ())
            .map_err(|error| GatewayError::new(error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_and_cancel_parse_as_commands() {
        assert!(matches!(
            Command::parse("/start", "kioskas"),
            Ok(Command::Start)
        ));
        assert!(matches!(
            Command::parse("/cancel", "kioskas"),
            Ok(Command::Cancel)
        ));
        assert!(Command::parse("/help", "kioskas").is_err());
    }

    #[test]
    fn keyboards_render_one_option_per_row() {
        let markup = reply_keyboard(&Keyboard::new(["🏙️ Vilnius", "🏙️ Kaunas"]));
        assert_eq!(markup.keyboard.len(), 2);
        assert_eq!(markup.keyboard[0].len(), 1);
        assert_eq!(markup.keyboard[0][0].text, "🏙️ Vilnius");
        assert_eq!(markup.keyboard[1][0].text, "🏙️ Kaunas");
        assert!(markup.resize_keyboard);
        assert!(markup.one_time_keyboard);
    }
}
