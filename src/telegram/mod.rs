//! Long-polling adapter between the Bot API and the transport-agnostic chat
//! core: updates become [`Inbound`] events, [`Reply`] values become
//! `sendMessage`/`editMessageText` calls.

pub mod types;

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::chat::event::{Command, Inbound, Payload};
use crate::chat::reply::{Button, Menu, Reply};
use crate::chat::token::CallbackToken;
use crate::chat::{menu, Dispatcher};

use types::{
    AnswerCallbackQueryRequest, ApiResponse, EditMessageTextRequest, GetUpdatesRequest,
    InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, Message, ReplyKeyboardMarkup,
    ReplyMarkup, SendMessageRequest, Update, User,
};

const API_BASE: &str = "https://api.telegram.org";
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {0}")]
    Api(String),
}

pub struct TelegramClient {
    http: reqwest::Client,
    base: String,
}

impl TelegramClient {
    /// `poll_timeout_secs` is the long-poll window; the HTTP timeout is kept
    /// comfortably above it.
    pub fn new(token: &str, poll_timeout_secs: u64) -> Result<Self, TelegramError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(poll_timeout_secs + 15))
            .build()?;
        Ok(Self {
            http,
            base: format!("{API_BASE}/bot{token}"),
        })
    }

    async fn call<B: Serialize, T: DeserializeOwned>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<T, TelegramError> {
        let response = self
            .http
            .post(format!("{}/{method}", self.base))
            .json(body)
            .send()
            .await?;
        let payload: ApiResponse<T> = response.json().await?;

        if payload.ok {
            payload
                .result
                .ok_or_else(|| TelegramError::Api(format!("{method}: missing result")))
        } else {
            Err(TelegramError::Api(
                payload
                    .description
                    .unwrap_or_else(|| format!("{method}: unknown error")),
            ))
        }
    }

    pub async fn get_updates(&self, offset: i64, timeout: u64) -> Result<Vec<Update>, TelegramError> {
        self.call(
            "getUpdates",
            &GetUpdatesRequest {
                offset,
                timeout,
                allowed_updates: &["message", "callback_query"],
            },
        )
        .await
    }

    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_markup: Option<&ReplyMarkup>,
    ) -> Result<Message, TelegramError> {
        self.call(
            "sendMessage",
            &SendMessageRequest {
                chat_id,
                text,
                reply_markup,
            },
        )
        .await
    }

    pub async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        reply_markup: Option<&InlineKeyboardMarkup>,
    ) -> Result<(), TelegramError> {
        // Result is the edited message, which we never read.
        let _: serde_json::Value = self
            .call(
                "editMessageText",
                &EditMessageTextRequest {
                    chat_id,
                    message_id,
                    text,
                    reply_markup,
                },
            )
            .await?;
        Ok(())
    }

    pub async fn answer_callback_query(&self, callback_query_id: &str) -> Result<(), TelegramError> {
        let _: bool = self
            .call(
                "answerCallbackQuery",
                &AnswerCallbackQueryRequest { callback_query_id },
            )
            .await?;
        Ok(())
    }
}

/// Polls for updates and feeds them through the dispatcher until the process
/// is shut down. Poll failures are logged and retried; nothing here is fatal.
pub async fn run(client: &TelegramClient, dispatcher: &Dispatcher, poll_timeout_secs: u64) {
    let mut offset = 0i64;

    loop {
        let updates = match client.get_updates(offset, poll_timeout_secs).await {
            Ok(updates) => updates,
            Err(err) => {
                warn!(error = %err, "getUpdates failed, retrying");
                tokio::time::sleep(POLL_RETRY_DELAY).await;
                continue;
            }
        };

        for update in updates {
            offset = offset.max(update.update_id + 1);
            handle_update(client, dispatcher, update).await;
        }
    }
}

async fn handle_update(client: &TelegramClient, dispatcher: &Dispatcher, update: Update) {
    if let Some(message) = update.message {
        let Some(from) = message.from else { return };
        let Some(text) = message.text else { return };

        let payload = match parse_command(&text) {
            Some(Ok(command)) => Payload::Command(command),
            Some(Err(())) => return, // unknown slash command
            None => Payload::Text(text),
        };

        let inbound = Inbound::new(from.id, display_name(&from), payload);
        let replies = dispatcher.handle(inbound).await;
        for reply in &replies {
            send_reply(client, message.chat.id, reply).await;
        }
    } else if let Some(callback) = update.callback_query {
        // Always acknowledge so the client stops its spinner.
        if let Err(err) = client.answer_callback_query(&callback.id).await {
            debug!(error = %err, "answerCallbackQuery failed");
        }

        let Some(token) = callback.data.as_deref().and_then(CallbackToken::parse) else {
            return;
        };

        let inbound = Inbound::new(
            callback.from.id,
            display_name(&callback.from),
            Payload::Button(token),
        );
        let replies = dispatcher.handle(inbound).await;

        let chat_id = callback
            .message
            .as_ref()
            .map(|message| message.chat.id)
            .unwrap_or(callback.from.id);
        let origin_message_id = callback.message.as_ref().map(|message| message.message_id);
        deliver_callback_replies(client, chat_id, origin_message_id, replies).await;
    }
}

fn parse_command(text: &str) -> Option<Result<Command, ()>> {
    let rest = text.strip_prefix('/')?;
    let name = rest
        .split(|c: char| c == '@' || c.is_whitespace())
        .next()
        .unwrap_or("");
    Some(Command::parse(name).ok_or(()))
}

fn display_name(user: &User) -> String {
    user.first_name
        .clone()
        .or_else(|| user.username.clone())
        .unwrap_or_else(|| "there".to_string())
}

/// The first reply to a button press replaces the originating message (as a
/// persistent keyboard cannot ride on an edit, those fall back to a fresh
/// message); any further replies are sent normally.
async fn deliver_callback_replies(
    client: &TelegramClient,
    chat_id: i64,
    origin_message_id: Option<i64>,
    replies: Vec<Reply>,
) {
    let mut replies = replies.into_iter();

    if let Some(first) = replies.next() {
        let edited = match (&first.menu, origin_message_id) {
            (Some(Menu::Inline(rows)), Some(message_id)) => {
                edit_message(client, chat_id, message_id, &first.text, Some(rows)).await
            }
            (None, Some(message_id)) => {
                edit_message(client, chat_id, message_id, &first.text, None).await
            }
            _ => false,
        };
        if !edited {
            send_reply(client, chat_id, &first).await;
        }
    }

    for reply in replies {
        send_reply(client, chat_id, &reply).await;
    }
}

async fn edit_message(
    client: &TelegramClient,
    chat_id: i64,
    message_id: i64,
    text: &str,
    rows: Option<&Vec<Vec<Button>>>,
) -> bool {
    let markup = rows.map(|rows| inline_markup(rows));
    match client
        .edit_message_text(chat_id, message_id, text, markup.as_ref())
        .await
    {
        Ok(()) => true,
        Err(err) => {
            warn!(error = %err, chat_id, "editMessageText failed");
            false
        }
    }
}

async fn send_reply(client: &TelegramClient, chat_id: i64, reply: &Reply) {
    let markup = reply.menu.as_ref().map(render_markup);
    if let Err(err) = client
        .send_message(chat_id, &reply.text, markup.as_ref())
        .await
    {
        warn!(error = %err, chat_id, "sendMessage failed");
    }
}

fn render_markup(menu: &Menu) -> ReplyMarkup {
    match menu {
        Menu::Main => ReplyMarkup::Keyboard(main_keyboard()),
        Menu::Inline(rows) => ReplyMarkup::Inline(inline_markup(rows)),
    }
}

fn main_keyboard() -> ReplyKeyboardMarkup {
    ReplyKeyboardMarkup {
        keyboard: menu::MAIN_MENU_LAYOUT
            .iter()
            .map(|row| {
                row.iter()
                    .map(|label| KeyboardButton {
                        text: label.to_string(),
                    })
                    .collect()
            })
            .collect(),
        resize_keyboard: true,
    }
}

fn inline_markup(rows: &[Vec<Button>]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup {
        inline_keyboard: rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|button| InlineKeyboardButton {
                        text: button.label.clone(),
                        callback_data: button.token.encode(),
                    })
                    .collect()
            })
            .collect(),
    }
}
