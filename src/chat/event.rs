use crate::chat::token::CallbackToken;
use crate::word::UserId;

/// Slash commands the bot understands. Anything else is dropped by the
/// transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Cancel,
}

impl Command {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "start" => Some(Command::Start),
            "cancel" => Some(Command::Cancel),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Command(Command),
    Text(String),
    Button(CallbackToken),
}

/// One inbound user action, already stripped of transport detail.
#[derive(Debug, Clone, PartialEq)]
pub struct Inbound {
    pub user_id: UserId,
    pub display_name: String,
    pub payload: Payload,
}

impl Inbound {
    pub fn new(user_id: UserId, display_name: impl Into<String>, payload: Payload) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            payload,
        }
    }
}
