use crate::chat::token::CallbackToken;

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: String,
    pub token: CallbackToken,
}

impl Button {
    pub fn new(label: impl Into<String>, token: CallbackToken) -> Self {
        Self {
            label: label.into(),
            token,
        }
    }
}

/// Choice menu attached to a reply. `Main` is the persistent always-visible
/// action keyboard; `Inline` is transient and belongs to one message.
#[derive(Debug, Clone, PartialEq)]
pub enum Menu {
    Main,
    Inline(Vec<Vec<Button>>),
}

/// One outbound message description; the transport decides how to deliver it.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub menu: Option<Menu>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            menu: None,
        }
    }

    pub fn with_main_menu(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            menu: Some(Menu::Main),
        }
    }

    pub fn with_buttons(text: impl Into<String>, rows: Vec<Vec<Button>>) -> Self {
        Self {
            text: text.into(),
            menu: Some(Menu::Inline(rows)),
        }
    }

    /// Inline button rows, if any. Convenience for tests and the transport.
    pub fn buttons(&self) -> Option<&[Vec<Button>]> {
        match &self.menu {
            Some(Menu::Inline(rows)) => Some(rows),
            _ => None,
        }
    }
}
