use crate::word::{FormPair, WordId, WordKind};

/// Typed form of the opaque string carried in a button. Encoding is the wire
/// format (Telegram caps callback data at 64 bytes); parsing is total and
/// rejects anything the bot did not emit itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackToken {
    ChooseKind(WordKind),
    ChooseFormPair(FormPair),
    CancelAdd,
    Answer(usize),
    QuitQuiz,
    NextQuestion,
    DeletePage(usize),
    DeleteWord(WordId),
    ConfirmDelete(WordId),
    CancelDelete,
    CloseDelete,
    ViewPage(usize),
    CloseView,
}

impl CallbackToken {
    pub fn encode(&self) -> String {
        match self {
            CallbackToken::ChooseKind(kind) => format!("kind:{}", kind.as_str()),
            CallbackToken::ChooseFormPair(pair) => format!("form:{}", pair.as_str()),
            CallbackToken::CancelAdd => "add:cancel".to_string(),
            CallbackToken::Answer(index) => format!("quiz:ans:{index}"),
            CallbackToken::QuitQuiz => "quiz:quit".to_string(),
            CallbackToken::NextQuestion => "quiz:next".to_string(),
            CallbackToken::DeletePage(page) => format!("del:page:{page}"),
            CallbackToken::DeleteWord(id) => format!("del:word:{id}"),
            CallbackToken::ConfirmDelete(id) => format!("del:confirm:{id}"),
            CallbackToken::CancelDelete => "del:keep".to_string(),
            CallbackToken::CloseDelete => "del:close".to_string(),
            CallbackToken::ViewPage(page) => format!("view:page:{page}"),
            CallbackToken::CloseView => "view:close".to_string(),
        }
    }

    pub fn parse(data: &str) -> Option<Self> {
        match data {
            "add:cancel" => return Some(CallbackToken::CancelAdd),
            "quiz:quit" => return Some(CallbackToken::QuitQuiz),
            "quiz:next" => return Some(CallbackToken::NextQuestion),
            "del:keep" => return Some(CallbackToken::CancelDelete),
            "del:close" => return Some(CallbackToken::CloseDelete),
            "view:close" => return Some(CallbackToken::CloseView),
            _ => {}
        }

        if let Some(rest) = data.strip_prefix("kind:") {
            return WordKind::parse(rest).map(CallbackToken::ChooseKind);
        }
        if let Some(rest) = data.strip_prefix("form:") {
            return FormPair::parse(rest).map(CallbackToken::ChooseFormPair);
        }
        if let Some(rest) = data.strip_prefix("quiz:ans:") {
            return rest.parse().ok().map(CallbackToken::Answer);
        }
        if let Some(rest) = data.strip_prefix("del:page:") {
            return rest.parse().ok().map(CallbackToken::DeletePage);
        }
        if let Some(rest) = data.strip_prefix("del:word:") {
            return rest.parse().ok().map(CallbackToken::DeleteWord);
        }
        if let Some(rest) = data.strip_prefix("del:confirm:") {
            return rest.parse().ok().map(CallbackToken::ConfirmDelete);
        }
        if let Some(rest) = data.strip_prefix("view:page:") {
            return rest.parse().ok().map(CallbackToken::ViewPage);
        }

        None
    }
}
