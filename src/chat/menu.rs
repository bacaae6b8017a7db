//! The persistent main menu. A reply keyboard delivers taps as plain label
//! text, so this is the single place where label strings are interpreted.

pub const QUIZ_ALL_LABEL: &str = "📚 Test All Words";
pub const QUIZ_RECENT_LABEL: &str = "📝 Test Last 30 Words";
pub const ADD_WORD_LABEL: &str = "➕ Add Word";
pub const VIEW_WORDS_LABEL: &str = "👀 View Words";
pub const DELETE_WORD_LABEL: &str = "🗑 Delete Word";

pub const MAIN_MENU_LAYOUT: [[&str; 1]; 5] = [
    [QUIZ_ALL_LABEL],
    [QUIZ_RECENT_LABEL],
    [ADD_WORD_LABEL],
    [VIEW_WORDS_LABEL],
    [DELETE_WORD_LABEL],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    QuizAll,
    QuizRecent,
    AddWord,
    ViewWords,
    DeleteWords,
}

impl MenuAction {
    pub fn from_label(text: &str) -> Option<Self> {
        match text {
            QUIZ_ALL_LABEL => Some(MenuAction::QuizAll),
            QUIZ_RECENT_LABEL => Some(MenuAction::QuizRecent),
            ADD_WORD_LABEL => Some(MenuAction::AddWord),
            VIEW_WORDS_LABEL => Some(MenuAction::ViewWords),
            DELETE_WORD_LABEL => Some(MenuAction::DeleteWords),
            _ => None,
        }
    }
}
