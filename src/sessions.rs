use std::collections::HashMap;

use parking_lot::Mutex;

use crate::chat::conversation::AddWordFlow;
use crate::quiz::session::QuizSession;
use crate::word::UserId;

/// A user's in-progress dialog, if any. At most one per user: starting a new
/// flow replaces whatever was active.
#[derive(Debug, Clone)]
pub enum Session {
    AddingWord(AddWordFlow),
    Quiz(QuizSession),
}

/// Process-local mapping from user id to active session. State here is
/// transient by design and lost on restart.
#[derive(Debug, Default)]
pub struct SessionMap {
    inner: Mutex<HashMap<UserId, Session>>,
}

impl SessionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns the user's session; the caller decides whether to
    /// put an updated one back.
    pub fn take(&self, user_id: UserId) -> Option<Session> {
        self.inner.lock().remove(&user_id)
    }

    pub fn put(&self, user_id: UserId, session: Session) {
        self.inner.lock().insert(user_id, session);
    }

    /// Discards any active session. Returns whether one existed.
    pub fn clear(&self, user_id: UserId) -> bool {
        self.inner.lock().remove(&user_id).is_some()
    }
}
