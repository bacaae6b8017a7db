pub mod conversation;
pub mod event;
pub mod lists;
pub mod menu;
pub mod quiz_flow;
pub mod reply;
pub mod token;

use thiserror::Error;

use crate::config::Config;
use crate::db::operations::{users, words};
use crate::db::Database;
use crate::sessions::{Session, SessionMap};
use crate::word::UserId;

use conversation::{AddWordFlow, FlowStep};
use event::{Command, Inbound, Payload};
use menu::MenuAction;
use quiz_flow::QuizScope;
use reply::Reply;
use token::CallbackToken;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Routes each inbound action through the current session state, touching the
/// store and session map as needed, and produces the outbound replies.
pub struct Dispatcher {
    db: Database,
    sessions: SessionMap,
    delete_page_size: usize,
    view_page_size: usize,
    recent_quiz_limit: usize,
}

impl Dispatcher {
    pub fn new(db: Database, sessions: SessionMap, config: &Config) -> Self {
        Self {
            db,
            sessions,
            delete_page_size: config.delete_page_size,
            view_page_size: config.view_page_size,
            recent_quiz_limit: config.recent_quiz_limit,
        }
    }

    /// Never fails: handler errors are logged and turned into a one-line
    /// failure notice scoped to this interaction.
    pub async fn handle(&self, inbound: Inbound) -> Vec<Reply> {
        let user_id = inbound.user_id;
        match self.dispatch(inbound).await {
            Ok(replies) => replies,
            Err(err) => {
                tracing::error!(error = %err, user_id, "handler failed");
                vec![Reply::text("⚠️ Something went wrong. Please try again.")]
            }
        }
    }

    async fn dispatch(&self, inbound: Inbound) -> Result<Vec<Reply>, HandlerError> {
        match inbound.payload {
            Payload::Command(Command::Start) => {
                self.sessions.clear(inbound.user_id);
                self.greet(inbound.user_id, &inbound.display_name).await
            }
            Payload::Command(Command::Cancel) => {
                if self.sessions.clear(inbound.user_id) {
                    Ok(vec![conversation::cancelled()])
                } else {
                    Ok(Vec::new())
                }
            }
            Payload::Text(text) => self.on_text(inbound.user_id, &text).await,
            Payload::Button(token) => self.on_button(inbound.user_id, token).await,
        }
    }

    async fn greet(&self, user_id: UserId, display_name: &str) -> Result<Vec<Reply>, HandlerError> {
        let is_new = users::register_user(&self.db, user_id, display_name).await?;
        if is_new {
            tracing::info!(user_id, "new user registered");
        }
        let text = if is_new {
            format!(
                "Hello, {display_name}! 👋\n\n\
                 Welcome to the English vocabulary learning bot!\n\n\
                 Here you can:\n\
                 📚 Take tests on all added words\n\
                 📝 Test the last 30 words\n\
                 ➕ Add new words (translations and irregular verbs)\n\n\
                 Choose an action from the menu below:"
            )
        } else {
            format!("Welcome back, {display_name}! 👋\n\nChoose an action from the menu below:")
        };
        Ok(vec![Reply::with_main_menu(text)])
    }

    async fn on_text(&self, user_id: UserId, text: &str) -> Result<Vec<Reply>, HandlerError> {
        match self.sessions.take(user_id) {
            Some(Session::AddingWord(flow)) => {
                // While waiting for a kind button, main-menu taps still work
                // (and replace the dialog); any other text is not for us.
                if matches!(flow, AddWordFlow::ChoosingKind) {
                    if let Some(action) = MenuAction::from_label(text) {
                        return self.run_menu_action(user_id, action).await;
                    }
                    self.sessions.put(user_id, Session::AddingWord(flow));
                    return Ok(Vec::new());
                }
                self.apply_flow_step(user_id, conversation::on_text(flow, text))
                    .await
            }
            Some(Session::Quiz(session)) => match MenuAction::from_label(text) {
                // Browsing the list mid-quiz abandons the quiz.
                Some(MenuAction::ViewWords) => {
                    Ok(vec![
                        lists::open_viewer(&self.db, user_id, self.view_page_size).await?,
                    ])
                }
                Some(MenuAction::DeleteWords) => {
                    Ok(vec![
                        lists::open_delete_browser(&self.db, user_id, self.delete_page_size)
                            .await?,
                    ])
                }
                _ => {
                    self.sessions.put(user_id, Session::Quiz(session));
                    Ok(Vec::new())
                }
            },
            None => match MenuAction::from_label(text) {
                Some(action) => self.run_menu_action(user_id, action).await,
                None => Ok(Vec::new()),
            },
        }
    }

    async fn run_menu_action(
        &self,
        user_id: UserId,
        action: MenuAction,
    ) -> Result<Vec<Reply>, HandlerError> {
        match action {
            MenuAction::QuizAll => self.start_quiz(user_id, QuizScope::All).await,
            MenuAction::QuizRecent => {
                self.start_quiz(user_id, QuizScope::Recent(self.recent_quiz_limit))
                    .await
            }
            MenuAction::AddWord => {
                let (flow, reply) = conversation::start();
                self.sessions.put(user_id, Session::AddingWord(flow));
                Ok(vec![reply])
            }
            MenuAction::ViewWords => Ok(vec![
                lists::open_viewer(&self.db, user_id, self.view_page_size).await?,
            ]),
            MenuAction::DeleteWords => Ok(vec![
                lists::open_delete_browser(&self.db, user_id, self.delete_page_size).await?,
            ]),
        }
    }

    async fn start_quiz(
        &self,
        user_id: UserId,
        scope: QuizScope,
    ) -> Result<Vec<Reply>, HandlerError> {
        let (translations, irregulars) = quiz_flow::fetch_words(&self.db, user_id, scope).await?;

        let mut rng = rand::rng();
        let Some(mut session) = quiz_flow::assemble(&mut rng, translations, irregulars, scope)
        else {
            return Ok(vec![quiz_flow::empty_reply()]);
        };

        let total = session.total();
        tracing::debug!(user_id, total, "quiz started");
        let reply = session
            .next_question(&mut rng)
            .map(|question| quiz_flow::question_reply(question, 1, total));
        self.sessions.put(user_id, Session::Quiz(session));
        Ok(reply.into_iter().collect())
    }

    async fn on_button(
        &self,
        user_id: UserId,
        token: CallbackToken,
    ) -> Result<Vec<Reply>, HandlerError> {
        match token {
            CallbackToken::ChooseKind(_)
            | CallbackToken::ChooseFormPair(_)
            | CallbackToken::CancelAdd => match self.sessions.take(user_id) {
                Some(Session::AddingWord(flow)) => {
                    self.apply_flow_step(user_id, conversation::on_button(flow, token))
                        .await
                }
                Some(other) => {
                    // Stale dialog button; leave the live session alone.
                    self.sessions.put(user_id, other);
                    Ok(Vec::new())
                }
                None => Ok(Vec::new()),
            },

            CallbackToken::Answer(index) => match self.sessions.take(user_id) {
                Some(Session::Quiz(mut session)) => match session.grade(index) {
                    Some(graded) => {
                        self.sessions.put(user_id, Session::Quiz(session));
                        Ok(vec![quiz_flow::feedback_reply(&graded)])
                    }
                    None => Ok(vec![quiz_flow::stale_quiz_reply()]),
                },
                other => self.stale_quiz(user_id, other),
            },

            CallbackToken::NextQuestion => match self.sessions.take(user_id) {
                Some(Session::Quiz(mut session)) => {
                    if session.is_finished() {
                        return Ok(quiz_flow::summary_replies(&session.summary(false)));
                    }
                    let mut rng = rand::rng();
                    let total = session.total();
                    let number = session.position() + 1;
                    let reply = session
                        .next_question(&mut rng)
                        .map(|question| quiz_flow::question_reply(question, number, total));
                    self.sessions.put(user_id, Session::Quiz(session));
                    Ok(reply.into_iter().collect())
                }
                other => self.stale_quiz(user_id, other),
            },

            CallbackToken::QuitQuiz => match self.sessions.take(user_id) {
                Some(Session::Quiz(session)) => {
                    Ok(quiz_flow::summary_replies(&session.summary(true)))
                }
                other => self.stale_quiz(user_id, other),
            },

            CallbackToken::DeletePage(page) => Ok(vec![
                lists::delete_browser_page(&self.db, user_id, page, self.delete_page_size).await?,
            ]),
            CallbackToken::DeleteWord(word_id) => Ok(vec![lists::confirm_delete_reply(word_id)]),
            CallbackToken::ConfirmDelete(word_id) => Ok(vec![
                lists::perform_delete(&self.db, user_id, word_id).await?,
            ]),
            CallbackToken::CancelDelete => Ok(vec![
                lists::return_to_delete_browser(&self.db, user_id, self.delete_page_size).await?,
            ]),
            CallbackToken::CloseDelete => Ok(vec![Reply::text("Deletion cancelled.")]),

            CallbackToken::ViewPage(page) => Ok(vec![
                lists::viewer_page(&self.db, user_id, page, self.view_page_size).await?,
            ]),
            CallbackToken::CloseView => Ok(vec![Reply::text("Word list closed.")]),
        }
    }

    fn stale_quiz(
        &self,
        user_id: UserId,
        session: Option<Session>,
    ) -> Result<Vec<Reply>, HandlerError> {
        if let Some(session) = session {
            self.sessions.put(user_id, session);
        }
        Ok(vec![quiz_flow::stale_quiz_reply()])
    }

    async fn apply_flow_step(
        &self,
        user_id: UserId,
        step: FlowStep,
    ) -> Result<Vec<Reply>, HandlerError> {
        match step {
            FlowStep::Continue(next, reply) => {
                self.sessions.put(user_id, Session::AddingWord(next));
                Ok(vec![reply])
            }
            FlowStep::Stop(reply) => Ok(vec![reply]),
            FlowStep::Completed(entry) => {
                words::add_word(&self.db, user_id, &entry).await?;
                Ok(vec![conversation::confirmation(&entry)])
            }
            FlowStep::Ignore(flow) => {
                self.sessions.put(user_id, Session::AddingWord(flow));
                Ok(Vec::new())
            }
        }
    }
}
