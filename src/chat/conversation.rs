use crate::chat::reply::{Button, Reply};
use crate::chat::token::CallbackToken;
use crate::word::{FormPair, WordEntry, WordKind};

/// What the dialog is collecting once the word kind is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Translation,
    Verb(FormPair),
}

/// Add-word dialog state. Each variant carries exactly the fields accumulated
/// so far, so a torn-down session cannot leak partial input.
#[derive(Debug, Clone, PartialEq)]
pub enum AddWordFlow {
    ChoosingKind,
    ChoosingFormPair,
    EnteringFirstTerm { kind: EntryKind },
    EnteringSecondTerm { kind: EntryKind, first_term: String },
}

/// Outcome of feeding one input to the dialog.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowStep {
    /// Keep (or replace) the session state and send the reply.
    Continue(AddWordFlow, Reply),
    /// Discard the session and send the reply.
    Stop(Reply),
    /// Discard the session; the caller persists the finished entry.
    Completed(WordEntry),
    /// Input not meant for this state; keep the session, say nothing.
    Ignore(AddWordFlow),
}

pub fn start() -> (AddWordFlow, Reply) {
    let reply = Reply::with_buttons(
        "What type of word would you like to add?",
        vec![
            vec![Button::new(
                "🔤 Translation (English ↔ Russian)",
                CallbackToken::ChooseKind(WordKind::Translation),
            )],
            vec![Button::new(
                "📖 Irregular Verb (3 forms)",
                CallbackToken::ChooseKind(WordKind::IrregularVerb),
            )],
        ],
    );
    (AddWordFlow::ChoosingKind, reply)
}

pub fn on_button(flow: AddWordFlow, token: CallbackToken) -> FlowStep {
    match (flow, token) {
        (_, CallbackToken::CancelAdd) => FlowStep::Stop(cancelled()),
        (AddWordFlow::ChoosingKind, CallbackToken::ChooseKind(WordKind::Translation)) => {
            let kind = EntryKind::Translation;
            FlowStep::Continue(AddWordFlow::EnteringFirstTerm { kind }, first_term_prompt(kind))
        }
        (AddWordFlow::ChoosingKind, CallbackToken::ChooseKind(WordKind::IrregularVerb)) => {
            FlowStep::Continue(AddWordFlow::ChoosingFormPair, form_pair_menu())
        }
        (AddWordFlow::ChoosingFormPair, CallbackToken::ChooseFormPair(pair)) => {
            let kind = EntryKind::Verb(pair);
            FlowStep::Continue(AddWordFlow::EnteringFirstTerm { kind }, first_term_prompt(kind))
        }
        (flow, _) => FlowStep::Ignore(flow),
    }
}

pub fn on_text(flow: AddWordFlow, text: &str) -> FlowStep {
    match flow {
        AddWordFlow::ChoosingKind => FlowStep::Ignore(AddWordFlow::ChoosingKind),
        // Stray text here tears the dialog down rather than re-prompting.
        AddWordFlow::ChoosingFormPair => {
            FlowStep::Stop(Reply::with_main_menu("Please choose one of the buttons."))
        }
        AddWordFlow::EnteringFirstTerm { kind } => {
            let term = text.trim();
            if term.is_empty() {
                FlowStep::Continue(
                    AddWordFlow::EnteringFirstTerm { kind },
                    first_term_prompt(kind),
                )
            } else {
                FlowStep::Continue(
                    AddWordFlow::EnteringSecondTerm {
                        kind,
                        first_term: term.to_string(),
                    },
                    second_term_prompt(kind),
                )
            }
        }
        AddWordFlow::EnteringSecondTerm { kind, first_term } => {
            let term = text.trim();
            if term.is_empty() {
                FlowStep::Continue(
                    AddWordFlow::EnteringSecondTerm { kind, first_term },
                    second_term_prompt(kind),
                )
            } else {
                FlowStep::Completed(build_entry(kind, first_term, term.to_string()))
            }
        }
    }
}

pub fn confirmation(entry: &WordEntry) -> Reply {
    match entry {
        WordEntry::Translation { source, target } => {
            Reply::with_main_menu(format!("✅ Word added!\n\n🔤 {source} — {target}"))
        }
        WordEntry::IrregularVerb {
            pair,
            from_form,
            to_form,
        } => Reply::with_main_menu(format!(
            "✅ Irregular verb added!\n\n📖 {from_form} → {to_form}\n({})",
            pair.label()
        )),
    }
}

pub fn cancelled() -> Reply {
    Reply::with_main_menu("Word addition cancelled.")
}

fn build_entry(kind: EntryKind, first: String, second: String) -> WordEntry {
    match kind {
        EntryKind::Translation => WordEntry::Translation {
            source: first,
            target: second,
        },
        EntryKind::Verb(pair) => WordEntry::IrregularVerb {
            pair,
            from_form: first,
            to_form: second,
        },
    }
}

fn form_pair_menu() -> Reply {
    Reply::with_buttons(
        "Choose which forms of the irregular verb you want to add:",
        vec![
            vec![Button::new(
                "1️⃣ → 2️⃣ (Infinitive → Past Simple)",
                CallbackToken::ChooseFormPair(FormPair::InfinitiveToPast),
            )],
            vec![Button::new(
                "2️⃣ → 3️⃣ (Past Simple → Past Participle)",
                CallbackToken::ChooseFormPair(FormPair::PastToParticiple),
            )],
            vec![Button::new("❌ Cancel", CallbackToken::CancelAdd)],
        ],
    )
}

fn with_cancel_button(text: &str) -> Reply {
    Reply::with_buttons(
        text,
        vec![vec![Button::new("❌ Cancel", CallbackToken::CancelAdd)]],
    )
}

fn first_term_prompt(kind: EntryKind) -> Reply {
    match kind {
        EntryKind::Translation => Reply::text("Enter the English word:"),
        EntryKind::Verb(FormPair::InfinitiveToPast) => {
            with_cancel_button("Enter the first form of the verb (Infinitive):\nFor example: go")
        }
        EntryKind::Verb(FormPair::PastToParticiple) => {
            with_cancel_button("Enter the second form of the verb (Past Simple):\nFor example: went")
        }
    }
}

fn second_term_prompt(kind: EntryKind) -> Reply {
    match kind {
        EntryKind::Translation => Reply::text("Now enter the Russian translation:"),
        EntryKind::Verb(FormPair::InfinitiveToPast) => {
            with_cancel_button("Enter the second form of the verb (Past Simple):\nFor example: went")
        }
        EntryKind::Verb(FormPair::PastToParticiple) => with_cancel_button(
            "Enter the third form of the verb (Past Participle):\nFor example: gone",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_path_completes() {
        let (flow, reply) = start();
        assert!(reply.buttons().is_some());

        let step = on_button(flow, CallbackToken::ChooseKind(WordKind::Translation));
        let FlowStep::Continue(flow, reply) = step else {
            panic!("expected prompt for first term");
        };
        assert_eq!(reply.text, "Enter the English word:");

        let FlowStep::Continue(flow, reply) = on_text(flow, "  cat  ") else {
            panic!("expected prompt for second term");
        };
        assert_eq!(reply.text, "Now enter the Russian translation:");

        let FlowStep::Completed(entry) = on_text(flow, "кошка") else {
            panic!("expected completed entry");
        };
        assert_eq!(
            entry,
            WordEntry::Translation {
                source: "cat".to_string(),
                target: "кошка".to_string(),
            }
        );
    }

    #[test]
    fn test_verb_path_records_form_pair() {
        let (flow, _) = start();
        let FlowStep::Continue(flow, _) =
            on_button(flow, CallbackToken::ChooseKind(WordKind::IrregularVerb))
        else {
            panic!("expected form-pair menu");
        };
        let FlowStep::Continue(flow, reply) = on_button(
            flow,
            CallbackToken::ChooseFormPair(FormPair::PastToParticiple),
        ) else {
            panic!("expected first-form prompt");
        };
        assert!(reply.text.contains("Past Simple"));

        let FlowStep::Continue(flow, _) = on_text(flow, "went") else {
            panic!("expected second-form prompt");
        };
        let FlowStep::Completed(entry) = on_text(flow, "gone") else {
            panic!("expected completed entry");
        };
        assert_eq!(entry.form_pair(), Some(FormPair::PastToParticiple));
        assert_eq!(entry.first_term(), "went");
        assert_eq!(entry.second_term(), "gone");
    }

    #[test]
    fn test_cancel_button_stops_any_state() {
        let states = [
            AddWordFlow::ChoosingKind,
            AddWordFlow::ChoosingFormPair,
            AddWordFlow::EnteringFirstTerm {
                kind: EntryKind::Translation,
            },
            AddWordFlow::EnteringSecondTerm {
                kind: EntryKind::Verb(FormPair::InfinitiveToPast),
                first_term: "go".to_string(),
            },
        ];
        for state in states {
            let FlowStep::Stop(reply) = on_button(state, CallbackToken::CancelAdd) else {
                panic!("cancel should stop the flow");
            };
            assert_eq!(reply.text, "Word addition cancelled.");
        }
    }

    #[test]
    fn test_stray_text_at_form_pair_discards_session() {
        let FlowStep::Stop(reply) = on_text(AddWordFlow::ChoosingFormPair, "go") else {
            panic!("stray text should tear the session down");
        };
        assert_eq!(reply.text, "Please choose one of the buttons.");
    }

    #[test]
    fn test_blank_term_reprompts_without_state_change() {
        let flow = AddWordFlow::EnteringFirstTerm {
            kind: EntryKind::Translation,
        };
        let FlowStep::Continue(next, reply) = on_text(flow.clone(), "   ") else {
            panic!("blank term should re-prompt");
        };
        assert_eq!(next, flow);
        assert_eq!(reply.text, "Enter the English word:");
    }

    #[test]
    fn test_mismatched_token_is_ignored() {
        let flow = AddWordFlow::EnteringFirstTerm {
            kind: EntryKind::Translation,
        };
        let FlowStep::Ignore(kept) =
            on_button(flow.clone(), CallbackToken::ChooseKind(WordKind::Translation))
        else {
            panic!("mismatched token should be ignored");
        };
        assert_eq!(kept, flow);
    }
}
