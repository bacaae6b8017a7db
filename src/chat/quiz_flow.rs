use rand::seq::SliceRandom;
use rand::Rng;

use crate::chat::reply::{Button, Reply};
use crate::chat::token::CallbackToken;
use crate::db::operations::words;
use crate::db::Database;
use crate::quiz::engine::Question;
use crate::quiz::session::{Graded, QuizSession, QuizSummary};
use crate::word::{UserId, Word, WordKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizScope {
    All,
    Recent(usize),
}

pub async fn fetch_words(
    db: &Database,
    user_id: UserId,
    scope: QuizScope,
) -> Result<(Vec<Word>, Vec<Word>), sqlx::Error> {
    match scope {
        QuizScope::All => {
            let translations = words::list_words(db, user_id, Some(WordKind::Translation)).await?;
            let irregulars = words::list_words(db, user_id, Some(WordKind::IrregularVerb)).await?;
            Ok((translations, irregulars))
        }
        QuizScope::Recent(limit) => {
            let translations =
                words::list_recent(db, user_id, limit as i64, Some(WordKind::Translation)).await?;
            let irregulars =
                words::list_recent(db, user_id, limit as i64, Some(WordKind::IrregularVerb))
                    .await?;
            Ok((translations, irregulars))
        }
    }
}

/// Builds the session for one quiz run, or `None` when the user has no words.
///
/// "All": the question sequence is every word, shuffled; distractor pools are
/// the full per-kind lists. "Recent": the per-kind recent fetches are merged,
/// re-sorted newest-first, truncated to the window, then shuffled; pools are
/// the per-kind subsets of that selection only.
pub fn assemble<R: Rng>(
    rng: &mut R,
    translations: Vec<Word>,
    irregulars: Vec<Word>,
    scope: QuizScope,
) -> Option<QuizSession> {
    let (mut sequence, translation_pool, irregular_pool) = match scope {
        QuizScope::All => {
            let translation_pool = translations.clone();
            let irregular_pool = irregulars.clone();
            let mut sequence = translations;
            sequence.extend(irregulars);
            (sequence, translation_pool, irregular_pool)
        }
        QuizScope::Recent(limit) => {
            let selection = merge_recent(translations, irregulars, limit);
            let translation_pool = selection
                .iter()
                .filter(|word| word.entry.kind() == WordKind::Translation)
                .cloned()
                .collect();
            let irregular_pool = selection
                .iter()
                .filter(|word| word.entry.kind() == WordKind::IrregularVerb)
                .cloned()
                .collect();
            (selection, translation_pool, irregular_pool)
        }
    };

    if sequence.is_empty() {
        return None;
    }
    sequence.shuffle(rng);

    Some(QuizSession::new(sequence, translation_pool, irregular_pool))
}

/// The `limit` most recent words across both kinds combined (not per kind).
pub fn merge_recent(translations: Vec<Word>, irregulars: Vec<Word>, limit: usize) -> Vec<Word> {
    let mut merged = translations;
    merged.extend(irregulars);
    merged.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
    merged.truncate(limit);
    merged
}

pub fn empty_reply() -> Reply {
    Reply::with_main_menu(
        "You don't have any words added yet! 📭\nFirst add some words through the menu.",
    )
}

pub fn question_reply(question: &Question, number: usize, total: usize) -> Reply {
    let mut rows: Vec<Vec<Button>> = question
        .options
        .iter()
        .enumerate()
        .map(|(index, option)| vec![Button::new(option.clone(), CallbackToken::Answer(index))])
        .collect();
    rows.push(vec![Button::new("❌ Finish Test", CallbackToken::QuitQuiz)]);

    Reply::with_buttons(
        format!("📊 Question {number}/{total}\n\n{}", question.prompt),
        rows,
    )
}

pub fn feedback_reply(graded: &Graded) -> Reply {
    let text = if graded.correct {
        "✅ Correct!".to_string()
    } else {
        format!("❌ Incorrect!\nCorrect answer: {}", graded.correct_answer)
    };
    Reply::with_buttons(
        text,
        vec![vec![Button::new(
            "➡️ Next Question",
            CallbackToken::NextQuestion,
        )]],
    )
}

pub fn summary_replies(summary: &QuizSummary) -> Vec<Reply> {
    let percentage = summary.percentage();
    let text = if summary.quit_early {
        format!(
            "🏁 Test finished early!\n\n📊 Result: {}/{}\n📈 Correct percentage: {percentage:.1}%",
            summary.score, summary.answered
        )
    } else {
        format!(
            "{} Test finished!\n\n📊 Result: {}/{}\n📈 Correct percentage: {percentage:.1}%",
            summary.band().emoji(),
            summary.score,
            summary.total
        )
    };

    vec![Reply::text(text), Reply::with_main_menu("Choose the next action:")]
}

/// A quiz button arrived with no live quiz behind it.
pub fn stale_quiz_reply() -> Reply {
    Reply::text("An error occurred. Start the test again.")
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::word::{FormPair, WordEntry};

    use super::*;

    fn word_at(id: i64, kind: WordKind, minutes_ago: i64) -> Word {
        let entry = match kind {
            WordKind::Translation => WordEntry::Translation {
                source: format!("word{id}"),
                target: format!("слово{id}"),
            },
            WordKind::IrregularVerb => WordEntry::IrregularVerb {
                pair: FormPair::InfinitiveToPast,
                from_form: format!("verb{id}"),
                to_form: format!("form{id}"),
            },
        };
        Word {
            id,
            user_id: 1,
            entry,
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[test]
    fn test_merge_recent_is_combined_not_per_kind() {
        // 40 translations newer than 5 verbs: the window holds translations only.
        let translations: Vec<Word> = (0..40)
            .map(|i| word_at(i, WordKind::Translation, i))
            .collect();
        let irregulars: Vec<Word> = (0..5)
            .map(|i| word_at(100 + i, WordKind::IrregularVerb, 1000 + i))
            .collect();

        let merged = merge_recent(translations, irregulars, 30);
        assert_eq!(merged.len(), 30);
        assert!(merged
            .iter()
            .all(|word| word.entry.kind() == WordKind::Translation));
        // Newest first.
        assert_eq!(merged.first().unwrap().id, 0);
        assert_eq!(merged.last().unwrap().id, 29);
    }

    #[test]
    fn test_merge_recent_interleaves_by_time() {
        let translations = vec![word_at(1, WordKind::Translation, 10)];
        let irregulars = vec![
            word_at(2, WordKind::IrregularVerb, 5),
            word_at(3, WordKind::IrregularVerb, 20),
        ];
        let merged = merge_recent(translations, irregulars, 2);
        let ids: Vec<i64> = merged.iter().map(|word| word.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_assemble_empty_is_none() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(assemble(&mut rng, Vec::new(), Vec::new(), QuizScope::All).is_none());
    }

    #[test]
    fn test_assemble_recent_pools_are_subsets_of_selection() {
        let translations: Vec<Word> = (0..4)
            .map(|i| word_at(i, WordKind::Translation, i))
            .collect();
        let irregulars: Vec<Word> = (0..4)
            .map(|i| word_at(10 + i, WordKind::IrregularVerb, 100 + i))
            .collect();

        let mut rng = StdRng::seed_from_u64(1);
        let session = assemble(&mut rng, translations, irregulars, QuizScope::Recent(5)).unwrap();
        assert_eq!(session.total(), 5);
    }

    #[test]
    fn test_summary_formatting() {
        let summary = QuizSummary {
            score: 2,
            answered: 3,
            total: 10,
            quit_early: true,
        };
        let replies = summary_replies(&summary);
        assert_eq!(replies.len(), 2);
        assert!(replies[0].text.contains("Result: 2/3"));
        assert!(replies[0].text.contains("66.7%"));
        assert!(replies[0].text.contains("finished early"));

        let summary = QuizSummary {
            score: 7,
            answered: 10,
            total: 10,
            quit_early: false,
        };
        let replies = summary_replies(&summary);
        assert!(replies[0].text.starts_with("👍"));
        assert!(replies[0].text.contains("Result: 7/10"));
        assert!(replies[0].text.contains("70.0%"));
    }

    #[test]
    fn test_zero_answered_summary_has_no_division_error() {
        let summary = QuizSummary {
            score: 0,
            answered: 0,
            total: 4,
            quit_early: true,
        };
        let replies = summary_replies(&summary);
        assert!(replies[0].text.contains("0.0%"));
    }

    #[test]
    fn test_question_reply_has_option_and_quit_buttons() {
        let question = Question {
            prompt: "What is the translation of \"cat\"?".to_string(),
            correct: "кошка".to_string(),
            options: vec!["кошка".to_string(), "собака".to_string()],
            word_id: 1,
        };
        let reply = question_reply(&question, 3, 10);
        assert!(reply.text.contains("Question 3/10"));
        let rows = reply.buttons().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][0].token, CallbackToken::Answer(0));
        assert_eq!(rows[1][0].token, CallbackToken::Answer(1));
        assert_eq!(rows[2][0].token, CallbackToken::QuitQuiz);
    }
}
