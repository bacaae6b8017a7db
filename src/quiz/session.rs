use rand::Rng;

use crate::quiz::engine::{generate_question, Question};
use crate::word::{Word, WordKind};

/// Result tier for a quiz finished normally. Thresholds are inclusive lower
/// bounds: exactly 70% is `Good`, not `Fair`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    NeedsPractice,
}

impl ScoreBand {
    pub fn for_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            ScoreBand::Excellent
        } else if percentage >= 70.0 {
            ScoreBand::Good
        } else if percentage >= 50.0 {
            ScoreBand::Fair
        } else {
            ScoreBand::NeedsPractice
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "🏆",
            ScoreBand::Good => "👍",
            ScoreBand::Fair => "📚",
            ScoreBand::NeedsPractice => "💪",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizSummary {
    pub score: usize,
    pub answered: usize,
    pub total: usize,
    pub quit_early: bool,
}

impl QuizSummary {
    /// Share of correct answers among the questions actually graded. An early
    /// quit with nothing answered is 0%, not a division error.
    pub fn percentage(&self) -> f64 {
        if self.answered == 0 {
            0.0
        } else {
            self.score as f64 / self.answered as f64 * 100.0
        }
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::for_percentage(self.percentage())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Graded {
    pub correct: bool,
    pub correct_answer: String,
}

/// One user's quiz in progress: a shuffled snapshot of their words, the
/// per-kind candidate pools for distractors, and the running score. The
/// displayed question lives here so a button press can be graded against
/// exactly what was shown.
#[derive(Debug, Clone)]
pub struct QuizSession {
    words: Vec<Word>,
    translation_pool: Vec<Word>,
    irregular_pool: Vec<Word>,
    index: usize,
    score: usize,
    current: Option<Question>,
}

impl QuizSession {
    pub fn new(words: Vec<Word>, translation_pool: Vec<Word>, irregular_pool: Vec<Word>) -> Self {
        Self {
            words,
            translation_pool,
            irregular_pool,
            index: 0,
            score: 0,
            current: None,
        }
    }

    pub fn total(&self) -> usize {
        self.words.len()
    }

    /// Number of questions graded so far; also the index of the next word.
    pub fn position(&self) -> usize {
        self.index
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.words.len()
    }

    pub fn current(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    /// Generates and records the question for the current word, or `None`
    /// once the sequence is exhausted.
    pub fn next_question<R: Rng>(&mut self, rng: &mut R) -> Option<&Question> {
        let word = self.words.get(self.index)?;
        let pool = match word.entry.kind() {
            WordKind::Translation => &self.translation_pool,
            WordKind::IrregularVerb => &self.irregular_pool,
        };
        self.current = Some(generate_question(rng, word, pool));
        self.current.as_ref()
    }

    /// Grades the displayed question against the selected option. The score
    /// counts exact value matches; the index advances either way. `None` when
    /// no question is live or the option index is out of range.
    pub fn grade(&mut self, option_index: usize) -> Option<Graded> {
        if option_index >= self.current.as_ref()?.options.len() {
            return None;
        }
        let question = self.current.take()?;
        let correct = question.options[option_index] == question.correct;
        if correct {
            self.score += 1;
        }
        self.index += 1;
        Some(Graded {
            correct,
            correct_answer: question.correct,
        })
    }

    pub fn summary(&self, quit_early: bool) -> QuizSummary {
        QuizSummary {
            score: self.score,
            answered: self.index,
            total: self.words.len(),
            quit_early,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::word::WordEntry;

    use super::*;

    fn words(count: usize) -> Vec<Word> {
        (0..count as i64)
            .map(|i| Word {
                id: i,
                user_id: 1,
                entry: WordEntry::Translation {
                    source: format!("word{i}"),
                    target: format!("слово{i}"),
                },
                created_at: Utc::now(),
            })
            .collect()
    }

    fn session(count: usize) -> QuizSession {
        let pool = words(count);
        QuizSession::new(pool.clone(), pool, Vec::new())
    }

    #[test]
    fn test_grade_advances_and_scores() {
        let mut session = session(2);
        let mut rng = StdRng::seed_from_u64(1);

        let correct_index = {
            let question = session.next_question(&mut rng).unwrap();
            question
                .options
                .iter()
                .position(|option| *option == question.correct)
                .unwrap()
        };
        let graded = session.grade(correct_index).unwrap();
        assert!(graded.correct);
        assert_eq!(session.position(), 1);

        let wrong_index = {
            let question = session.next_question(&mut rng).unwrap();
            question
                .options
                .iter()
                .position(|option| *option != question.correct)
                .unwrap()
        };
        let graded = session.grade(wrong_index).unwrap();
        assert!(!graded.correct);
        assert_eq!(session.position(), 2);
        assert!(session.is_finished());
        assert!(session.next_question(&mut rng).is_none());

        let summary = session.summary(false);
        assert_eq!(summary.score, 1);
        assert_eq!(summary.answered, 2);
    }

    #[test]
    fn test_grade_without_question_is_none() {
        let mut session = session(1);
        assert!(session.grade(0).is_none());

        let mut rng = StdRng::seed_from_u64(1);
        session.next_question(&mut rng);
        assert!(session.grade(99).is_none());
    }

    #[test]
    fn test_completed_percentage_and_band() {
        let summary = QuizSummary {
            score: 7,
            answered: 10,
            total: 10,
            quit_early: false,
        };
        assert!((summary.percentage() - 70.0).abs() < 1e-9);
        assert_eq!(summary.band(), ScoreBand::Good);
    }

    #[test]
    fn test_early_quit_uses_answered_count() {
        let summary = QuizSummary {
            score: 2,
            answered: 3,
            total: 10,
            quit_early: true,
        };
        assert!((summary.percentage() - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_answered_is_zero_percent() {
        let summary = QuizSummary {
            score: 0,
            answered: 0,
            total: 10,
            quit_early: true,
        };
        assert_eq!(summary.percentage(), 0.0);
    }

    #[test]
    fn test_band_boundaries_are_inclusive() {
        assert_eq!(ScoreBand::for_percentage(90.0), ScoreBand::Excellent);
        assert_eq!(ScoreBand::for_percentage(89.9), ScoreBand::Good);
        assert_eq!(ScoreBand::for_percentage(70.0), ScoreBand::Good);
        assert_eq!(ScoreBand::for_percentage(69.9), ScoreBand::Fair);
        assert_eq!(ScoreBand::for_percentage(50.0), ScoreBand::Fair);
        assert_eq!(ScoreBand::for_percentage(49.9), ScoreBand::NeedsPractice);
    }
}
