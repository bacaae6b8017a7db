//! Property tests for the quiz question generator: the correct answer is
//! always present exactly once (terms are distinct by construction here), and
//! the option count follows the distractor-pool size.

use chrono::Utc;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use vocab_bot::quiz::engine::generate_question;
use vocab_bot::word::{FormPair, Word, WordEntry, WordKind};

const MAX_DISTRACTORS: usize = 3;

/// 0 → translation, 1 → infinitive/past verb, 2 → past/participle verb.
fn build_pool(kinds: &[u8]) -> Vec<Word> {
    kinds
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            let entry = match kind {
                0 => WordEntry::Translation {
                    source: format!("source-{i}"),
                    target: format!("target-{i}"),
                },
                1 => WordEntry::IrregularVerb {
                    pair: FormPair::InfinitiveToPast,
                    from_form: format!("base-{i}"),
                    to_form: format!("past-{i}"),
                },
                _ => WordEntry::IrregularVerb {
                    pair: FormPair::PastToParticiple,
                    from_form: format!("past-form-{i}"),
                    to_form: format!("participle-{i}"),
                },
            };
            Word {
                id: i as i64,
                user_id: 1,
                entry,
                created_at: Utc::now(),
            }
        })
        .collect()
}

fn expected_distractors(pool: &[Word], target: &Word) -> usize {
    let count = match &target.entry {
        // Either direction draws one value per other translation word.
        WordEntry::Translation { .. } => pool
            .iter()
            .filter(|word| word.id != target.id)
            .filter(|word| word.entry.kind() == WordKind::Translation)
            .count(),
        WordEntry::IrregularVerb { pair, .. } => pool
            .iter()
            .filter(|word| word.id != target.id)
            .filter(|word| word.entry.form_pair() == Some(*pair))
            .count(),
    };
    count.min(MAX_DISTRACTORS)
}

proptest! {
    #[test]
    fn question_options_satisfy_invariants(
        kinds in proptest::collection::vec(0u8..3, 1..20),
        target_selector in any::<prop::sample::Index>(),
        seed in any::<u64>(),
    ) {
        let pool = build_pool(&kinds);
        let target = &pool[target_selector.index(pool.len())];

        let mut rng = StdRng::seed_from_u64(seed);
        let question = generate_question(&mut rng, target, &pool);

        prop_assert!(question.options.contains(&question.correct));
        prop_assert_eq!(
            question.options.len(),
            1 + expected_distractors(&pool, target)
        );

        // All term values are distinct by construction, so the correct value
        // must appear exactly once and options must not repeat.
        let occurrences = question
            .options
            .iter()
            .filter(|option| **option == question.correct)
            .count();
        prop_assert_eq!(occurrences, 1);

        let mut sorted = question.options.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), question.options.len());

        prop_assert_eq!(question.word_id, target.id);
    }
}
