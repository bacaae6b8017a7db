use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use crate::word::{FormPair, Word, WordEntry, WordId};

const MAX_DISTRACTORS: usize = 3;

/// A rendered multiple-choice question. `options` always contains `correct`;
/// with an empty distractor pool it is the only option.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub prompt: String,
    pub correct: String,
    pub options: Vec<String>,
    pub word_id: WordId,
}

/// Builds a question for `target`, drawing distractors from the other words
/// in `pool`. For translations the direction is a fresh coin flip each call;
/// for irregular verbs the distractor pool is restricted to words linking the
/// same two forms. Distractor values are not deduplicated.
pub fn generate_question<R: Rng>(rng: &mut R, target: &Word, pool: &[Word]) -> Question {
    let (prompt, correct, wrong_pool) = match &target.entry {
        WordEntry::Translation { source, target: translation } => {
            if rng.random_bool(0.5) {
                (
                    format!("What is the translation of \"{source}\"?"),
                    translation.clone(),
                    collect_translation_targets(pool, target.id),
                )
            } else {
                (
                    format!("What is the translation of \"{translation}\"?"),
                    source.clone(),
                    collect_translation_sources(pool, target.id),
                )
            }
        }
        WordEntry::IrregularVerb { pair, from_form, to_form } => {
            let prompt = match pair {
                FormPair::InfinitiveToPast => {
                    format!("What is the second form (Past Simple) of \"{from_form}\"?")
                }
                FormPair::PastToParticiple => {
                    format!("What is the third form (Past Participle) of \"{from_form}\"?")
                }
            };
            (prompt, to_form.clone(), collect_verb_forms(pool, target.id, *pair))
        }
    };

    let mut options: Vec<String> = wrong_pool
        .choose_multiple(rng, MAX_DISTRACTORS)
        .cloned()
        .collect();
    options.push(correct.clone());
    options.shuffle(rng);

    Question {
        prompt,
        correct,
        options,
        word_id: target.id,
    }
}

fn collect_translation_targets(pool: &[Word], exclude: WordId) -> Vec<String> {
    pool.iter()
        .filter(|word| word.id != exclude)
        .filter_map(|word| match &word.entry {
            WordEntry::Translation { target, .. } => Some(target.clone()),
            WordEntry::IrregularVerb { .. } => None,
        })
        .collect()
}

fn collect_translation_sources(pool: &[Word], exclude: WordId) -> Vec<String> {
    pool.iter()
        .filter(|word| word.id != exclude)
        .filter_map(|word| match &word.entry {
            WordEntry::Translation { source, .. } => Some(source.clone()),
            WordEntry::IrregularVerb { .. } => None,
        })
        .collect()
}

fn collect_verb_forms(pool: &[Word], exclude: WordId, pair: FormPair) -> Vec<String> {
    pool.iter()
        .filter(|word| word.id != exclude)
        .filter_map(|word| match &word.entry {
            WordEntry::IrregularVerb { pair: other, to_form, .. } if *other == pair => {
                Some(to_form.clone())
            }
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn translation(id: WordId, source: &str, target: &str) -> Word {
        Word {
            id,
            user_id: 1,
            entry: WordEntry::Translation {
                source: source.to_string(),
                target: target.to_string(),
            },
            created_at: Utc::now(),
        }
    }

    fn verb(id: WordId, pair: FormPair, from_form: &str, to_form: &str) -> Word {
        Word {
            id,
            user_id: 1,
            entry: WordEntry::IrregularVerb {
                pair,
                from_form: from_form.to_string(),
                to_form: to_form.to_string(),
            },
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_lone_word_yields_single_option() {
        let word = translation(1, "cat", "кошка");
        let pool = vec![word.clone()];
        let mut rng = StdRng::seed_from_u64(7);
        let question = generate_question(&mut rng, &word, &pool);
        assert_eq!(question.options, vec![question.correct.clone()]);
    }

    #[test]
    fn test_large_pool_caps_at_four_options() {
        let pool: Vec<Word> = (0..10)
            .map(|i| translation(i, &format!("word{i}"), &format!("слово{i}")))
            .collect();
        let mut rng = StdRng::seed_from_u64(7);
        let question = generate_question(&mut rng, &pool[0], &pool);
        assert_eq!(question.options.len(), 4);
        assert!(question.options.contains(&question.correct));
    }

    #[test]
    fn test_distractors_come_from_other_words() {
        let pool: Vec<Word> = (0..5)
            .map(|i| translation(i, &format!("word{i}"), &format!("слово{i}")))
            .collect();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let question = generate_question(&mut rng, &pool[2], &pool);
            let matches = question
                .options
                .iter()
                .filter(|option| **option == question.correct)
                .count();
            assert_eq!(matches, 1, "correct answer duplicated (seed {seed})");
        }
    }

    #[test]
    fn test_verb_distractors_respect_form_pair() {
        let target = verb(1, FormPair::InfinitiveToPast, "go", "went");
        let pool = vec![
            target.clone(),
            verb(2, FormPair::InfinitiveToPast, "see", "saw"),
            verb(3, FormPair::PastToParticiple, "went", "gone"),
            verb(4, FormPair::PastToParticiple, "saw", "seen"),
        ];
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let question = generate_question(&mut rng, &target, &pool);
            assert_eq!(question.options.len(), 2);
            assert!(question.options.contains(&"went".to_string()));
            assert!(question.options.contains(&"saw".to_string()));
            assert!(!question.options.contains(&"gone".to_string()));
        }
    }

    #[test]
    fn test_translation_direction_varies() {
        let pool: Vec<Word> = (0..3)
            .map(|i| translation(i, &format!("word{i}"), &format!("слово{i}")))
            .collect();
        let mut asked_source = false;
        let mut asked_target = false;
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let question = generate_question(&mut rng, &pool[0], &pool);
            if question.prompt.contains("word0") {
                asked_source = true;
            }
            if question.prompt.contains("слово0") {
                asked_target = true;
            }
        }
        assert!(asked_source && asked_target);
    }
}
