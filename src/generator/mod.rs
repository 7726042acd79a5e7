pub mod grammar;
pub mod options;
pub mod parts_of_speech;
pub mod random;
pub mod vocabulary;

use crate::corpus::Corpus;
use crate::engine::LearnedWord;

pub use random::{FixedOrder, Randomizer, RngRandomizer};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QuestionKind {
    Vocabulary,
    Grammar,
    PartsOfSpeech,
}

impl QuestionKind {
    pub fn label(self) -> &'static str {
        match self {
            QuestionKind::Vocabulary => "Vocabulary",
            QuestionKind::Grammar => "Grammar",
            QuestionKind::PartsOfSpeech => "Parts of speech",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    pub kind: QuestionKind,
    pub word: LearnedWord,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl Question {
    pub fn is_correct(&self, answer: &str) -> bool {
        answer == self.correct_answer
    }

    /// Results key: the example's Arabic text.
    pub fn key(&self) -> &str {
        &self.word.arabic
    }
}

/// Every question that can be asked about `word`, in kind order. Vocabulary
/// and grammar questions drop out when they would offer a single option.
pub fn questions_for<R: Randomizer>(
    word: &LearnedWord,
    learned: &[LearnedWord],
    corpus: &Corpus,
    option_count: usize,
    rng: &mut R,
) -> Vec<Question> {
    let questions: Vec<Question> = [
        vocabulary::vocabulary_question(word, learned, option_count, rng),
        grammar::grammar_question(word, corpus, option_count, rng),
        parts_of_speech::parts_of_speech_question(word, corpus, rng),
    ]
    .into_iter()
    .flatten()
    .collect();
    if questions.is_empty() {
        tracing::debug!(arabic = %word.arabic, "no questions derivable");
    }
    questions
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn learned_all(corpus: &Corpus) -> Vec<LearnedWord> {
        corpus
            .rules
            .iter()
            .flat_map(|rule| rule.examples.iter().map(move |ex| LearnedWord::snapshot(ex, rule)))
            .collect()
    }

    #[test]
    fn three_questions_for_word_order_rules() {
        let corpus = Corpus::bundled().unwrap();
        let learned = learned_all(&corpus);
        let qs = questions_for(&learned[0], &learned, &corpus, 4, &mut FixedOrder::default());
        let kinds: Vec<_> = qs.iter().map(|q| q.kind).collect();
        assert_eq!(
            kinds,
            vec![QuestionKind::Vocabulary, QuestionKind::Grammar, QuestionKind::PartsOfSpeech]
        );
        assert!(qs.iter().all(|q| q.key() == learned[0].arabic));
    }

    #[test]
    fn two_questions_for_definite_article() {
        let corpus = Corpus::bundled().unwrap();
        let learned = learned_all(&corpus);
        let word = learned.last().unwrap();
        let qs = questions_for(word, &learned, &corpus, 4, &mut FixedOrder::default());
        assert_eq!(qs.len(), 2);
    }

    #[test]
    fn first_learned_word_only_gets_grammar_and_roles() {
        let corpus = Corpus::bundled().unwrap();
        let learned = learned_all(&corpus);
        let alone = &learned[..1];
        let qs = questions_for(&alone[0], alone, &corpus, 4, &mut FixedOrder::default());
        assert!(qs.iter().all(|q| q.kind != QuestionKind::Vocabulary));
        assert_eq!(qs.len(), 2);
    }

    #[test]
    fn every_question_is_well_formed() {
        let corpus = Corpus::bundled().unwrap();
        let learned = learned_all(&corpus);
        for seed in 0..25 {
            let mut rng = RngRandomizer(SmallRng::seed_from_u64(seed));
            for word in &learned {
                for q in questions_for(word, &learned, &corpus, 4, &mut rng) {
                    assert!(q.options.contains(&q.correct_answer), "{q:?}");
                    let unique: HashSet<_> = q.options.iter().collect();
                    assert_eq!(unique.len(), q.options.len(), "{q:?}");
                    assert!((2..=4).contains(&q.options.len()), "{q:?}");
                    assert!(q.is_correct(&q.correct_answer));
                }
            }
        }
    }
}
