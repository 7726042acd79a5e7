use crate::engine::LearnedWord;
use crate::generator::options::{MIN_OPTIONS, build_options};
use crate::generator::random::Randomizer;
use crate::generator::{Question, QuestionKind};

/// "Translate this Arabic text", with other learned translations as distractors.
pub fn vocabulary_question<R: Randomizer>(
    word: &LearnedWord,
    learned: &[LearnedWord],
    option_count: usize,
    rng: &mut R,
) -> Option<Question> {
    let pool = learned
        .iter()
        .filter(|other| other.arabic != word.arabic)
        .map(|other| other.translation.clone());
    let options = build_options(&word.translation, pool, option_count, rng);
    if options.len() < MIN_OPTIONS {
        return None;
    }
    Some(Question {
        kind: QuestionKind::Vocabulary,
        word: word.clone(),
        prompt: format!("What does \"{}\" mean?", word.arabic),
        options,
        correct_answer: word.translation.clone(),
    })
}
