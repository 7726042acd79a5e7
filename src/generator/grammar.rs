use crate::corpus::Corpus;
use crate::engine::LearnedWord;
use crate::generator::options::{MIN_OPTIONS, build_options};
use crate::generator::random::Randomizer;
use crate::generator::{Question, QuestionKind};

/// "Which rule does this example demonstrate", drawing distractors from every
/// other rule in the corpus.
pub fn grammar_question<R: Randomizer>(
    word: &LearnedWord,
    corpus: &Corpus,
    option_count: usize,
    rng: &mut R,
) -> Option<Question> {
    let pool = corpus
        .rule_texts()
        .filter(|text| *text != word.rule)
        .map(str::to_string);
    let options = build_options(&word.rule, pool, option_count, rng);
    if options.len() < MIN_OPTIONS {
        return None;
    }
    Some(Question {
        kind: QuestionKind::Grammar,
        word: word.clone(),
        prompt: format!("Which grammar rule does \"{}\" demonstrate?", word.arabic),
        options,
        correct_answer: word.rule.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::random::FixedOrder;

    #[test]
    fn offers_every_rule_once() {
        let corpus = Corpus::bundled().unwrap();
        let rule = &corpus.rules[1];
        let word = LearnedWord::snapshot(&rule.examples[0], rule);
        let q = grammar_question(&word, &corpus, 4, &mut FixedOrder::default()).unwrap();
        assert_eq!(q.options.len(), corpus.rule_count());
        assert_eq!(q.correct_answer, rule.text);
        for text in corpus.rule_texts() {
            assert_eq!(q.options.iter().filter(|o| *o == text).count(), 1);
        }
    }

    #[test]
    fn single_rule_corpus_cannot_quiz_rules() {
        let mut corpus = Corpus::bundled().unwrap();
        corpus.rules.truncate(1);
        let rule = &corpus.rules[0];
        let word = LearnedWord::snapshot(&rule.examples[0], rule);
        assert!(grammar_question(&word, &corpus, 4, &mut FixedOrder::default()).is_none());
    }

    #[test]
    fn respects_option_cap() {
        let corpus = Corpus::bundled().unwrap();
        let rule = &corpus.rules[0];
        let word = LearnedWord::snapshot(&rule.examples[0], rule);
        let q = grammar_question(&word, &corpus, 2, &mut FixedOrder::default()).unwrap();
        assert_eq!(q.options.len(), 2);
        assert!(q.options.contains(&rule.text));
    }
}
