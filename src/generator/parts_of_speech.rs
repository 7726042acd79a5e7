use crate::corpus::{Corpus, RoleAnnotation, RulePattern};
use crate::engine::LearnedWord;
use crate::generator::random::Randomizer;
use crate::generator::{Question, QuestionKind};

const QUOTES: &[(char, char)] = &[('\'', '\''), ('"', '"'), ('‘', '’'), ('“', '”')];

/// Start offsets of `keyword` as a whole word, ignoring ASCII case.
fn keyword_positions<'a>(text: &'a str, keyword: &'a str) -> impl Iterator<Item = usize> + 'a {
    text.char_indices().filter_map(move |(at, _)| {
        let candidate = text.get(at..at + keyword.len())?;
        if !candidate.eq_ignore_ascii_case(keyword) {
            return None;
        }
        let before = text[..at].chars().next_back();
        let after = text[at + keyword.len()..].chars().next();
        let is_word = |c: Option<char>| c.is_some_and(char::is_alphanumeric);
        (!is_word(before) && !is_word(after)).then_some(at)
    })
}

/// The quoted token right after `keyword`, e.g. `قَالَ` in
/// "The verb 'قَالَ' (said)". Only the first quoted occurrence counts.
fn quoted_after<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    keyword_positions(text, keyword).find_map(|at| {
        let rest = text[at + keyword.len()..].trim_start();
        let open = rest.chars().next()?;
        let (_, close) = QUOTES.iter().find(|(o, _)| *o == open)?;
        let body = &rest[open.len_utf8()..];
        let end = body.find(*close)?;
        let token = body[..end].trim();
        (!token.is_empty()).then_some(token)
    })
}

/// Recovers role tokens from a free-text explanation. Used for examples
/// authored without a `roles` annotation.
pub fn extract_roles(explanation: &str, pattern: RulePattern) -> Option<RoleAnnotation> {
    match pattern {
        RulePattern::VerbBeforeSubject => Some(RoleAnnotation::VerbSubject {
            verb: quoted_after(explanation, "verb")?.to_string(),
            subject: quoted_after(explanation, "subject")?.to_string(),
        }),
        RulePattern::AdjectiveAfterNoun => Some(RoleAnnotation::NounAdjective {
            noun: quoted_after(explanation, "noun")?.to_string(),
            adjective: quoted_after(explanation, "adjective")?.to_string(),
        }),
    }
}

fn roles_for(word: &LearnedWord, corpus: &Corpus) -> Option<RoleAnnotation> {
    match corpus.example_by_arabic(&word.arabic) {
        Some((rule, example)) => {
            let pattern = rule.pattern()?;
            match &example.roles {
                Some(roles) if roles.pattern() == pattern => Some(roles.clone()),
                _ => extract_roles(&example.explanation, pattern),
            }
        }
        None => extract_roles(&word.explanation, RulePattern::infer(&word.rule)?),
    }
}

/// Asks either which role a token plays or which token plays a role. `None`
/// when the word's rule is not one of the two word-order patterns or its
/// tokens cannot be determined.
pub fn parts_of_speech_question<R: Randomizer>(
    word: &LearnedWord,
    corpus: &Corpus,
    rng: &mut R,
) -> Option<Question> {
    let roles = roles_for(word, corpus)?;
    let (first_role, second_role) = roles.pattern().role_names();
    let (first_token, second_token) = roles.tokens();
    if first_token == second_token {
        return None;
    }

    let ask_role_of_token = rng.coin();
    let pick_first = rng.coin();

    let (prompt, mut options, correct) = if ask_role_of_token {
        let (token, role) = if pick_first {
            (first_token, first_role)
        } else {
            (second_token, second_role)
        };
        (
            format!("What part of speech is \"{token}\" in \"{}\"?", word.arabic),
            vec![first_role.to_string(), second_role.to_string()],
            role.to_string(),
        )
    } else {
        let (role, token) = if pick_first {
            (first_role, first_token)
        } else {
            (second_role, second_token)
        };
        (
            format!("Which word is the {} in \"{}\"?", role.to_lowercase(), word.arabic),
            vec![first_token.to_string(), second_token.to_string()],
            token.to_string(),
        )
    };
    rng.shuffle(&mut options);

    Some(Question {
        kind: QuestionKind::PartsOfSpeech,
        word: word.clone(),
        prompt,
        options,
        correct_answer: correct,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::random::FixedOrder;

    /// Replays a fixed sequence of coin flips.
    struct Coins(Vec<bool>);

    impl Randomizer for Coins {
        fn shuffle<T>(&mut self, _items: &mut [T]) {}

        fn coin(&mut self) -> bool {
            if self.0.is_empty() { false } else { self.0.remove(0) }
        }
    }

    fn word_at(corpus: &Corpus, rule: usize, example: usize) -> LearnedWord {
        let rule = &corpus.rules[rule];
        LearnedWord::snapshot(&rule.examples[example], rule)
    }

    #[test]
    fn extracts_quoted_tokens_from_explanation() {
        let text = "The verb 'قَالَ' (said) comes before the subject 'اللهُ' (Allah).";
        assert_eq!(
            extract_roles(text, RulePattern::VerbBeforeSubject),
            Some(RoleAnnotation::VerbSubject {
                verb: "قَالَ".into(),
                subject: "اللهُ".into()
            })
        );
    }

    #[test]
    fn extraction_miss_is_none() {
        let text = "The definite article 'ال' is attached to 'كِتَابُ' (book).";
        assert_eq!(extract_roles(text, RulePattern::AdjectiveAfterNoun), None);
        assert_eq!(extract_roles("verb without quotes", RulePattern::VerbBeforeSubject), None);
    }

    #[test]
    fn keyword_ignores_case_at_sentence_start() {
        let text = "Verb 'يَعْلَمُ' first. Subject 'اللهُ' second.";
        assert_eq!(
            extract_roles(text, RulePattern::VerbBeforeSubject),
            Some(RoleAnnotation::VerbSubject {
                verb: "يَعْلَمُ".into(),
                subject: "اللهُ".into(),
            })
        );
    }

    #[test]
    fn keyword_must_be_a_whole_word() {
        let text = "The adverb 'هُنَا' is no verb. The verb 'قَالَ' precedes the subject 'اللهُ'.";
        let Some(RoleAnnotation::VerbSubject { verb, .. }) =
            extract_roles(text, RulePattern::VerbBeforeSubject)
        else {
            panic!("verb and subject should be found");
        };
        assert_eq!(verb, "قَالَ");

        let text = "A pronoun 'هُوَ' then the noun 'كِتَابٌ' and adjective 'كَرِيمٌ'.";
        assert_eq!(
            extract_roles(text, RulePattern::AdjectiveAfterNoun),
            Some(RoleAnnotation::NounAdjective {
                noun: "كِتَابٌ".into(),
                adjective: "كَرِيمٌ".into(),
            })
        );
    }

    #[test]
    fn role_of_token_style() {
        let corpus = Corpus::bundled().unwrap();
        let word = word_at(&corpus, 0, 0);
        let q = parts_of_speech_question(&word, &corpus, &mut Coins(vec![true, true])).unwrap();
        assert_eq!(q.kind, QuestionKind::PartsOfSpeech);
        assert!(q.prompt.contains("\"قَالَ\""));
        assert_eq!(q.options, vec!["Verb".to_string(), "Subject".to_string()]);
        assert_eq!(q.correct_answer, "Verb");
    }

    #[test]
    fn token_for_role_style() {
        let corpus = Corpus::bundled().unwrap();
        let word = word_at(&corpus, 1, 2);
        let q = parts_of_speech_question(&word, &corpus, &mut Coins(vec![false, false])).unwrap();
        assert!(q.prompt.starts_with("Which word is the adjective"));
        assert_eq!(q.options, vec!["عَذَابٌ".to_string(), "أَلِيمٌ".to_string()]);
        assert_eq!(q.correct_answer, "أَلِيمٌ");
    }

    #[test]
    fn definite_article_rule_has_no_question() {
        let corpus = Corpus::bundled().unwrap();
        let word = word_at(&corpus, 2, 0);
        assert!(parts_of_speech_question(&word, &corpus, &mut FixedOrder::heads()).is_none());
    }

    #[test]
    fn falls_back_to_explanation_without_annotation() {
        let mut corpus = Corpus::bundled().unwrap();
        corpus.rules[0].examples[1].roles = None;
        let word = word_at(&corpus, 0, 1);
        let q = parts_of_speech_question(&word, &corpus, &mut FixedOrder::heads()).unwrap();
        assert_eq!(q.correct_answer, "Verb");
        assert!(q.prompt.contains("يَعْلَمُ"));
    }

    #[test]
    fn word_missing_from_corpus_uses_its_snapshot() {
        let corpus = Corpus::bundled().unwrap();
        let mut word = word_at(&corpus, 0, 0);
        word.arabic = "قَالَ رَبُّكَ".into();
        word.explanation = "The verb 'قَالَ' (said) comes before the subject 'رَبُّكَ' (your Lord).".into();
        let q = parts_of_speech_question(&word, &corpus, &mut FixedOrder::tails()).unwrap();
        assert_eq!(q.correct_answer, "رَبُّكَ");
    }

    #[test]
    fn unparseable_explanation_is_none() {
        let mut corpus = Corpus::bundled().unwrap();
        corpus.rules[1].examples[0].roles = None;
        corpus.rules[1].examples[0].explanation = "Noble letter.".into();
        let word = word_at(&corpus, 1, 0);
        assert!(parts_of_speech_question(&word, &corpus, &mut FixedOrder::heads()).is_none());
    }
}
