use std::collections::HashSet;

use crate::corpus::error::Violation;
use crate::corpus::{Corpus, CorpusError};
use crate::verse::surah::surah_number;

impl Corpus {
    /// Every broken authoring-time invariant, in corpus order.
    pub fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        let mut rule_texts = HashSet::new();
        let mut example_keys = HashSet::new();

        for rule in &self.rules {
            if !rule_texts.insert(rule.text.as_str()) {
                out.push(Violation::DuplicateRule {
                    rule: rule.text.clone(),
                });
            }
            if rule.examples.is_empty() {
                out.push(Violation::NoExamples {
                    rule: rule.text.clone(),
                });
            }

            let mut vocab_words = HashSet::new();
            for item in &rule.vocabulary {
                if !vocab_words.insert(item.word.as_str()) {
                    out.push(Violation::DuplicateVocab {
                        rule: rule.text.clone(),
                        word: item.word.clone(),
                    });
                }
            }

            let pattern = rule.pattern();
            for example in &rule.examples {
                if !example_keys.insert(example.arabic.as_str()) {
                    out.push(Violation::DuplicateExample {
                        arabic: example.arabic.clone(),
                    });
                }
                for lemma in example.lemma.words() {
                    if !vocab_words.contains(lemma.as_str()) {
                        out.push(Violation::UnknownLemma {
                            rule: rule.text.clone(),
                            arabic: example.arabic.clone(),
                            lemma: lemma.clone(),
                        });
                    }
                }
                if example.ayah == 0 {
                    out.push(Violation::InvalidAyah {
                        arabic: example.arabic.clone(),
                    });
                }
                if surah_number(&example.surah).is_none() {
                    out.push(Violation::UnknownSurah {
                        arabic: example.arabic.clone(),
                        surah: example.surah.clone(),
                    });
                }
                if let Some(roles) = &example.roles {
                    if pattern != Some(roles.pattern()) {
                        out.push(Violation::RoleMismatch {
                            rule: rule.text.clone(),
                            arabic: example.arabic.clone(),
                        });
                    }
                }
            }

            for item in &rule.vocabulary {
                let used = rule.examples.iter().any(|e| e.lemma.contains(&item.word));
                if !used {
                    out.push(Violation::UnusedVocab {
                        rule: rule.text.clone(),
                        word: item.word.clone(),
                    });
                }
            }
        }

        out
    }

    pub fn validate(&self) -> Result<(), CorpusError> {
        let violations = self.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            for v in &violations {
                tracing::warn!(violation = %v, "corpus invariant broken");
            }
            Err(CorpusError::Invalid(violations))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::corpus::error::Violation;
    use crate::corpus::{Corpus, CorpusError, Lemma, RoleAnnotation};

    fn bundled() -> Corpus {
        Corpus::bundled().unwrap()
    }

    #[test]
    fn bundled_corpus_is_valid() {
        assert_eq!(bundled().violations(), Vec::new());
        assert!(bundled().validate().is_ok());
    }

    #[test]
    fn reports_duplicate_example_text() {
        let mut corpus = bundled();
        let dup = corpus.rules[0].examples[0].clone();
        corpus.rules[0].examples.push(dup);
        let violations = corpus.violations();
        assert!(violations
            .iter()
            .any(|v| matches!(v, Violation::DuplicateExample { arabic } if arabic == "قَالَ اللهُ")));
    }

    #[test]
    fn reports_foreign_lemma() {
        let mut corpus = bundled();
        // "كَرِيم" belongs to the adjective rule, not the verb rule.
        corpus.rules[0].examples[1].lemma = Lemma::Many(vec!["اللهُ".into(), "كَرِيم".into()]);
        let violations = corpus.violations();
        assert_eq!(violations.len(), 1);
        assert!(matches!(&violations[0], Violation::UnknownLemma { lemma, .. } if lemma == "كَرِيم"));
    }

    #[test]
    fn reports_unused_vocab_and_empty_rule() {
        let mut corpus = bundled();
        corpus.rules[2].examples.clear();
        let violations = corpus.violations();
        assert!(violations.iter().any(|v| matches!(v, Violation::NoExamples { .. })));
        let unused = violations
            .iter()
            .filter(|v| matches!(v, Violation::UnusedVocab { .. }))
            .count();
        assert_eq!(unused, 3);
    }

    #[test]
    fn reports_roles_that_do_not_fit_pattern() {
        let mut corpus = bundled();
        corpus.rules[0].examples[0].roles = Some(RoleAnnotation::NounAdjective {
            noun: "x".into(),
            adjective: "y".into(),
        });
        assert!(corpus
            .violations()
            .iter()
            .any(|v| matches!(v, Violation::RoleMismatch { .. })));
    }

    #[test]
    fn validate_collects_everything() {
        let mut corpus = bundled();
        corpus.rules[1].examples[0].ayah = 0;
        corpus.rules[1].examples[1].surah = "Nowhere".into();
        corpus.rules.push(corpus.rules[2].clone());
        match corpus.validate() {
            Err(CorpusError::Invalid(v)) => assert!(v.len() >= 3),
            other => panic!("expected invalid corpus, got {other:?}"),
        }
    }
}
