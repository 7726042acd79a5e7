use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How a learner has done on one example across every quiz that asked about it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Performance {
    FullyCorrect,
    FullyIncorrect,
    Partial,
}

impl Performance {
    pub fn classify(answers: &[bool]) -> Option<Self> {
        if answers.is_empty() {
            return None;
        }
        if answers.iter().all(|&a| a) {
            Some(Performance::FullyCorrect)
        } else if answers.iter().all(|&a| !a) {
            Some(Performance::FullyIncorrect)
        } else {
            Some(Performance::Partial)
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Performance::FullyCorrect => "all correct",
            Performance::FullyIncorrect => "all incorrect",
            Performance::Partial => "partly correct",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PerformanceSummary {
    pub fully_correct: usize,
    pub fully_incorrect: usize,
    pub partial: usize,
}

/// Append-only answers per example key. Nothing here ever overwrites an
/// earlier answer; only `remove` drops a key's history.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResults {
    answers: BTreeMap<String, Vec<bool>>,
}

impl QuizResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, key: &str, correct: bool) {
        self.answers.entry(key.to_string()).or_default().push(correct);
    }

    /// Appends every list in `other` after the existing answers for that key.
    pub fn merge_append(&mut self, other: QuizResults) {
        for (key, answers) in other.answers {
            self.answers.entry(key).or_default().extend(answers);
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Vec<bool>> {
        self.answers.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&[bool]> {
        self.answers.get(key).map(Vec::as_slice)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.answers.contains_key(key)
    }

    pub fn performance(&self, key: &str) -> Option<Performance> {
        self.get(key).and_then(Performance::classify)
    }

    pub fn summary(&self) -> PerformanceSummary {
        let mut summary = PerformanceSummary::default();
        for answers in self.answers.values() {
            match Performance::classify(answers) {
                Some(Performance::FullyCorrect) => summary.fully_correct += 1,
                Some(Performance::FullyIncorrect) => summary.fully_incorrect += 1,
                Some(Performance::Partial) => summary.partial += 1,
                None => {}
            }
        }
        summary
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.answers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_examples() {
        assert_eq!(Performance::classify(&[true]), Some(Performance::FullyCorrect));
        assert_eq!(
            Performance::classify(&[false, false]),
            Some(Performance::FullyIncorrect)
        );
        assert_eq!(Performance::classify(&[true, false]), Some(Performance::Partial));
        assert_eq!(Performance::classify(&[]), None);
    }

    #[test]
    fn record_appends_in_order() {
        let mut results = QuizResults::new();
        results.record("a", true);
        results.record("a", false);
        assert_eq!(results.get("a"), Some(&[true, false][..]));
        assert_eq!(results.performance("a"), Some(Performance::Partial));
    }

    #[test]
    fn merge_appends_instead_of_replacing() {
        let mut existing = QuizResults::new();
        existing.record("a", true);
        existing.record("b", false);

        let mut session = QuizResults::new();
        session.record("a", false);
        session.record("c", true);

        existing.merge_append(session);
        assert_eq!(existing.get("a"), Some(&[true, false][..]));
        assert_eq!(existing.get("b"), Some(&[false][..]));
        assert_eq!(existing.get("c"), Some(&[true][..]));
    }

    #[test]
    fn remove_drops_history() {
        let mut results = QuizResults::new();
        results.record("a", true);
        assert_eq!(results.remove("a"), Some(vec![true]));
        assert!(results.get("a").is_none());
        assert!(results.performance("a").is_none());
        assert_eq!(results.remove("a"), None);
    }

    #[test]
    fn summary_counts_each_class() {
        let mut results = QuizResults::new();
        results.record("a", true);
        results.record("b", false);
        results.record("b", false);
        results.record("c", true);
        results.record("c", false);
        assert_eq!(
            results.summary(),
            PerformanceSummary {
                fully_correct: 1,
                fully_incorrect: 1,
                partial: 1
            }
        );
    }
}
