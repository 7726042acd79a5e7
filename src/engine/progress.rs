use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::corpus::{Example, Rule, VocabItem};
use crate::engine::results::{Performance, QuizResults};

/// Denominator for the headline progress figure: every word of the Quran.
pub const TOTAL_QURAN_WORDS: usize = 77_430;

/// Snapshot of an example and its rule, taken the first time it is shown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnedWord {
    pub arabic: String,
    pub translation: String,
    pub rule: String,
    pub surah: String,
    pub ayah: u32,
    pub explanation: String,
}

impl LearnedWord {
    pub fn snapshot(example: &Example, rule: &Rule) -> Self {
        Self {
            arabic: example.arabic.clone(),
            translation: example.translation.clone(),
            rule: rule.text.clone(),
            surah: example.surah.clone(),
            ayah: example.ayah,
            explanation: example.explanation.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressTracker {
    learned: Vec<LearnedWord>,
    covered: BTreeSet<String>,
    results: QuizResults,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `example` as shown. Returns true when it was not learned before.
    /// The example joins the current rule's covered set either way.
    pub fn record_exposure(&mut self, example: &Example, rule: &Rule) -> bool {
        self.covered.insert(example.arabic.clone());
        if self.is_learned(&example.arabic) {
            return false;
        }
        self.learned.push(LearnedWord::snapshot(example, rule));
        tracing::debug!(arabic = %example.arabic, learned = self.learned.len(), "new word learned");
        true
    }

    /// Drops a learned word and every quiz answer recorded for it.
    pub fn remove_learned(&mut self, arabic: &str) -> Option<LearnedWord> {
        let pos = self.learned.iter().position(|w| w.arabic == arabic)?;
        let removed = self.learned.remove(pos);
        self.results.remove(arabic);
        tracing::debug!(%arabic, "learned word removed");
        Some(removed)
    }

    pub fn is_learned(&self, arabic: &str) -> bool {
        self.learned.iter().any(|w| w.arabic == arabic)
    }

    pub fn learned(&self) -> &[LearnedWord] {
        &self.learned
    }

    pub fn learned_count(&self) -> usize {
        self.learned.len()
    }

    pub fn progress_ratio(&self) -> f64 {
        (self.learned.len() as f64 / TOTAL_QURAN_WORDS as f64).clamp(0.0, 1.0)
    }

    pub fn first_unlearned(&self, rule: &Rule) -> Option<usize> {
        rule.examples.iter().position(|e| !self.is_learned(&e.arabic))
    }

    pub fn has_unlearned(&self, rule: &Rule) -> bool {
        self.first_unlearned(rule).is_some()
    }

    pub fn covered_examples(&self) -> &BTreeSet<String> {
        &self.covered
    }

    pub fn has_covered(&self) -> bool {
        !self.covered.is_empty()
    }

    pub fn reset_covered(&mut self) {
        self.covered.clear();
    }

    /// Vocabulary of `rule` introduced by the examples covered so far, in the
    /// rule's own vocabulary order.
    pub fn covered_vocabulary<'r>(&self, rule: &'r Rule) -> Vec<&'r VocabItem> {
        let lemmas: HashSet<&str> = rule
            .examples
            .iter()
            .filter(|e| self.covered.contains(&e.arabic))
            .flat_map(|e| e.lemma.words())
            .map(String::as_str)
            .collect();
        rule.vocabulary
            .iter()
            .filter(|v| lemmas.contains(v.word.as_str()))
            .collect()
    }

    pub fn results(&self) -> &QuizResults {
        &self.results
    }

    pub fn merge_results(&mut self, session: QuizResults) {
        tracing::info!(examples = session.len(), "merging quiz results");
        self.results.merge_append(session);
    }

    pub fn performance(&self, arabic: &str) -> Option<Performance> {
        self.results.performance(arabic)
    }
}
