use serde::{Deserialize, Serialize};

use crate::corpus::{Corpus, Example, Rule};
use crate::engine::progress::ProgressTracker;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    RuleIntro,
    ExampleBrowsing,
    WordSummary,
}

/// What the rule intro can offer the learner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntroOffer {
    ShowExamples,
    /// Every example of the rule is learned; only "next rule" remains.
    AllLearned,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavAction {
    Start,
    Advance,
    Skip,
    Acknowledge,
    NavigateToRule(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub rule_index: usize,
    pub example_index: usize,
    pub phase: Phase,
}

impl Cursor {
    pub fn showing_examples(&self) -> bool {
        self.phase == Phase::ExampleBrowsing
    }

    pub fn showing_word_summary(&self) -> bool {
        self.phase == Phase::WordSummary
    }

    pub fn rule<'c>(&self, corpus: &'c Corpus) -> Option<&'c Rule> {
        corpus.rule(self.rule_index)
    }

    pub fn example<'c>(&self, corpus: &'c Corpus) -> Option<&'c Example> {
        self.rule(corpus)?.examples.get(self.example_index)
    }

    pub fn intro_offer(&self, corpus: &Corpus, progress: &ProgressTracker) -> IntroOffer {
        match self.rule(corpus) {
            Some(rule) if progress.has_unlearned(rule) => IntroOffer::ShowExamples,
            _ => IntroOffer::AllLearned,
        }
    }

    pub fn apply(&mut self, action: &NavAction, corpus: &Corpus, progress: &mut ProgressTracker) {
        match (action, self.phase) {
            (NavAction::Start, Phase::RuleIntro) => {
                if self.intro_offer(corpus, progress) == IntroOffer::ShowExamples {
                    self.enter_example(self.example_index, corpus, progress);
                }
            }
            (NavAction::Advance, Phase::ExampleBrowsing) => {
                let count = self.rule(corpus).map_or(0, |r| r.examples.len());
                if self.example_index + 1 < count {
                    self.enter_example(self.example_index + 1, corpus, progress);
                } else if progress.has_covered() {
                    self.phase = Phase::WordSummary;
                } else {
                    self.next_rule(corpus, progress);
                }
            }
            (NavAction::Skip, Phase::RuleIntro | Phase::ExampleBrowsing) => {
                self.next_rule(corpus, progress);
            }
            (NavAction::Acknowledge, Phase::WordSummary) => {
                self.next_rule(corpus, progress);
            }
            (NavAction::NavigateToRule(text), _) => {
                self.navigate_to_rule(text, corpus, progress);
            }
            (action, phase) => {
                tracing::debug!(?action, ?phase, "navigation action ignored in this phase");
            }
        }
    }

    fn enter_example(&mut self, index: usize, corpus: &Corpus, progress: &mut ProgressTracker) {
        let Some(rule) = corpus.rule(self.rule_index) else {
            return;
        };
        let Some(example) = rule.examples.get(index) else {
            return;
        };
        self.example_index = index;
        self.phase = Phase::ExampleBrowsing;
        progress.record_exposure(example, rule);
    }

    fn next_rule(&mut self, corpus: &Corpus, progress: &mut ProgressTracker) {
        let count = corpus.rule_count().max(1);
        self.rule_index = (self.rule_index + 1) % count;
        self.example_index = 0;
        self.phase = Phase::RuleIntro;
        progress.reset_covered();
        tracing::debug!(rule_index = self.rule_index, "advanced to next rule");
    }

    fn navigate_to_rule(&mut self, text: &str, corpus: &Corpus, progress: &mut ProgressTracker) {
        let Some(index) = corpus.rule_index(text) else {
            tracing::debug!(rule = %text, "rule jump target not in corpus");
            return;
        };
        if index != self.rule_index {
            progress.reset_covered();
        }
        self.rule_index = index;
        let rule = &corpus.rules[index];
        match progress.first_unlearned(rule) {
            Some(first) => self.enter_example(first, corpus, progress),
            None => {
                self.example_index = 0;
                self.phase = Phase::RuleIntro;
            }
        }
    }
}
