use serde::{Deserialize, Serialize};

use crate::corpus::{Corpus, Example, Rule, VocabItem};
use crate::engine::navigation::{Cursor, IntroOffer, NavAction};
use crate::engine::progress::ProgressTracker;
use crate::engine::results::QuizResults;

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Nav(NavAction),
    RemoveLearned(String),
    MergeResults(QuizResults),
}

impl From<NavAction> for Action {
    fn from(action: NavAction) -> Self {
        Action::Nav(action)
    }
}

/// Everything the learner has done this session, owned by one controller.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnerState {
    pub cursor: Cursor,
    pub progress: ProgressTracker,
}

impl LearnerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(state, action) -> state`.
    pub fn apply(mut self, action: impl Into<Action>, corpus: &Corpus) -> Self {
        self.dispatch(action, corpus);
        self
    }

    pub fn dispatch(&mut self, action: impl Into<Action>, corpus: &Corpus) {
        match action.into() {
            Action::Nav(nav) => self.cursor.apply(&nav, corpus, &mut self.progress),
            Action::RemoveLearned(arabic) => {
                self.progress.remove_learned(&arabic);
            }
            Action::MergeResults(results) => self.progress.merge_results(results),
        }
    }

    pub fn current_rule<'c>(&self, corpus: &'c Corpus) -> Option<&'c Rule> {
        self.cursor.rule(corpus)
    }

    pub fn current_example<'c>(&self, corpus: &'c Corpus) -> Option<&'c Example> {
        self.cursor.example(corpus)
    }

    pub fn intro_offer(&self, corpus: &Corpus) -> IntroOffer {
        self.cursor.intro_offer(corpus, &self.progress)
    }

    /// Vocabulary for the word-summary interstitial of the current rule.
    pub fn summary_vocabulary<'c>(&self, corpus: &'c Corpus) -> Vec<&'c VocabItem> {
        self.current_rule(corpus)
            .map(|rule| self.progress.covered_vocabulary(rule))
            .unwrap_or_default()
    }
}
