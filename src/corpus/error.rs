use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read corpus {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed corpus JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("corpus has no rules")]
    NoRules,

    #[error("corpus failed validation with {} problem(s)", .0.len())]
    Invalid(Vec<Violation>),
}

/// One broken authoring-time invariant.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("rule {rule:?} has no examples")]
    NoExamples { rule: String },

    #[error("rule text {rule:?} appears more than once")]
    DuplicateRule { rule: String },

    #[error("rule {rule:?} lists vocabulary word {word:?} twice")]
    DuplicateVocab { rule: String, word: String },

    #[error("example {arabic:?} in rule {rule:?} references lemma {lemma:?} missing from the rule's vocabulary")]
    UnknownLemma {
        rule: String,
        arabic: String,
        lemma: String,
    },

    #[error("example text {arabic:?} is used by more than one example")]
    DuplicateExample { arabic: String },

    #[error("vocabulary word {word:?} in rule {rule:?} is not the lemma of any example")]
    UnusedVocab { rule: String, word: String },

    #[error("example {arabic:?} has ayah 0")]
    InvalidAyah { arabic: String },

    #[error("example {arabic:?} cites unknown surah {surah:?}")]
    UnknownSurah { arabic: String, surah: String },

    #[error("example {arabic:?} carries role annotations that do not fit rule {rule:?}")]
    RoleMismatch { rule: String, arabic: String },
}
