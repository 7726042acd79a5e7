pub mod error;
pub mod validate;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub use error::CorpusError;

const BUNDLED_CORPUS: &str = include_str!("../../assets/corpus.json");

/// Grammar patterns the parts-of-speech questions know how to quiz.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RulePattern {
    VerbBeforeSubject,
    AdjectiveAfterNoun,
}

impl RulePattern {
    /// Fallback for corpora authored without an explicit `pattern`.
    pub fn infer(rule_text: &str) -> Option<Self> {
        let lower = rule_text.to_lowercase();
        if lower.contains("verb") && lower.contains("before the subject") {
            Some(RulePattern::VerbBeforeSubject)
        } else if lower.contains("adjective") && lower.contains("after the noun") {
            Some(RulePattern::AdjectiveAfterNoun)
        } else {
            None
        }
    }

    /// Role names in sentence order, e.g. `("Verb", "Subject")`.
    pub fn role_names(self) -> (&'static str, &'static str) {
        match self {
            RulePattern::VerbBeforeSubject => ("Verb", "Subject"),
            RulePattern::AdjectiveAfterNoun => ("Noun", "Adjective"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabItem {
    pub word: String,
    pub translation: String,
    pub part_of_speech: String,
}

/// One lemma or several; examples like "كِتَابٌ كَرِيمٌ" carry two.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Lemma {
    One(String),
    Many(Vec<String>),
}

impl Lemma {
    pub fn words(&self) -> &[String] {
        match self {
            Lemma::One(word) => std::slice::from_ref(word),
            Lemma::Many(words) => words,
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words().iter().any(|w| w == word)
    }
}

/// Surface tokens of the two words a parts-of-speech question asks about.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleAnnotation {
    VerbSubject { verb: String, subject: String },
    NounAdjective { noun: String, adjective: String },
}

impl RoleAnnotation {
    pub fn pattern(&self) -> RulePattern {
        match self {
            RoleAnnotation::VerbSubject { .. } => RulePattern::VerbBeforeSubject,
            RoleAnnotation::NounAdjective { .. } => RulePattern::AdjectiveAfterNoun,
        }
    }

    /// Tokens in sentence order, matching `RulePattern::role_names`.
    pub fn tokens(&self) -> (&str, &str) {
        match self {
            RoleAnnotation::VerbSubject { verb, subject } => (verb, subject),
            RoleAnnotation::NounAdjective { noun, adjective } => (noun, adjective),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    pub arabic: String,
    pub lemma: Lemma,
    pub translation: String,
    pub explanation: String,
    pub surah: String,
    pub ayah: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<RoleAnnotation>,
}

impl Example {
    pub fn verse_key(&self) -> String {
        format!("{}-{}", self.surah, self.ayah)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<RulePattern>,
    pub vocabulary: Vec<VocabItem>,
    pub examples: Vec<Example>,
}

impl Rule {
    pub fn pattern(&self) -> Option<RulePattern> {
        self.pattern.or_else(|| RulePattern::infer(&self.text))
    }

    pub fn vocab(&self, word: &str) -> Option<&VocabItem> {
        self.vocabulary.iter().find(|v| v.word == word)
    }

    pub fn example_index(&self, arabic: &str) -> Option<usize> {
        self.examples.iter().position(|e| e.arabic == arabic)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    pub rules: Vec<Rule>,
}

impl Corpus {
    /// The corpus compiled into the binary.
    pub fn bundled() -> Result<Self, CorpusError> {
        Self::from_json(BUNDLED_CORPUS)
    }

    pub fn from_json(json: &str) -> Result<Self, CorpusError> {
        let corpus: Corpus = serde_json::from_str(json)?;
        if corpus.rules.is_empty() {
            return Err(CorpusError::NoRules);
        }
        Ok(corpus)
    }

    pub fn load(path: &Path) -> Result<Self, CorpusError> {
        let json = fs::read_to_string(path).map_err(|source| CorpusError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn rule(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    pub fn rule_index(&self, text: &str) -> Option<usize> {
        self.rules.iter().position(|r| r.text == text)
    }

    pub fn rule_by_text(&self, text: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.text == text)
    }

    /// Finds an example by its global `arabic` key together with its rule.
    pub fn example_by_arabic(&self, arabic: &str) -> Option<(&Rule, &Example)> {
        self.rules.iter().find_map(|rule| {
            rule.examples
                .iter()
                .find(|e| e.arabic == arabic)
                .map(|example| (rule, example))
        })
    }

    pub fn rule_texts(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.text.as_str())
    }

    pub fn example_count(&self) -> usize {
        self.rules.iter().map(|r| r.examples.len()).sum()
    }
}
