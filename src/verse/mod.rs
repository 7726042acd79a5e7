pub mod highlight;
pub mod surah;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

const BUNDLED_VERSES: &str = include_str!("../../assets/verses.json");

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseDetail {
    pub arabic: String,
    pub translation: String,
}

/// Full verse text keyed by `"<Surah>-<Ayah>"`.
#[derive(Clone, Debug, Default)]
pub struct VerseTable {
    verses: HashMap<String, VerseDetail>,
}

impl VerseTable {
    pub fn bundled() -> Self {
        let verses = serde_json::from_str(BUNDLED_VERSES).unwrap_or_else(|err| {
            tracing::warn!(%err, "bundled verse table is malformed; verse popups will be empty");
            HashMap::new()
        });
        Self { verses }
    }

    pub fn key(surah: &str, ayah: u32) -> String {
        format!("{surah}-{ayah}")
    }

    pub fn get(&self, surah: &str, ayah: u32) -> Option<&VerseDetail> {
        self.verses.get(&Self::key(surah, ayah))
    }

    pub fn arabic_or_empty(&self, surah: &str, ayah: u32) -> &str {
        self.get(surah, ayah).map_or("", |v| v.arabic.as_str())
    }

    pub fn translation_or_empty(&self, surah: &str, ayah: u32) -> &str {
        self.get(surah, ayah).map_or("", |v| v.translation.as_str())
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }
}
