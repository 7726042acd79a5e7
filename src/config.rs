use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::generator::options::{MAX_OPTIONS, MIN_OPTIONS};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Replaces the bundled corpus when set.
    #[serde(default)]
    pub corpus_path: Option<PathBuf>,
    #[serde(default = "default_audio_host")]
    pub audio_host: String,
    #[serde(default = "default_waitlist_url")]
    pub waitlist_url: String,
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    #[serde(default = "default_quiz_option_count")]
    pub quiz_option_count: usize,
}

fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_audio_host() -> String {
    "audio.example.org".to_string()
}
fn default_waitlist_url() -> String {
    "http://localhost:3000/api/waitlist".to_string()
}
fn default_log_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("nahw")
        .join("nahw.log")
}
fn default_quiz_option_count() -> usize {
    MAX_OPTIONS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            corpus_path: None,
            audio_host: default_audio_host(),
            waitlist_url: default_waitlist_url(),
            log_file: default_log_file(),
            quiz_option_count: default_quiz_option_count(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)?;
            toml::from_str::<Config>(&content)?
        } else {
            Config::default()
        };
        config.normalize();
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nahw")
            .join("config.toml")
    }

    /// Clamps values a hand-edited file may have pushed out of range.
    pub fn normalize(&mut self) {
        let clamped = self.quiz_option_count.clamp(MIN_OPTIONS, MAX_OPTIONS);
        if clamped != self.quiz_option_count {
            tracing::warn!(
                configured = self.quiz_option_count,
                used = clamped,
                "quiz_option_count out of range"
            );
            self.quiz_option_count = clamped;
        }
        if self.audio_host.trim().is_empty() {
            self.audio_host = default_audio_host();
        }
    }
}
