use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use lazy_static::lazy_static;
use crate::error::QuizError;
use crate::paths::app_data_file;

pub const CONFIG_FILE: &str = "kanji-drill.toml";
pub const LEDGER_FILE: &str = "kanji_wrong_counts_v1.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QuizConfig {
    /// Questions per session.
    pub question_count: usize,
    /// Share of questions asked in write mode.
    pub write_ratio: f64,
    /// Wrong options shown next to the correct one.
    pub distractor_count: usize,
    pub bank_path: PathBuf,
    pub ledger_path: Option<PathBuf>,
    pub log_json: bool,
}

impl Default for QuizConfig {
    fn default() -> Self {
        QuizConfig {
            question_count: 10,
            write_ratio: 0.3,
            distractor_count: 3,
            bank_path: PathBuf::from("questions.json"),
            ledger_path: None,
            log_json: false,
        }
    }
}

impl QuizConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, QuizError> {
        Ok(toml::from_str::<QuizConfig>(content)?)
    }

    /// Ledger file location, defaulting to the app data directory.
    pub fn resolved_ledger_path(&self) -> PathBuf {
        self.ledger_path
            .clone()
            .unwrap_or_else(|| app_data_file(LEDGER_FILE))
    }
}

/// Load config from `path`, using defaults when the file is missing or invalid.
pub fn load_quiz_config(path: &Path) -> QuizConfig {
    match fs::read_to_string(path) {
        Ok(content) => match QuizConfig::from_toml_str(&content) {
            Ok(config) => {
                tracing::info!(path = ?path, "Loaded quiz config");
                config
            }
            Err(e) => {
                tracing::warn!(path = ?path, error = %e, "Failed to parse quiz config, using defaults");
                QuizConfig::default()
            }
        },
        Err(e) => {
            tracing::debug!(path = ?path, error = %e, "No quiz config, using defaults");
            QuizConfig::default()
        }
    }
}

lazy_static! {
    static ref QUIZ_CONFIG: QuizConfig = load_quiz_config(&app_data_file(CONFIG_FILE));
}

/// Get the cached default-location config (loaded on first use)
pub fn get_quiz_config() -> &'static QuizConfig {
    &QUIZ_CONFIG
}
