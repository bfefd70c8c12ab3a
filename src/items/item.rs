use serde::{Deserialize, Serialize};
use crate::items::reading::normalize_reading;

/// One quiz entry, keyed by its kanji.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "kanji")]
    pub identity: String,
    /// First entry is the canonical answer for read mode.
    #[serde(rename = "yomi")]
    pub readings: Vec<String>,
    #[serde(rename = "example_read", default)]
    pub prompt_text: String,
    #[serde(rename = "example_write", default)]
    pub write_context: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl Item {
    pub fn new<S: Into<String>>(identity: S, readings: Vec<String>) -> Self {
        Item {
            identity: identity.into(),
            readings,
            prompt_text: String::new(),
            write_context: String::new(),
            hint: None,
        }
    }

    pub fn with_prompt_text<S: Into<String>>(mut self, text: S) -> Self {
        self.prompt_text = text.into();
        self
    }

    pub fn with_write_context<S: Into<String>>(mut self, text: S) -> Self {
        self.write_context = text.into();
        self
    }

    pub fn with_hint<S: Into<String>>(mut self, hint: S) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Normalized first reading; the expected answer in read mode.
    pub fn canonical_reading(&self) -> String {
        self.readings
            .first()
            .map(|r| normalize_reading(r))
            .unwrap_or_default()
    }

    /// Normalized hint when present and non-empty, else the canonical reading.
    pub fn primary_reading(&self) -> String {
        match self.hint.as_deref().map(normalize_reading) {
            Some(hint) if !hint.is_empty() => hint,
            _ => self.canonical_reading(),
        }
    }

    pub fn normalized_readings(&self) -> impl Iterator<Item = String> + '_ {
        self.readings.iter().map(|r| normalize_reading(r))
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl Eq for Item {}
