use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Video metadata as returned by the video source (title, channel, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoMetadata(Map<String, Value>);

impl VideoMetadata {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title").and_then(Value::as_str)
    }

    pub fn channel(&self) -> Option<&str> {
        self.get("author_name").and_then(Value::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for VideoMetadata {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Compact JSON, the form embedded in prompts
impl fmt::Display for VideoMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(&self.0).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// Caption text of a video in one language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captions {
    text: String,
    language: String,
}

impl Captions {
    /// Returns `None` when the text holds no words
    pub fn new(text: impl Into<String>, language: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }
        Some(Self {
            text,
            language: language.into(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// A word-bounded slice of the captions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub index: usize,
    pub text: String,
    pub word_count: usize,
}

/// Everything a completed run produced
#[derive(Debug, Clone)]
pub struct RunReport {
    pub url: String,
    pub metadata: VideoMetadata,
    pub chunk_count: usize,
    pub chunk_summaries: Vec<String>,
    pub summary: String,
}
