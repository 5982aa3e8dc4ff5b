use std::collections::BTreeMap;
use std::path::PathBuf;

/// Result of splitting a transcript file into header and body
#[derive(Debug, Clone)]
pub struct ParsedTranscript {
    /// Key/value pairs from the `---` header
    pub metadata: TranscriptMetadata,
    /// Body text after the header, trimmed
    pub transcript: String,
    /// Name of the directory holding the transcript (e.g., "marty-cagan")
    pub episode_slug: String,
    /// Path the transcript was read from
    pub filepath: PathBuf,
}

/// Header fields, kept as raw strings until a caller asks for a number
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranscriptMetadata {
    fields: BTreeMap<String, String>,
}

impl TranscriptMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Get a field as text
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Get a field as text, or a fallback when missing
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Get a field as a number; `None` when missing or not numeric
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(|v| v.trim().parse::<f64>().ok())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
