//! Word pack schema.
//!
//! ```json
//! {
//!   "language": "english",
//!   "kind": "language",
//!   "buckets": { "easy": [..], "medium": [..], "hard": [..], "boss": [..] }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::WordError;

/// Natural-language or programming-language pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackKind {
    Language,
    Programming,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WordBuckets {
    pub easy: Vec<String>,
    pub medium: Vec<String>,
    pub hard: Vec<String>,
    pub boss: Vec<String>,
}

impl WordBuckets {
    fn named(&self) -> [(&'static str, &Vec<String>); 4] {
        [
            ("easy", &self.easy),
            ("medium", &self.medium),
            ("hard", &self.hard),
            ("boss", &self.boss),
        ]
    }
}

/// One language's words, split by difficulty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WordPack {
    pub language: String,
    pub kind: PackKind,
    pub buckets: WordBuckets,
}

impl WordPack {
    /// Parse and validate a pack from JSON text.
    pub fn from_json(json: &str) -> Result<Self, WordError> {
        let pack: WordPack = serde_json::from_str(json)?;
        pack.validate()?;
        Ok(pack)
    }

    pub fn from_file(path: &Path) -> Result<Self, WordError> {
        let json = std::fs::read_to_string(path).map_err(|source| WordError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Every bucket must be non-empty and every word typeable: non-empty,
    /// no surrounding whitespace, no control characters.
    pub fn validate(&self) -> Result<(), WordError> {
        if self.language.trim().is_empty() {
            return Err(WordError::Validation("pack has no language key".into()));
        }
        if self.language != self.language.to_lowercase() {
            return Err(WordError::Validation(format!(
                "language key '{}' must be lowercase",
                self.language
            )));
        }
        for (name, words) in self.buckets.named() {
            if words.is_empty() {
                return Err(WordError::EmptyBucket {
                    language: self.language.clone(),
                    bucket: name.into(),
                });
            }
            if let Some(bad) = words.iter().find(|w| !is_typeable(w)) {
                return Err(WordError::Validation(format!(
                    "'{}' bucket '{name}' has untypeable entry {bad:?}",
                    self.language
                )));
            }
        }
        Ok(())
    }
}

fn is_typeable(word: &str) -> bool {
    !word.is_empty() && word.trim() == word && !word.chars().any(char::is_control)
}
