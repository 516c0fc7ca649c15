//! Trivia bank.
//!
//! ```json
//! { "questions": [
//!     { "prompt": "..", "choices": ["..", ".."], "answer": 1, "language": "rust" }
//! ] }
//! ```
//!
//! Questions without a `language` are general and offered in every mode.

use std::collections::BTreeMap;
use std::path::Path;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::WordError;
use crate::pool::ShuffledPool;

/// Supplies trivia prompts between boss fights.
pub trait TriviaSource: Send {
    /// Next question for this language, or `None` if the bank has none.
    fn next_question(&mut self, language_key: &str) -> Option<TriviaQuestion>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TriviaQuestion {
    pub prompt: String,
    pub choices: Vec<String>,
    /// Index into `choices`.
    pub answer: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl TriviaQuestion {
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.answer
    }

    fn validate(&self, index: usize) -> Result<(), WordError> {
        let fail = |what: &str| Err(WordError::Validation(format!("question {index}: {what}")));
        if self.prompt.trim().is_empty() {
            return fail("empty prompt");
        }
        if self.choices.len() < 2 {
            return fail("needs at least two choices");
        }
        if self.choices.iter().any(|c| c.trim().is_empty()) {
            return fail("empty choice");
        }
        if self.answer >= self.choices.len() {
            return fail("answer index out of range");
        }
        Ok(())
    }

    fn applies_to(&self, language_key: &str) -> bool {
        self.language
            .as_deref()
            .map_or(true, |l| l.eq_ignore_ascii_case(language_key))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TriviaFile {
    questions: Vec<TriviaQuestion>,
}

/// Validated questions dealt without repeats per language.
#[derive(Debug, Clone)]
pub struct TriviaBank {
    questions: Vec<TriviaQuestion>,
    decks: BTreeMap<String, ShuffledPool<usize>>,
    rng: ChaCha8Rng,
}

impl TriviaBank {
    pub fn new(questions: Vec<TriviaQuestion>, seed: u64) -> Result<Self, WordError> {
        for (index, question) in questions.iter().enumerate() {
            question.validate(index)?;
        }
        Ok(Self {
            questions,
            decks: BTreeMap::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// A bank with no questions; every prompt is skipped.
    pub fn empty(seed: u64) -> Self {
        Self {
            questions: Vec::new(),
            decks: BTreeMap::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_json(json: &str, seed: u64) -> Result<Self, WordError> {
        let file: TriviaFile = serde_json::from_str(json)?;
        Self::new(file.questions, seed)
    }

    pub fn from_file(path: &Path, seed: u64) -> Result<Self, WordError> {
        let json = std::fs::read_to_string(path).map_err(|source| WordError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json, seed)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl TriviaSource for TriviaBank {
    fn next_question(&mut self, language_key: &str) -> Option<TriviaQuestion> {
        let key = language_key.to_lowercase();
        let questions = &self.questions;
        let deck = self.decks.entry(key.clone()).or_insert_with(|| {
            ShuffledPool::new(
                questions
                    .iter()
                    .enumerate()
                    .filter(|(_, q)| q.applies_to(&key))
                    .map(|(i, _)| i)
                    .collect(),
            )
        });
        let index = *deck.draw(&mut self.rng)?;
        self.questions.get(index).cloned()
    }
}
