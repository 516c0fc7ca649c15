//! Sampling without replacement.
//!
//! Each (language, bucket) pair keeps a shuffled draw order. Words are handed
//! out in that order until the pool runs dry, then the order is reshuffled.
//! One ChaCha8 stream drives every shuffle, so a seeded library always deals
//! the same words.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::WordError;
use crate::pack::{PackKind, WordPack};

/// Levels below this draw from the easy bucket.
const MEDIUM_FROM_LEVEL: u32 = 10;
/// Levels from here on draw from the hard bucket.
const HARD_FROM_LEVEL: u32 = 30;

/// Source of enemy words, keyed by language, level and boss flag.
pub trait WordSupplier: Send {
    /// Next word for an enemy. Fails when the language has no loaded pool.
    fn get_word(&mut self, language_key: &str, level: u32, is_boss: bool)
        -> Result<String, WordError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WordBucket {
    Easy,
    Medium,
    Hard,
    Boss,
}

impl WordBucket {
    fn index(self) -> usize {
        match self {
            WordBucket::Easy => 0,
            WordBucket::Medium => 1,
            WordBucket::Hard => 2,
            WordBucket::Boss => 3,
        }
    }
}

/// Which bucket an enemy at `level` draws from.
pub fn level_bucket(level: u32, is_boss: bool) -> WordBucket {
    if is_boss {
        WordBucket::Boss
    } else if level < MEDIUM_FROM_LEVEL {
        WordBucket::Easy
    } else if level < HARD_FROM_LEVEL {
        WordBucket::Medium
    } else {
        WordBucket::Hard
    }
}

/// A fixed list dealt in shuffled order, reshuffled when exhausted.
#[derive(Debug, Clone)]
pub struct ShuffledPool<T> {
    words: Vec<T>,
    order: Vec<usize>,
    cursor: usize,
}

impl<T> ShuffledPool<T> {
    pub fn new(words: Vec<T>) -> Self {
        Self {
            words,
            order: Vec::new(),
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words left before the next reshuffle.
    pub fn remaining(&self) -> usize {
        self.order.len() - self.cursor
    }

    pub fn draw<R: Rng>(&mut self, rng: &mut R) -> Option<&T> {
        if self.words.is_empty() {
            return None;
        }
        if self.cursor >= self.order.len() {
            self.reshuffle(rng);
        }
        let index = self.order[self.cursor];
        self.cursor += 1;
        Some(&self.words[index])
    }

    fn reshuffle<R: Rng>(&mut self, rng: &mut R) {
        let last = self.order.last().copied();
        self.order = (0..self.words.len()).collect();
        self.order.shuffle(rng);
        // No immediate repeat across the reshuffle boundary.
        if self.order.len() > 1 && self.order.first().copied() == last {
            let end = self.order.len() - 1;
            self.order.swap(0, end);
        }
        self.cursor = 0;
    }
}

#[derive(Debug, Clone)]
struct LanguagePools {
    kind: PackKind,
    buckets: [ShuffledPool<String>; 4],
}

impl LanguagePools {
    fn from_pack(pack: WordPack) -> Self {
        let b = pack.buckets;
        Self {
            kind: pack.kind,
            buckets: [
                ShuffledPool::new(b.easy),
                ShuffledPool::new(b.medium),
                ShuffledPool::new(b.hard),
                ShuffledPool::new(b.boss),
            ],
        }
    }
}

/// All loaded word packs, keyed by lowercase language.
#[derive(Debug, Clone)]
pub struct WordLibrary {
    pools: BTreeMap<String, LanguagePools>,
    rng: ChaCha8Rng,
}

impl WordLibrary {
    pub fn new(seed: u64) -> Self {
        Self {
            pools: BTreeMap::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Add a validated pack, replacing any pack for the same language.
    pub fn insert(&mut self, pack: WordPack) -> Result<(), WordError> {
        pack.validate()?;
        let language = pack.language.clone();
        debug!(language = %language, "word pack loaded");
        self.pools.insert(language, LanguagePools::from_pack(pack));
        Ok(())
    }

    pub fn is_loaded(&self, language_key: &str) -> bool {
        self.pools.contains_key(&language_key.to_lowercase())
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.pools.keys().map(String::as_str)
    }

    pub fn kind(&self, language_key: &str) -> Option<PackKind> {
        self.pools
            .get(&language_key.to_lowercase())
            .map(|pools| pools.kind)
    }
}

impl WordSupplier for WordLibrary {
    fn get_word(
        &mut self,
        language_key: &str,
        level: u32,
        is_boss: bool,
    ) -> Result<String, WordError> {
        let key = language_key.to_lowercase();
        let pools = self
            .pools
            .get_mut(&key)
            .ok_or_else(|| WordError::PoolNotLoaded(key.clone()))?;
        let bucket = level_bucket(level, is_boss);
        pools.buckets[bucket.index()]
            .draw(&mut self.rng)
            .cloned()
            .ok_or_else(|| WordError::EmptyBucket {
                language: key,
                bucket: format!("{bucket:?}").to_lowercase(),
            })
    }
}
