//! Packs compiled into the binary, used when no data directory is given.

use crate::error::WordError;
use crate::pack::WordPack;
use crate::pool::WordLibrary;
use crate::trivia::TriviaBank;

const ENGLISH_PACK: &str = include_str!("../data/english.json");
const RUST_PACK: &str = include_str!("../data/rust.json");
const TRIVIA_BANK: &str = include_str!("../data/trivia.json");

/// The word packs shipped with the game.
pub fn builtin_packs() -> Result<Vec<WordPack>, WordError> {
    [ENGLISH_PACK, RUST_PACK]
        .into_iter()
        .map(WordPack::from_json)
        .collect()
}

/// A library holding every built-in pack.
pub fn builtin_library(seed: u64) -> Result<WordLibrary, WordError> {
    let mut library = WordLibrary::new(seed);
    for pack in builtin_packs()? {
        library.insert(pack)?;
    }
    Ok(library)
}

pub fn builtin_trivia(seed: u64) -> Result<TriviaBank, WordError> {
    TriviaBank::from_json(TRIVIA_BANK, seed)
}
