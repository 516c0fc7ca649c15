//! Word and trivia data for WORDSTRIKE.
//!
//! Word packs and trivia banks are JSON documents deserialized into typed
//! structs and validated before use. The simulation only sees the
//! `WordSupplier` and `TriviaSource` traits, so tests can swap in scripted
//! sources.

pub mod builtin;
pub mod error;
pub mod pack;
pub mod pool;
pub mod trivia;

pub use error::WordError;
pub use pack::{PackKind, WordBuckets, WordPack};
pub use pool::{level_bucket, ShuffledPool, WordBucket, WordLibrary, WordSupplier};
pub use trivia::{TriviaBank, TriviaQuestion, TriviaSource};
