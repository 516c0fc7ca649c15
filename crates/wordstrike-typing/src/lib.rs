//! Typing matcher for WORDSTRIKE.
//!
//! A small state machine that consumes raw key events against the live enemy
//! list and decides which enemy holds input focus and how far into its word
//! the player has typed. It never mutates enemies itself: every call returns a
//! `MatchOutcome` that the simulation applies. No ECS dependency.

pub mod matcher;
pub mod text;

pub use matcher::{KeyContext, MatchOutcome, Repair, TargetView, TypingMatcher, TypingState};

pub use wordstrike_core as core;

#[cfg(test)]
mod tests;
