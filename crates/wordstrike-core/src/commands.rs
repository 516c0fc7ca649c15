//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::{GameMode, Key};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Begin a fresh session, discarding any session in progress.
    StartSession { mode: GameMode },
    /// A raw key event from the keyboard.
    KeyPress { key: Key },
    /// Consume one use of the bonus item in the given inventory slot.
    UseBonusItem { slot: usize },
    /// Answer the pending trivia question with a choice index.
    AnswerTrivia { choice: usize },
    Pause,
    Resume,
    /// Abandon the session (or leave the end screen) and go back to the menu.
    ReturnToMenu,
}
