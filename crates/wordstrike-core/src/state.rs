//! Game state snapshot: the complete visible state handed to the presentation layer each tick.
//!
//! Snapshots are copies; the presentation layer never mutates simulation state.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::session::BonusItem;
use crate::types::{EnemyId, Position, SimTime};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub mode: Option<GameMode>,
    /// Live enemies in spawn order.
    pub enemies: Vec<EnemyView>,
    pub hud: HudView,
    pub trivia: Option<TriviaView>,
    pub events: Vec<GameEvent>,
}

/// One enemy as the renderer sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: EnemyId,
    pub word: String,
    pub position: Position,
    /// Ship facing (radians).
    pub heading: f64,
    pub typed_characters: usize,
    pub is_boss: bool,
    pub enemy_type: EnemyType,
    pub health: u32,
    pub max_health: u32,
    /// Whether this enemy holds input focus.
    pub targeted: bool,
    /// Scale at which to render the word (shrinks as the enemy closes in).
    pub font_scale: f64,
}

/// Scalar state for the heads-up display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HudView {
    pub score: u64,
    pub level: u32,
    pub health: u32,
    pub max_health: u32,
    pub shield: u32,
    pub max_shield: u32,
    pub wpm: f64,
    pub accuracy: f64,
    pub keystroke_accuracy: f64,
    pub words_correct: u32,
    pub words_missed: u32,
    pub bosses_defeated: u32,
    pub difficulty: Difficulty,
    pub emp_cooldown: u32,
    pub emp_max_cooldown: u32,
    pub bonus_items: Vec<BonusItem>,
    pub frozen: bool,
}

/// The trivia question currently awaiting an answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriviaView {
    pub prompt: String,
    pub choices: Vec<String>,
}
