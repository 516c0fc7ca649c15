//! Session-scoped scalar game state.
//!
//! Created when a session starts, mutated by the simulation systems, and
//! discarded (never resumed) when the session ends.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{BonusItemKind, Difficulty, GameMode};
use crate::events::FinalStats;
use crate::types::EnemyId;

/// A consumable effect with remaining uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusItem {
    pub kind: BonusItemKind,
    pub uses: u32,
}

/// Scalar state of one play session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub mode: GameMode,
    pub level: u32,
    pub score: u64,
    pub words_typed: u32,
    pub words_correct: u32,
    pub words_missed: u32,
    pub wpm: f64,
    /// Percentage of submitted words that were correct.
    pub accuracy: f64,
    /// Printable keystrokes aimed at an active target.
    pub keystrokes: u32,
    /// Of those, how many did not match the next letter.
    pub keystrokes_missed: u32,

    pub health: u32,
    pub max_health: u32,
    pub shield: u32,
    pub max_shield: u32,

    /// The enemy holding input focus, if any.
    pub active_enemy: Option<EnemyId>,

    pub bosses_defeated: u32,
    /// Preference read from settings at session start.
    pub starting_difficulty: Difficulty,
    pub current_difficulty: Difficulty,
    /// Ticks until the EMP can fire again.
    pub emp_cooldown: u32,
    pub emp_max_cooldown: u32,

    pub bonus_items: Vec<BonusItem>,

    /// Seconds of enemy movement freeze left from a Freeze bonus.
    pub freeze_remaining_secs: f64,
    /// Characters of correctly completed words, for WPM.
    pub correct_chars: u32,
    /// Seconds spent in the Active phase.
    pub active_secs: f64,
}

impl GameState {
    /// Fresh level-1 state. `current_difficulty` comes from the difficulty model.
    pub fn new(
        mode: GameMode,
        starting_difficulty: Difficulty,
        current_difficulty: Difficulty,
        emp_max_cooldown: u32,
    ) -> Self {
        Self {
            mode,
            level: 1,
            score: 0,
            words_typed: 0,
            words_correct: 0,
            words_missed: 0,
            wpm: 0.0,
            accuracy: 0.0,
            keystrokes: 0,
            keystrokes_missed: 0,
            health: DEFENDER_MAX_HEALTH,
            max_health: DEFENDER_MAX_HEALTH,
            shield: DEFENDER_START_SHIELD,
            max_shield: DEFENDER_MAX_SHIELD,
            active_enemy: None,
            bosses_defeated: 0,
            starting_difficulty,
            current_difficulty,
            emp_cooldown: 0,
            emp_max_cooldown,
            bonus_items: Vec::new(),
            freeze_remaining_secs: 0.0,
            correct_chars: 0,
            active_secs: 0.0,
        }
    }

    pub fn recompute_accuracy(&mut self) {
        self.accuracy = if self.words_typed == 0 {
            0.0
        } else {
            self.words_correct as f64 / self.words_typed as f64 * 100.0
        };
    }

    pub fn recompute_wpm(&mut self) {
        self.wpm = if self.active_secs < WPM_MIN_ELAPSED_SECS {
            0.0
        } else {
            (self.correct_chars as f64 / CHARS_PER_WORD) / (self.active_secs / 60.0)
        };
    }

    /// Per-keystroke accuracy (percentage), reported separately from word accuracy.
    pub fn keystroke_accuracy(&self) -> f64 {
        if self.keystrokes == 0 {
            100.0
        } else {
            (self.keystrokes - self.keystrokes_missed.min(self.keystrokes)) as f64
                / self.keystrokes as f64
                * 100.0
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    pub fn final_stats(&self, victory: bool) -> FinalStats {
        FinalStats {
            score: self.score,
            level: self.level,
            words_typed: self.words_typed,
            words_correct: self.words_correct,
            words_missed: self.words_missed,
            accuracy: self.accuracy,
            wpm: self.wpm,
            bosses_defeated: self.bosses_defeated,
            duration_secs: self.active_secs,
            mode: self.mode.clone(),
            victory,
        }
    }
}
