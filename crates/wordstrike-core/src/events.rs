//! Events emitted by the simulation for the presentation layer and achievement tracking.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::EnemyId;

/// Discrete gameplay events, drained into each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    EnemySpawned {
        id: EnemyId,
        word: String,
        is_boss: bool,
        lane: SpawnLane,
    },
    EnemyRemoved {
        id: EnemyId,
        reason: RemovalReason,
    },
    /// The player locked onto a new target.
    TargetAcquired { id: EnemyId },
    /// A keystroke did not match the active target's next letter.
    Mistyped { id: EnemyId, key: char },
    /// A submitted word failed the final re-check and was counted as missed.
    WordMissed { id: EnemyId },
    DefenderHit {
        damage: u32,
        shield_absorbed: u32,
        health: u32,
    },
    LevelAdvanced {
        level: u32,
        difficulty: Difficulty,
    },
    BossDefeated {
        bosses_defeated: u32,
        trivia_due: bool,
    },
    EmpFired { cleared: u32 },
    BonusItemEarned { kind: BonusItemKind },
    BonusItemUsed { kind: BonusItemKind },
    TriviaAnswered { correct: bool },
    SessionEnded { stats: FinalStats },
}

/// Fire-and-forget notifications for the achievement tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AchievementEvent {
    WordTyped { correct: bool, length: usize },
    BossDefeated { total: u32 },
    BonusCollected { kind: BonusItemKind },
    BonusUsed { kind: BonusItemKind },
    LanguagePlayed { language: String },
}

/// Summary of a finished session, for high scores and lifetime statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalStats {
    pub score: u64,
    pub level: u32,
    pub words_typed: u32,
    pub words_correct: u32,
    pub words_missed: u32,
    pub accuracy: f64,
    pub wpm: f64,
    pub bosses_defeated: u32,
    pub duration_secs: f64,
    pub mode: GameMode,
    pub victory: bool,
}
