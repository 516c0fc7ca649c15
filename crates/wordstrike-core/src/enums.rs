//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Difficulty bucket. Ordered from gentlest to harshest.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Expert,
    Master,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Expert,
        Difficulty::Master,
    ];
}

/// Enemy presentation category. Also biases word length at spawn time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyType {
    #[default]
    Basic,
    Fast,
}

/// One of the fixed spawn lanes across the far edge of the field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnLane {
    Left,
    #[default]
    Center,
    Right,
}

impl SpawnLane {
    pub const ALL: [SpawnLane; 3] = [SpawnLane::Left, SpawnLane::Center, SpawnLane::Right];

    pub fn index(self) -> usize {
        match self {
            SpawnLane::Left => 0,
            SpawnLane::Center => 1,
            SpawnLane::Right => 2,
        }
    }

    /// The lane after this one in the 0 → 1 → 2 → 0 rotation.
    pub fn next(self) -> SpawnLane {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

/// What the player is typing: natural-language words or programming keywords.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameMode {
    Language { language: String },
    Programming { language: String },
}

impl GameMode {
    /// Key used to look up word pools and trivia for this mode.
    pub fn language_key(&self) -> &str {
        match self {
            GameMode::Language { language } | GameMode::Programming { language } => language,
        }
    }

    pub fn is_programming(&self) -> bool {
        matches!(self, GameMode::Programming { .. })
    }
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::Language {
            language: "english".into(),
        }
    }
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    Active,
    Paused,
    /// Boss-cadence trivia question is on screen; the simulation is frozen.
    TriviaPrompt,
    GameOver,
    Victory,
}

impl GamePhase {
    /// Whether a session is in progress (running, paused, or prompting).
    pub fn in_session(self) -> bool {
        matches!(
            self,
            GamePhase::Active | GamePhase::Paused | GamePhase::TriviaPrompt
        )
    }
}

/// A raw key event as delivered by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Key {
    Char(char),
    Backspace,
    Tab,
    Enter,
    Escape,
    /// Anything else (arrows, function keys, modifiers).
    Other,
}

/// Why an enemy left the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalReason {
    /// Its word was typed.
    Destroyed,
    /// It reached or collided with the defender.
    ReachedDefender,
    /// Swept away by an EMP.
    EmpCleared,
    /// Swept away by a clear-enemies bonus item.
    BonusCleared,
    /// Dropped because its position became non-finite. No damage is dealt.
    Discarded,
}

/// Consumable bonus item kinds, earned through trivia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusItemKind {
    Heal,
    Shield,
    ClearEnemies,
    Freeze,
}

impl BonusItemKind {
    pub const ALL: [BonusItemKind; 4] = [
        BonusItemKind::Heal,
        BonusItemKind::Shield,
        BonusItemKind::ClearEnemies,
        BonusItemKind::Freeze,
    ];

    /// Number of uses granted when the item is earned.
    pub fn initial_uses(self) -> u32 {
        match self {
            BonusItemKind::Freeze => crate::constants::FREEZE_USES,
            BonusItemKind::Heal | BonusItemKind::Shield | BonusItemKind::ClearEnemies => 1,
        }
    }
}
