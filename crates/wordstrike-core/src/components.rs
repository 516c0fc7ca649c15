//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic.
//! Game logic lives in systems and in the pure behaviour crates.

use serde::{Deserialize, Serialize};

use crate::enums::{EnemyType, SpawnLane};
use crate::types::EnemyId;

/// Identity and spawn-time data of an enemy. Immutable after spawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyProfile {
    pub id: EnemyId,
    /// The word the player must type to destroy this enemy.
    pub word: String,
    pub enemy_type: EnemyType,
    pub is_boss: bool,
    pub lane: SpawnLane,
    /// Cruise speed (units/s), fixed at spawn.
    pub speed: f64,
}

/// Facing of the ship around the vertical axis (radians, 0 = +z, clockwise toward +x).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Heading {
    pub yaw: f64,
}

/// Display health. Only ever decreases; it is not a kill condition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hull {
    pub health: u32,
    pub max_health: u32,
}

/// How many leading characters of the word have been typed.
/// Invariant: `0 <= typed_characters <= word.len()`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TypingProgress {
    pub typed_characters: usize,
}

/// Attached when the final letter is typed; the kill resolves when the timer runs out.
/// An enemy carrying this component cannot be targeted again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingCompletion {
    pub remaining_secs: f64,
    /// The string the player actually typed, re-checked on resolution.
    pub typed: String,
}
