//! Difficulty model for WORDSTRIKE.
//!
//! Pure, stateless functions mapping level and player preference to
//! target typing speed, enemy kinematics, enemy health, difficulty buckets,
//! and the spawn budget. No ECS dependency; operates on plain values.

pub mod buckets;
pub mod budget;
pub mod curve;

pub use buckets::{difficulty_bucket, difficulty_multiplier};
pub use budget::{fast_enemy_chance, is_boss_level, max_concurrent_enemies, spawn_rate};
pub use curve::{enemy_health, enemy_speed, raw_enemy_speed, target_wpm};

pub use wordstrike_core as core;
