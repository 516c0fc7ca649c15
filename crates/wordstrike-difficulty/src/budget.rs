//! Spawn budget: how often and how many enemies a level allows.

use wordstrike_core::constants::*;

/// Seconds between timed spawns.
pub fn spawn_rate(level: u32) -> f64 {
    (SPAWN_RATE_BASE_SECS - level as f64 * SPAWN_RATE_PER_LEVEL)
        .clamp(SPAWN_RATE_MIN_SECS, SPAWN_RATE_BASE_SECS)
}

/// Maximum enemies alive at once.
pub fn max_concurrent_enemies(level: u32) -> u32 {
    BASE_MAX_ENEMIES + level / LEVELS_PER_EXTRA_ENEMY
}

pub fn is_boss_level(level: u32) -> bool {
    level % BOSS_LEVEL_INTERVAL == 0
}

/// Probability that a non-boss spawn is a `Fast` enemy.
pub fn fast_enemy_chance(level: u32) -> f64 {
    if level < FAST_ENEMY_MIN_LEVEL {
        return 0.0;
    }
    let chance =
        (level - FAST_ENEMY_MIN_LEVEL) as f64 * FAST_CHANCE_PER_LEVEL + FAST_CHANCE_BASE;
    chance.min(FAST_CHANCE_MAX)
}
