//! Level → typing speed → enemy speed/health curves.

use wordstrike_core::constants::*;
use wordstrike_core::enums::{Difficulty, GameMode};

use crate::buckets::difficulty_multiplier;

/// Target words-per-minute for a level: linear from BASE_WPM at level 1
/// to MAX_WPM at MAX_LEVEL, clamped to that range.
pub fn target_wpm(level: u32) -> f64 {
    let progress = (level as f64 - 1.0) / (MAX_LEVEL as f64 - 1.0);
    (BASE_WPM + (MAX_WPM - BASE_WPM) * progress).clamp(BASE_WPM, MAX_WPM)
}

/// Enemy speed before the difficulty multiplier is applied.
///
/// Non-boss results lie in `[ENEMY_MIN_SPEED, ENEMY_MAX_SPEED]`,
/// boss results in `[BOSS_MIN_SPEED, BOSS_MAX_SPEED]`.
pub fn raw_enemy_speed(level: u32, word_length: usize, is_boss: bool, mode: &GameMode) -> f64 {
    let chars_per_second = target_wpm(level) * CHARS_PER_WORD / 60.0;
    let baseline =
        chars_per_second * word_length.max(SPEED_MIN_WORD_LEN) as f64 / SPEED_BASELINE_DIVISOR;
    let speed_scale =
        SPEED_SCALE_BASE + level.min(SPEED_SCALE_LEVEL_CAP) as f64 * SPEED_SCALE_PER_LEVEL;
    let speed = (baseline * speed_scale).clamp(ENEMY_MIN_SPEED, ENEMY_MAX_SPEED);

    if !is_boss {
        return speed;
    }

    let base_scale = if mode.is_programming() {
        BOSS_SPEED_SCALE_PROGRAMMING
    } else {
        BOSS_SPEED_SCALE_DEFAULT
    };
    let length_factor = if word_length > BOSS_LONG_WORD_THRESHOLD {
        BOSS_LONG_WORD_FACTOR
    } else {
        1.0
    };
    let level_factor = BOSS_LEVEL_FACTOR_BASE
        + level.min(BOSS_LEVEL_FACTOR_LEVEL_CAP) as f64 / BOSS_LEVEL_FACTOR_DIVISOR;

    (speed * base_scale * length_factor * level_factor).clamp(BOSS_MIN_SPEED, BOSS_MAX_SPEED)
}

/// Final enemy speed (units/s) including the difficulty-bucket multiplier.
pub fn enemy_speed(
    level: u32,
    word_length: usize,
    is_boss: bool,
    mode: &GameMode,
    difficulty: Difficulty,
) -> f64 {
    raw_enemy_speed(level, word_length, is_boss, mode) * difficulty_multiplier(difficulty)
}

/// Enemy health for display. Bosses are much sturdier.
pub fn enemy_health(level: u32, is_boss: bool) -> u32 {
    let health = if is_boss {
        BOSS_BASE_HEALTH + level as f64 * BOSS_HEALTH_PER_LEVEL
    } else {
        ENEMY_BASE_HEALTH + level as f64 * ENEMY_HEALTH_PER_LEVEL
    };
    health.floor() as u32
}
