//! Combat resolution: the rules applied to `GameState` when a word is
//! submitted, the defender is hit, the EMP fires, or a bonus item changes hands.
//!
//! These functions only touch scalar session state. Entity removal and effect
//! application belong to the engine, which acts on the returned outcomes.

use tracing::debug;

use wordstrike_core::constants::*;
use wordstrike_core::enums::{BonusItemKind, Difficulty};
use wordstrike_core::session::{BonusItem, GameState};
use wordstrike_difficulty::difficulty_bucket;
use wordstrike_typing::text::{char_len, eq_ignore_case};

/// Boss kill bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BossKill {
    pub bosses_defeated: u32,
    /// Raised on every `BOSSES_PER_TRIVIA`-th boss.
    pub trivia_due: bool,
}

/// Result of resolving a submitted word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordResolution {
    Correct {
        points: u64,
        boss: Option<BossKill>,
        level_up: bool,
    },
    /// Typed text did not match; the enemy stays on the field.
    Missed,
}

/// Score and statistics for a submitted word.
pub fn resolve_word(state: &mut GameState, word: &str, typed: &str, is_boss: bool) -> WordResolution {
    state.words_typed += 1;

    if !eq_ignore_case(typed, word) {
        state.words_missed += 1;
        state.recompute_accuracy();
        return WordResolution::Missed;
    }

    let length = char_len(word) as u64;
    let multiplier = if is_boss { BOSS_SCORE_MULTIPLIER } else { 1 };
    let points = length * POINTS_PER_CHAR * multiplier;
    state.score += points;
    state.words_correct += 1;
    state.correct_chars += length as u32;
    state.recompute_accuracy();

    let boss = is_boss.then(|| {
        state.bosses_defeated += 1;
        BossKill {
            bosses_defeated: state.bosses_defeated,
            trivia_due: state.bosses_defeated % BOSSES_PER_TRIVIA == 0,
        }
    });
    let level_up = is_boss || state.words_correct % WORDS_PER_LEVEL == 0;

    WordResolution::Correct {
        points,
        boss,
        level_up,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelChange {
    Advanced { level: u32, difficulty: Difficulty },
    /// Already at the top level; the session is won.
    MaxLevelReached,
}

/// Advance one level and re-derive the difficulty bucket.
pub fn advance_level(state: &mut GameState) -> LevelChange {
    if state.level >= MAX_LEVEL {
        return LevelChange::MaxLevelReached;
    }
    state.level += 1;
    state.current_difficulty = difficulty_bucket(state.level, state.starting_difficulty);
    LevelChange::Advanced {
        level: state.level,
        difficulty: state.current_difficulty,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefenderHit {
    pub damage: u32,
    pub shield_absorbed: u32,
    pub health: u32,
}

/// Apply contact damage. Shield soaks first, the rest comes off health.
pub fn apply_defender_hit(state: &mut GameState, is_boss: bool) -> DefenderHit {
    let damage = if is_boss { BOSS_DAMAGE } else { ENEMY_DAMAGE };
    let shield_absorbed = state.shield.min(damage);
    state.shield -= shield_absorbed;
    state.health = state.health.saturating_sub(damage - shield_absorbed);
    DefenderHit {
        damage,
        shield_absorbed,
        health: state.health,
    }
}

/// Arm the EMP if it is off cooldown. Returns whether it fired.
pub fn try_fire_emp(state: &mut GameState) -> bool {
    if state.emp_cooldown > 0 {
        return false;
    }
    state.emp_cooldown = state.emp_max_cooldown;
    true
}

pub fn tick_emp_cooldown(state: &mut GameState) {
    state.emp_cooldown = state.emp_cooldown.saturating_sub(1);
}

/// Take one use from the item in `slot`, dropping the slot when it runs out.
pub fn consume_bonus_item(state: &mut GameState, slot: usize) -> Option<BonusItemKind> {
    let item = state.bonus_items.get_mut(slot)?;
    let kind = item.kind;
    item.uses = item.uses.saturating_sub(1);
    if item.uses == 0 {
        state.bonus_items.remove(slot);
    }
    Some(kind)
}

/// Add an earned item. Uses merge into an existing slot of the same kind;
/// a new kind needs a free slot. Returns whether the item was kept.
pub fn award_bonus_item(state: &mut GameState, kind: BonusItemKind) -> bool {
    if let Some(item) = state.bonus_items.iter_mut().find(|i| i.kind == kind) {
        item.uses += kind.initial_uses();
        return true;
    }
    if state.bonus_items.len() >= MAX_BONUS_SLOTS {
        debug!(?kind, "bonus inventory full, reward dropped");
        return false;
    }
    state.bonus_items.push(BonusItem {
        kind,
        uses: kind.initial_uses(),
    });
    true
}

/// Restore health, capped at the maximum.
pub fn heal(state: &mut GameState, amount: u32) {
    state.health = (state.health + amount).min(state.max_health);
}

/// Top up the shield, capped at the maximum.
pub fn recharge_shield(state: &mut GameState, amount: u32) {
    state.shield = (state.shield + amount).min(state.max_shield);
}
