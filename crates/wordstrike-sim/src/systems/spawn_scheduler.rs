//! Spawn scheduler: decides once per tick whether a new enemy enters the field.
//!
//! A timer accumulates active time; when it passes `spawn_rate(level)` and the
//! field is below its capacity, the lane rotation advances and a spawn is
//! attempted. Boss levels only ever spawn a boss, into an empty field, in the
//! center lane. The very first enemy of a session bypasses the timer.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use wordstrike_core::components::EnemyProfile;
use wordstrike_core::constants::*;
use wordstrike_core::enums::{EnemyType, SpawnLane};
use wordstrike_core::events::GameEvent;
use wordstrike_core::session::GameState;
use wordstrike_core::types::{EnemyId, Position};
use wordstrike_difficulty::{
    enemy_health, enemy_speed, fast_enemy_chance, is_boss_level, max_concurrent_enemies,
    spawn_rate,
};
use wordstrike_typing::text::char_len;
use wordstrike_words::{WordError, WordSupplier};

use crate::world_setup::{self, lane_origin, EnemySpawn};

/// Borrowed engine state the scheduler needs to create an enemy.
pub struct SpawnContext<'a> {
    pub world: &'a mut World,
    pub rng: &'a mut ChaCha8Rng,
    pub words: &'a mut dyn WordSupplier,
    pub state: &'a GameState,
    pub next_enemy_id: &'a mut u64,
    pub events: &'a mut Vec<GameEvent>,
}

/// Timer and lane rotation. Reset at the start of every session.
#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    spawn_timer: f64,
    last_lane: SpawnLane,
    /// The session's first enemy has not appeared yet.
    first_spawn_pending: bool,
}

impl Default for SpawnScheduler {
    fn default() -> Self {
        Self {
            spawn_timer: 0.0,
            // First rotation step lands on the left lane.
            last_lane: SpawnLane::Right,
            first_spawn_pending: true,
        }
    }
}

impl SpawnScheduler {
    pub fn spawn_timer(&self) -> f64 {
        self.spawn_timer
    }

    pub fn first_spawn_pending(&self) -> bool {
        self.first_spawn_pending
    }

    /// Per-tick entry point: retry the forced first spawn, then run the timer.
    pub fn run(&mut self, ctx: &mut SpawnContext<'_>, dt: f64) -> Option<EnemyId> {
        if self.first_spawn_pending {
            let spawned = self.force_spawn(ctx);
            if spawned.is_some() {
                self.first_spawn_pending = false;
                self.spawn_timer = 0.0;
            }
            return spawned;
        }

        self.spawn_timer += dt;
        let level = ctx.state.level;
        if self.spawn_timer < spawn_rate(level) {
            return None;
        }

        let count = world_setup::enemy_count(ctx.world);
        if count >= max_concurrent_enemies(level) {
            return None;
        }
        if is_boss_level(level) && count > 0 {
            return None;
        }

        self.spawn_timer = 0.0;
        self.attempt_spawn(ctx)
    }

    /// Spawn immediately, bypassing the timer (capacity and boss gating still apply).
    pub fn force_spawn(&mut self, ctx: &mut SpawnContext<'_>) -> Option<EnemyId> {
        let level = ctx.state.level;
        let count = world_setup::enemy_count(ctx.world);
        if count >= max_concurrent_enemies(level) || (is_boss_level(level) && count > 0) {
            return None;
        }
        self.attempt_spawn(ctx)
    }

    fn attempt_spawn(&mut self, ctx: &mut SpawnContext<'_>) -> Option<EnemyId> {
        let level = ctx.state.level;
        let is_boss = is_boss_level(level);

        let lane = if is_boss {
            SpawnLane::Center
        } else {
            let lane = self.pick_lane(ctx.world);
            if lane.is_none() {
                debug!("all lanes blocked, spawn skipped");
            }
            lane?
        };

        let enemy_type = roll_enemy_type(ctx.rng, level, is_boss);
        let word = match draw_word(ctx, enemy_type, is_boss) {
            Ok(word) => word,
            Err(err) => {
                warn!(%err, level, is_boss, "word supplier failed, spawn skipped");
                return None;
            }
        };
        if word.is_empty() {
            warn!(level, "word supplier returned an empty word, spawn skipped");
            return None;
        }

        let state = ctx.state;
        let word_len = char_len(&word);
        let speed = enemy_speed(
            level,
            word_len,
            is_boss,
            &state.mode,
            state.current_difficulty,
        );
        let id = EnemyId(*ctx.next_enemy_id);
        *ctx.next_enemy_id += 1;

        world_setup::spawn_enemy(
            ctx.world,
            EnemySpawn {
                id,
                word: word.clone(),
                enemy_type,
                is_boss,
                lane,
                speed,
                health: enemy_health(level, is_boss),
            },
        );
        debug!(%id, word = %word, ?lane, ?enemy_type, is_boss, speed, "enemy spawned");
        ctx.events.push(GameEvent::EnemySpawned {
            id,
            word,
            is_boss,
            lane,
        });
        Some(id)
    }

    /// Advance the rotation to the next lane that is clear of recent spawns.
    fn pick_lane(&mut self, world: &World) -> Option<SpawnLane> {
        let first = self.last_lane.next();
        self.last_lane = first;
        let mut lane = first;
        for _ in 0..SpawnLane::ALL.len() {
            if !lane_blocked(world, lane) {
                self.last_lane = lane;
                return Some(lane);
            }
            lane = lane.next();
        }
        None
    }
}

/// A lane is blocked while one of its enemies is still near the lane origin.
pub fn lane_blocked(world: &World, lane: SpawnLane) -> bool {
    let origin = lane_origin(lane);
    world
        .query::<(&EnemyProfile, &Position)>()
        .iter()
        .any(|(_, (profile, pos))| {
            profile.lane == lane && pos.range_to(&origin) < LANE_CLEARANCE_DISTANCE
        })
}

fn roll_enemy_type(rng: &mut ChaCha8Rng, level: u32, is_boss: bool) -> EnemyType {
    if is_boss {
        return EnemyType::Basic;
    }
    let chance = fast_enemy_chance(level);
    if chance > 0.0 && rng.gen_bool(chance) {
        EnemyType::Fast
    } else {
        EnemyType::Basic
    }
}

/// Fast enemies keep the longest of several candidates (first wins ties).
fn draw_word(
    ctx: &mut SpawnContext<'_>,
    enemy_type: EnemyType,
    is_boss: bool,
) -> Result<String, WordError> {
    let state = ctx.state;
    let language = state.mode.language_key();
    let level = state.level;
    let candidates = match enemy_type {
        EnemyType::Fast => FAST_WORD_CANDIDATES,
        EnemyType::Basic => 1,
    };

    let mut best = ctx.words.get_word(language, level, is_boss)?;
    for _ in 1..candidates {
        let candidate = ctx.words.get_word(language, level, is_boss)?;
        if char_len(&candidate) > char_len(&best) {
            best = candidate;
        }
    }
    Ok(best)
}
