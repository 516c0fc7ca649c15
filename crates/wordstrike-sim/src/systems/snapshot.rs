//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use wordstrike_core::components::*;
use wordstrike_core::enums::GamePhase;
use wordstrike_core::events::GameEvent;
use wordstrike_core::session::GameState;
use wordstrike_core::state::*;
use wordstrike_core::types::{EnemyId, Position, SimTime};
use wordstrike_steering::separation::font_scale;
use wordstrike_words::TriviaQuestion;

use crate::world_setup::DEFENDER_POSITION;

/// Build a complete GameStateSnapshot from the current world and session.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    session: Option<&GameState>,
    trivia: Option<&TriviaQuestion>,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    let active = session.and_then(|s| s.active_enemy);
    GameStateSnapshot {
        time: *time,
        phase,
        mode: session.map(|s| s.mode.clone()),
        enemies: build_enemies(world, active),
        hud: session.map(build_hud).unwrap_or_default(),
        trivia: trivia.map(|q| TriviaView {
            prompt: q.prompt.clone(),
            choices: q.choices.clone(),
        }),
        events,
    }
}

/// Build EnemyView list from all enemy entities, in spawn (id) order.
fn build_enemies(world: &World, active: Option<EnemyId>) -> Vec<EnemyView> {
    let defender = Position::from_vec(DEFENDER_POSITION);
    let mut enemies: Vec<EnemyView> = world
        .query::<(&EnemyProfile, &Position, &Heading, &Hull, &TypingProgress)>()
        .iter()
        .map(|(_, (profile, pos, heading, hull, progress))| EnemyView {
            id: profile.id,
            word: profile.word.clone(),
            position: *pos,
            heading: heading.yaw,
            typed_characters: progress.typed_characters,
            is_boss: profile.is_boss,
            enemy_type: profile.enemy_type,
            health: hull.health,
            max_health: hull.max_health,
            targeted: active == Some(profile.id),
            font_scale: font_scale(pos.range_to(&defender)),
        })
        .collect();

    enemies.sort_by_key(|e| e.id);
    enemies
}

fn build_hud(state: &GameState) -> HudView {
    HudView {
        score: state.score,
        level: state.level,
        health: state.health,
        max_health: state.max_health,
        shield: state.shield,
        max_shield: state.max_shield,
        wpm: state.wpm,
        accuracy: state.accuracy,
        keystroke_accuracy: state.keystroke_accuracy(),
        words_correct: state.words_correct,
        words_missed: state.words_missed,
        bosses_defeated: state.bosses_defeated,
        difficulty: state.current_difficulty,
        emp_cooldown: state.emp_cooldown,
        emp_max_cooldown: state.emp_max_cooldown,
        bonus_items: state.bonus_items.clone(),
        frozen: state.freeze_remaining_secs > 0.0,
    }
}
