//! Typing system: routes key events through the matcher and applies the
//! outcome to enemy components, session counters and the event stream.
//!
//! Completing a word does not kill the enemy on the spot. It gets a
//! `PendingCompletion` and is resolved once the completion delay elapses,
//! which locks it against re-targeting and duplicate submissions meanwhile.

use hecs::{Entity, World};
use tracing::{debug, warn};

use wordstrike_core::components::{EnemyProfile, Hull, PendingCompletion, TypingProgress};
use wordstrike_core::enums::Key;
use wordstrike_core::events::GameEvent;
use wordstrike_core::session::GameState;
use wordstrike_core::types::EnemyId;
use wordstrike_typing::text::char_len;
use wordstrike_typing::{KeyContext, MatchOutcome, Repair, TargetView, TypingMatcher};

use crate::world_setup::find_enemy;

/// Owned copy of one enemy's typing-relevant fields, in id order.
#[derive(Debug, Clone)]
pub struct TargetRow {
    pub entity: Entity,
    pub id: EnemyId,
    pub word: String,
    pub typed_characters: usize,
    pub locked: bool,
}

pub fn live_targets(world: &World) -> Vec<TargetRow> {
    let mut rows: Vec<TargetRow> = world
        .query::<(&EnemyProfile, &TypingProgress, Option<&PendingCompletion>)>()
        .iter()
        .map(|(entity, (profile, progress, pending))| TargetRow {
            entity,
            id: profile.id,
            word: profile.word.clone(),
            typed_characters: progress.typed_characters,
            locked: pending.is_some(),
        })
        .collect();
    rows.sort_by_key(|row| row.id);
    rows
}

pub fn views(rows: &[TargetRow]) -> Vec<TargetView<'_>> {
    rows.iter()
        .map(|row| TargetView {
            id: row.id,
            word: &row.word,
            typed_characters: row.typed_characters,
            locked: row.locked,
        })
        .collect()
}

/// Engine-level follow-up for a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    None,
    FireEmp,
    TogglePause,
}

/// Feed one key to the matcher and apply what it decided.
pub fn handle_key(
    world: &mut World,
    matcher: &mut TypingMatcher,
    state: &mut GameState,
    key: Key,
    ctx: KeyContext,
    completion_delay_secs: f64,
    events: &mut Vec<GameEvent>,
) -> KeyAction {
    let rows = live_targets(world);
    let outcome = matcher.handle_key(key, &views(&rows), ctx);

    let action = match outcome {
        MatchOutcome::Ignored => KeyAction::None,
        MatchOutcome::NoMatch { key } => {
            debug!(%key, "keystroke matched no enemy");
            KeyAction::None
        }
        MatchOutcome::Acquired { id } => {
            state.keystrokes += 1;
            set_progress(world, id, 1);
            chip_hull(world, id);
            events.push(GameEvent::TargetAcquired { id });
            KeyAction::None
        }
        MatchOutcome::Advanced {
            id,
            typed_characters,
        } => {
            state.keystrokes += 1;
            set_progress(world, id, typed_characters);
            chip_hull(world, id);
            KeyAction::None
        }
        MatchOutcome::Completed { id, typed } => {
            state.keystrokes += 1;
            chip_hull(world, id);
            submit(world, id, typed, completion_delay_secs);
            KeyAction::None
        }
        MatchOutcome::Mistyped { id, key } => {
            state.keystrokes += 1;
            state.keystrokes_missed += 1;
            debug!(%id, %key, "mistyped key");
            events.push(GameEvent::Mistyped { id, key });
            KeyAction::None
        }
        MatchOutcome::Retreated {
            id,
            typed_characters,
        } => {
            set_progress(world, id, typed_characters);
            KeyAction::None
        }
        MatchOutcome::Switched { from, to } => {
            if let Some(from) = from {
                set_progress(world, from, 0);
            }
            set_progress(world, to, 0);
            events.push(GameEvent::TargetAcquired { id: to });
            KeyAction::None
        }
        MatchOutcome::EmpRequested => KeyAction::FireEmp,
        MatchOutcome::PauseToggled => KeyAction::TogglePause,
    };

    state.active_enemy = matcher.active();
    action
}

fn set_progress(world: &mut World, id: EnemyId, typed_characters: usize) {
    if let Some(entity) = find_enemy(world, id) {
        if let Ok(mut progress) = world.get::<&mut TypingProgress>(entity) {
            progress.typed_characters = typed_characters;
        }
    }
}

/// Cosmetic hull damage for a correct keystroke: a full word empties the bar.
fn chip_hull(world: &mut World, id: EnemyId) {
    let Some(entity) = find_enemy(world, id) else {
        return;
    };
    if let Ok((profile, hull)) = world.query_one_mut::<(&EnemyProfile, &mut Hull)>(entity) {
        let len = char_len(&profile.word).max(1) as u32;
        hull.health = hull.health.saturating_sub(hull.max_health.div_ceil(len));
    }
}

/// Park a fully typed enemy until its completion resolves.
fn submit(world: &mut World, id: EnemyId, typed: String, delay_secs: f64) {
    let Some(entity) = find_enemy(world, id) else {
        return;
    };
    if world.get::<&PendingCompletion>(entity).is_ok() {
        debug!(%id, "duplicate completion ignored");
        return;
    }
    let len = char_len(&typed);
    if let Ok(mut progress) = world.get::<&mut TypingProgress>(entity) {
        progress.typed_characters = len;
    }
    let _ = world.insert_one(
        entity,
        PendingCompletion {
            remaining_secs: delay_secs,
            typed,
        },
    );
}

/// A completion whose delay has run out.
#[derive(Debug, Clone)]
pub struct DueCompletion {
    pub entity: Entity,
    pub id: EnemyId,
    pub word: String,
    pub typed: String,
    pub is_boss: bool,
}

/// Count down pending completions and return the ones that are due, in id order.
pub fn advance_pending(world: &mut World, dt: f64) -> Vec<DueCompletion> {
    let mut due: Vec<DueCompletion> = Vec::new();
    for (entity, (profile, pending)) in
        world.query_mut::<(&EnemyProfile, &mut PendingCompletion)>()
    {
        pending.remaining_secs -= dt;
        if pending.remaining_secs <= 0.0 {
            due.push(DueCompletion {
                entity,
                id: profile.id,
                word: profile.word.clone(),
                typed: pending.typed.clone(),
                is_boss: profile.is_boss,
            });
        }
    }
    due.sort_by_key(|d| d.id);
    due
}

/// Return a rejected submission to play with its progress cleared.
pub fn reject_submission(world: &mut World, entity: Entity) {
    let _ = world.remove_one::<PendingCompletion>(entity);
    if let Ok(mut progress) = world.get::<&mut TypingProgress>(entity) {
        progress.typed_characters = 0;
    }
}

/// Restore the typing invariants: progress within word bounds, at most one
/// enemy mid-typed, and focus only on a live enemy whose word fits the prefix.
/// Each repair is logged.
pub fn repair_invariants(world: &mut World, matcher: &mut TypingMatcher, state: &mut GameState) {
    for (_entity, (profile, progress, pending)) in world.query_mut::<(
        &EnemyProfile,
        &mut TypingProgress,
        Option<&PendingCompletion>,
    )>() {
        let len = char_len(&profile.word);
        if progress.typed_characters > len {
            warn!(id = %profile.id, typed = progress.typed_characters, len, "typed count past word end, clamped");
            progress.typed_characters = len;
        }
        let focused = matcher.active() == Some(profile.id);
        if !focused && pending.is_none() && progress.typed_characters > 0 {
            warn!(id = %profile.id, "progress on an unfocused enemy, reset");
            progress.typed_characters = 0;
        }
    }

    let rows = live_targets(world);
    match matcher.reconcile(&views(&rows)) {
        None => {}
        Some(Repair::ReleasedMissing { id }) => {
            warn!(%id, "focused enemy is gone, focus released");
        }
        Some(Repair::ReleasedMismatch { id }) => {
            warn!(%id, "typed prefix no longer matches, focus released");
            set_progress(world, id, 0);
        }
        Some(Repair::ProgressResynced {
            id,
            typed_characters,
        }) => {
            warn!(%id, typed_characters, "progress out of step with typed prefix, resynced");
            set_progress(world, id, typed_characters);
        }
    }

    if state.active_enemy != matcher.active() {
        warn!(stale = ?state.active_enemy, "active enemy out of step with matcher, corrected");
        state.active_enemy = matcher.active();
    }
}
