//! Cleanup system: enemy removal and end-of-tick sweeps.
//!
//! Removal is idempotent. Asking to remove an enemy that is already gone
//! (for example a completion racing an EMP) does nothing and emits nothing.

use hecs::{Entity, World};
use tracing::{debug, warn};

use wordstrike_core::components::EnemyProfile;
use wordstrike_core::enums::RemovalReason;
use wordstrike_core::events::GameEvent;
use wordstrike_core::types::{EnemyId, Position};

/// Despawn one enemy. Returns whether it was still alive.
pub fn remove_enemy(
    world: &mut World,
    entity: Entity,
    reason: RemovalReason,
    events: &mut Vec<GameEvent>,
) -> bool {
    let id = match world.get::<&EnemyProfile>(entity) {
        Ok(profile) => profile.id,
        Err(_) => return false,
    };
    if world.despawn(entity).is_err() {
        return false;
    }
    debug!(%id, ?reason, "enemy removed");
    events.push(GameEvent::EnemyRemoved { id, reason });
    true
}

/// Remove every enemy matching `predicate`. Returns the removed ids in id order.
pub fn remove_where(
    world: &mut World,
    predicate: impl Fn(&EnemyProfile) -> bool,
    reason: RemovalReason,
    events: &mut Vec<GameEvent>,
) -> Vec<EnemyId> {
    let mut doomed: Vec<(EnemyId, Entity)> = world
        .query::<&EnemyProfile>()
        .iter()
        .filter(|(_, profile)| predicate(profile))
        .map(|(entity, profile)| (profile.id, entity))
        .collect();
    doomed.sort_by_key(|(id, _)| *id);

    let mut removed = Vec::with_capacity(doomed.len());
    for (id, entity) in doomed {
        if remove_enemy(world, entity, reason, events) {
            removed.push(id);
        }
    }
    removed
}

/// Drop enemies whose position has become non-finite. They cannot be steered
/// or rendered, so they leave the field without touching the defender.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>, events: &mut Vec<GameEvent>) {
    despawn_buffer.clear();
    for (entity, (profile, pos)) in world.query_mut::<(&EnemyProfile, &Position)>() {
        if !(pos.x.is_finite() && pos.y.is_finite() && pos.z.is_finite()) {
            warn!(id = %profile.id, "enemy position is not finite, removed");
            despawn_buffer.push(entity);
        }
    }
    for entity in despawn_buffer.drain(..) {
        remove_enemy(world, entity, RemovalReason::Discarded, events);
    }
}

/// Despawn everything (session reset). No events are emitted.
pub fn despawn_all(world: &mut World) {
    world.clear();
}
