//! Entity spawn factories and lookups for the simulation world.

use glam::DVec3;
use hecs::{Entity, World};

use wordstrike_core::components::*;
use wordstrike_core::constants::*;
use wordstrike_core::enums::{EnemyType, SpawnLane};
use wordstrike_core::types::{EnemyId, Position, Velocity};

/// The defender sits at the origin and never moves.
pub const DEFENDER_POSITION: DVec3 = DVec3::ZERO;

/// Everything needed to create one enemy.
#[derive(Debug, Clone)]
pub struct EnemySpawn {
    pub id: EnemyId,
    pub word: String,
    pub enemy_type: EnemyType,
    pub is_boss: bool,
    pub lane: SpawnLane,
    pub speed: f64,
    pub health: u32,
}

/// Where a lane's enemies appear.
pub fn lane_origin(lane: SpawnLane) -> Position {
    Position::new(LANE_OFFSETS[lane.index()], 0.0, SPAWN_DEPTH)
}

/// Spawn an enemy at its lane origin, already facing the defender.
pub fn spawn_enemy(world: &mut World, spawn: EnemySpawn) -> Entity {
    let position = lane_origin(spawn.lane);
    let to_defender = DEFENDER_POSITION - position.to_vec();
    let heading = Heading {
        yaw: to_defender.x.atan2(to_defender.z),
    };
    let hull = Hull {
        health: spawn.health,
        max_health: spawn.health,
    };
    let profile = EnemyProfile {
        id: spawn.id,
        word: spawn.word,
        enemy_type: spawn.enemy_type,
        is_boss: spawn.is_boss,
        lane: spawn.lane,
        speed: spawn.speed,
    };

    world.spawn((
        profile,
        position,
        Velocity::default(),
        heading,
        hull,
        TypingProgress::default(),
    ))
}

/// Find the entity carrying enemy `id`, if it is still alive.
pub fn find_enemy(world: &World, id: EnemyId) -> Option<Entity> {
    world
        .query::<&EnemyProfile>()
        .iter()
        .find(|(_, profile)| profile.id == id)
        .map(|(entity, _)| entity)
}

pub fn enemy_count(world: &World) -> u32 {
    world.query::<&EnemyProfile>().iter().count() as u32
}
