//! Movement system.
//!
//! Gathers every enemy that is still in play, hands them to the steering
//! solver in id order, and writes the new kinematics back. Enemies waiting on
//! a word completion hold position but still push their neighbours apart.
//! Enemies that reach the defender are reported to the caller, which routes
//! them to combat resolution.

use hecs::{Entity, World};

use wordstrike_core::components::{EnemyProfile, Heading, PendingCompletion};
use wordstrike_core::types::{EnemyId, Position, Velocity};
use wordstrike_steering::{step, SteeringBody};
use wordstrike_typing::text::char_len;

use crate::world_setup::DEFENDER_POSITION;

/// An enemy that got to the defender this tick.
#[derive(Debug, Clone, Copy)]
pub struct ReachedDefender {
    pub entity: Entity,
    pub id: EnemyId,
    pub is_boss: bool,
}

/// Advance all enemies by `dt`. Reached enemies are pushed onto `reached`.
pub fn run(world: &mut World, dt: f64, reached: &mut Vec<ReachedDefender>) {
    let mut movers: Vec<(Entity, SteeringBody)> = world
        .query::<(&EnemyProfile, &Position, &Heading, Option<&PendingCompletion>)>()
        .iter()
        .map(|(entity, (profile, pos, heading, pending))| {
            (
                entity,
                SteeringBody {
                    id: profile.id,
                    position: pos.to_vec(),
                    heading: heading.yaw,
                    speed: profile.speed,
                    is_boss: profile.is_boss,
                    word_len: char_len(&profile.word),
                    held: pending.is_some(),
                },
            )
        })
        .collect();
    movers.sort_by_key(|(_, body)| body.id);

    let bodies: Vec<SteeringBody> = movers.iter().map(|(_, body)| *body).collect();
    let outcomes = step(&bodies, DEFENDER_POSITION, dt);

    for ((entity, body), outcome) in movers.iter().zip(outcomes) {
        if let Ok((pos, vel, heading)) =
            world.query_one_mut::<(&mut Position, &mut Velocity, &mut Heading)>(*entity)
        {
            *pos = Position::from_vec(outcome.position);
            *vel = Velocity::from_vec(outcome.velocity);
            heading.yaw = outcome.heading;
        }
        if outcome.reached.is_some() {
            reached.push(ReachedDefender {
                entity: *entity,
                id: body.id,
                is_boss: body.is_boss,
            });
        }
    }
}

/// Zero every enemy's velocity (used while movement is frozen).
pub fn halt(world: &mut World) {
    for (_entity, vel) in world.query_mut::<&mut Velocity>() {
        *vel = Velocity::default();
    }
}
