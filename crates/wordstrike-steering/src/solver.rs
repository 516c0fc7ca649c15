//! Per-tick movement solver.
//!
//! For every body: check arrival, turn toward the defender at a bounded rate,
//! gather separation from every other live body, then integrate
//! `position += direction × speed × dt + separation × dt × SEPARATION_GAIN`.
//! Separation uses positions from the start of the tick, so the result does
//! not depend on body order. Held bodies stay put but still repel the others.

use std::f64::consts::{PI, TAU};

use glam::DVec3;

use wordstrike_core::constants::*;
use wordstrike_core::types::EnemyId;

use crate::separation::{collision_radius, separation_force, SeparationBody};

/// Input state of one enemy for this tick.
#[derive(Debug, Clone, Copy)]
pub struct SteeringBody {
    pub id: EnemyId,
    pub position: DVec3,
    /// Current facing (radians around +y, 0 = +z).
    pub heading: f64,
    /// Cruise speed (units/s).
    pub speed: f64,
    pub is_boss: bool,
    pub word_len: usize,
    /// Holds position this tick and can not reach the defender.
    pub held: bool,
}

/// How an enemy got to the defender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReachKind {
    /// Remaining distance fell below the arrival threshold.
    Arrived,
    /// Hull overlapped the defender's hull after moving.
    Collided,
}

/// Result for one body.
#[derive(Debug, Clone, Copy)]
pub struct SteeringOutcome {
    pub id: EnemyId,
    pub position: DVec3,
    /// Effective velocity over the tick (units/s).
    pub velocity: DVec3,
    pub heading: f64,
    /// Set when the enemy reached the defender; it should be removed.
    pub reached: Option<ReachKind>,
}

/// Advance all bodies by `dt` seconds toward `defender`.
pub fn step(bodies: &[SteeringBody], defender: DVec3, dt: f64) -> Vec<SteeringOutcome> {
    let arrived: Vec<bool> = bodies
        .iter()
        .map(|b| !b.held && b.position.distance(defender) < DEFENDER_REACH_DISTANCE)
        .collect();

    // Ships that arrive this tick no longer repel anybody.
    let live: Vec<SeparationBody> = bodies
        .iter()
        .zip(&arrived)
        .filter(|&(_, &arrived)| !arrived)
        .map(|(b, _)| separation_body(b, defender))
        .collect();

    bodies
        .iter()
        .zip(&arrived)
        .map(|(body, &arrived)| {
            if arrived {
                return SteeringOutcome {
                    id: body.id,
                    position: body.position,
                    velocity: DVec3::ZERO,
                    heading: body.heading,
                    reached: Some(ReachKind::Arrived),
                };
            }
            if body.held {
                return SteeringOutcome {
                    id: body.id,
                    position: body.position,
                    velocity: DVec3::ZERO,
                    heading: body.heading,
                    reached: None,
                };
            }
            advance(body, &live, defender, dt)
        })
        .collect()
}

fn advance(
    body: &SteeringBody,
    live: &[SeparationBody],
    defender: DVec3,
    dt: f64,
) -> SteeringOutcome {
    let direction = (defender - body.position).normalize_or_zero();
    let desired_heading = direction.x.atan2(direction.z);
    let heading = turn_toward(body.heading, desired_heading, MAX_TURN_RATE * dt);

    let separation = separation_force(&separation_body(body, defender), live);
    let displacement = direction * body.speed * dt + separation * dt * SEPARATION_GAIN;
    let position = body.position + displacement;

    let velocity = if dt > 0.0 {
        displacement / dt
    } else {
        DVec3::ZERO
    };

    let overlap = DEFENDER_COLLISION_RADIUS + collision_radius(body.is_boss);
    let reached = (position.distance(defender) < overlap).then_some(ReachKind::Collided);

    SteeringOutcome {
        id: body.id,
        position,
        velocity,
        heading,
        reached,
    }
}

fn separation_body(body: &SteeringBody, defender: DVec3) -> SeparationBody {
    SeparationBody {
        id: body.id,
        position: body.position,
        is_boss: body.is_boss,
        word_len: body.word_len,
        defender_distance: body.position.distance(defender),
    }
}

/// Rotate `current` toward `target` by at most `max_delta` radians,
/// taking the short way around. Result is wrapped into `(-PI, PI]`.
pub fn turn_toward(current: f64, target: f64, max_delta: f64) -> f64 {
    let diff = shortest_angle(current, target);
    let turned = current + diff.clamp(-max_delta, max_delta);
    wrap_angle(turned)
}

fn shortest_angle(from: f64, to: f64) -> f64 {
    (to - from + PI).rem_euclid(TAU) - PI
}

fn wrap_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}
