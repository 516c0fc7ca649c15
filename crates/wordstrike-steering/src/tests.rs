use approx::assert_relative_eq;
use glam::DVec3;

use wordstrike_core::constants::*;
use wordstrike_core::types::EnemyId;

use crate::separation::{font_scale, min_separation, separation_force, word_width, SeparationBody};
use crate::solver::{step, turn_toward, ReachKind, SteeringBody};

const DT: f64 = 1.0 / 60.0;

fn body(id: u64, x: f64, z: f64) -> SteeringBody {
    SteeringBody {
        id: EnemyId(id),
        position: DVec3::new(x, 0.0, z),
        heading: 0.0,
        speed: 2.0,
        is_boss: false,
        word_len: 5,
        held: false,
    }
}

fn sep(id: u64, x: f64, z: f64, word_len: usize) -> SeparationBody {
    let position = DVec3::new(x, 0.0, z);
    SeparationBody {
        id: EnemyId(id),
        position,
        is_boss: false,
        word_len,
        defender_distance: position.length(),
    }
}

// ---- Approach ----

#[test]
fn test_lone_enemy_moves_straight_at_defender() {
    let out = step(&[body(1, 0.0, -50.0)], DVec3::ZERO, 0.5);
    assert_eq!(out.len(), 1);
    assert_relative_eq!(out[0].position.z, -49.0, epsilon = 1e-12);
    assert_relative_eq!(out[0].position.x, 0.0);
    assert_relative_eq!(out[0].velocity.length(), 2.0, epsilon = 1e-12);
    assert!(out[0].reached.is_none());
}

#[test]
fn test_speed_sets_distance_per_second() {
    let mut bodies = vec![body(1, 0.0, -50.0)];
    for _ in 0..60 {
        let out = step(&bodies, DVec3::ZERO, DT);
        bodies[0].position = out[0].position;
        bodies[0].heading = out[0].heading;
    }
    assert_relative_eq!(bodies[0].position.z, -48.0, epsilon = 1e-9);
}

#[test]
fn test_arrival_threshold_skips_movement() {
    let mut b = body(1, 0.0, -1.0);
    b.heading = 0.3;
    let out = step(&[b], DVec3::ZERO, DT);
    assert_eq!(out[0].reached, Some(ReachKind::Arrived));
    assert_eq!(out[0].position, b.position);
    assert_eq!(out[0].heading, 0.3);
}

#[test]
fn test_hull_overlap_counts_as_collision() {
    // 2.9 units out: outside the arrival threshold, inside the 2.0 + 1.0 hull overlap.
    let out = step(&[body(1, 0.0, -2.9)], DVec3::ZERO, DT);
    assert_eq!(out[0].reached, Some(ReachKind::Collided));
}

#[test]
fn test_boss_hull_collides_sooner() {
    let mut boss = body(1, 0.0, -4.4);
    boss.is_boss = true;
    let out = step(&[boss, body(2, 30.0, -40.0)], DVec3::ZERO, DT);
    assert_eq!(out[0].reached, Some(ReachKind::Collided));
    assert!(out[1].reached.is_none());
}

#[test]
fn test_zero_dt_is_stationary() {
    let b = body(1, 3.0, -20.0);
    let out = step(&[b], DVec3::ZERO, 0.0);
    assert_eq!(out[0].position, b.position);
    assert_eq!(out[0].velocity, DVec3::ZERO);
}

// ---- Turning ----

#[test]
fn test_turn_is_bounded_per_tick() {
    // Facing directly away from the defender.
    let mut b = body(1, 0.0, -30.0);
    b.heading = std::f64::consts::PI;
    let out = step(&[b], DVec3::ZERO, DT);
    let turned = (out[0].heading - b.heading).abs();
    let turned = turned.min(std::f64::consts::TAU - turned);
    assert_relative_eq!(turned, MAX_TURN_RATE * DT, epsilon = 1e-9);
}

#[test]
fn test_turn_settles_on_target() {
    let mut heading = 1.0;
    for _ in 0..120 {
        heading = turn_toward(heading, 0.0, MAX_TURN_RATE * DT);
    }
    assert_relative_eq!(heading, 0.0, epsilon = 1e-12);
}

#[test]
fn test_turn_takes_short_way_across_pi() {
    let heading = turn_toward(3.0, -3.0, 0.1);
    // Short way from 3.0 to -3.0 is +0.283 rad through PI.
    assert!(heading > 3.0 || heading < -3.0);
}

// ---- Separation ----

#[test]
fn test_font_shrinks_near_defender() {
    assert_relative_eq!(font_scale(80.0), 1.0);
    assert_relative_eq!(font_scale(FONT_FULL_SCALE_DISTANCE), 1.0);
    assert_relative_eq!(font_scale(30.0), 0.75);
    assert_relative_eq!(font_scale(1.0), MIN_FONT_SCALE);
    assert!(word_width(8, 10.0) < word_width(8, 50.0));
}

#[test]
fn test_min_separation_components() {
    let a = sep(1, 0.0, -50.0, 4);
    let b = sep(2, 5.0, -50.0, 6);
    // radii 1 + 1, widths (4 + 6) × 0.6 / 2 at full scale, buffer 0.5
    assert_relative_eq!(min_separation(&a, &b), 2.0 + 3.0 + 0.5, epsilon = 1e-12);
}

#[test]
fn test_far_apart_enemies_feel_nothing() {
    let a = sep(1, -20.0, -50.0, 5);
    let b = sep(2, 20.0, -50.0, 5);
    assert_eq!(separation_force(&a, &[a, b]), DVec3::ZERO);
}

#[test]
fn test_closer_means_stronger_push() {
    let a = sep(1, 0.0, -50.0, 5);
    let near = sep(2, 1.0, -50.0, 5);
    let nearer = sep(3, 0.2, -50.0, 5);
    let f_near = separation_force(&a, &[near]);
    let f_nearer = separation_force(&a, &[nearer]);
    assert!(f_near.x < 0.0, "pushed away from the neighbour on its right");
    assert!(f_nearer.length() > f_near.length());
    assert!(f_nearer.length() <= 2.0);
}

#[test]
fn test_coincident_enemies_split_deterministically() {
    let a = sep(1, 0.0, -40.0, 5);
    let b = sep(2, 0.0, -40.0, 5);
    assert!(separation_force(&a, &[b]).x < 0.0);
    assert!(separation_force(&b, &[a]).x > 0.0);
}

#[test]
fn test_crowded_pair_spreads_apart() {
    let bodies = [body(1, -0.5, -40.0), body(2, 0.5, -40.0)];
    let out = step(&bodies, DVec3::ZERO, DT);
    let before = bodies[0].position.distance(bodies[1].position);
    let after = out[0].position.distance(out[1].position);
    assert!(after > before, "separation should dominate when crowded");
}

#[test]
fn test_separation_radius_uses_live_distance() {
    // Same lateral gap; far away the labels are wide enough to overlap,
    // close in they have shrunk and no longer do.
    let far = [sep(1, -2.6, -60.0, 5), sep(2, 2.6, -60.0, 5)];
    let near = [sep(1, -2.6, -8.0, 5), sep(2, 2.6, -8.0, 5)];
    assert!(separation_force(&far[0], &far).length() > 0.0);
    assert_eq!(separation_force(&near[0], &near), DVec3::ZERO);
}

#[test]
fn test_arrived_enemies_do_not_repel() {
    let arriving = body(1, 0.0, -1.0);
    let neighbour = body(2, 0.5, -2.0);
    let alone = step(&[neighbour], DVec3::ZERO, DT);
    let together = step(&[arriving, neighbour], DVec3::ZERO, DT);
    assert_eq!(together[0].reached, Some(ReachKind::Arrived));
    assert_relative_eq!(together[1].position.x, alone[0].position.x, epsilon = 1e-12);
}

#[test]
fn test_held_body_stays_put_but_repels() {
    let held = SteeringBody {
        held: true,
        ..body(1, -0.5, -40.0)
    };
    let neighbour = body(2, 0.5, -40.0);
    let alone = step(&[neighbour], DVec3::ZERO, DT);
    let out = step(&[held, neighbour], DVec3::ZERO, DT);

    assert_eq!(out[0].position, held.position);
    assert_eq!(out[0].velocity, DVec3::ZERO);
    assert_eq!(out[0].reached, None);
    assert!(
        out[1].position.x > alone[0].position.x,
        "neighbour should be pushed away from the held body"
    );
}

#[test]
fn test_held_body_never_reaches_defender() {
    let held = SteeringBody {
        held: true,
        ..body(1, 0.0, -0.5)
    };
    let out = step(&[held], DVec3::ZERO, DT);
    assert_eq!(out[0].reached, None);
    assert_eq!(out[0].position, held.position);
}

#[test]
fn test_step_is_order_independent() {
    let a = body(1, -0.5, -30.0);
    let b = body(2, 0.7, -30.5);
    let c = body(3, 0.1, -29.0);
    let forward = step(&[a, b, c], DVec3::ZERO, DT);
    let reversed = step(&[c, b, a], DVec3::ZERO, DT);
    for out in &forward {
        let twin = reversed.iter().find(|o| o.id == out.id).unwrap();
        assert_relative_eq!(out.position.x, twin.position.x, epsilon = 1e-12);
        assert_relative_eq!(out.position.z, twin.position.z, epsilon = 1e-12);
    }
}
