//! Pairwise separation between enemies.
//!
//! Ships carry their word as a floating label, so two enemies overlap visually
//! well before their hulls touch. The minimum distance therefore includes both
//! collision radii plus half of each rendered word width, and word width
//! depends on how far the ship is from the defender (text shrinks up close).

use glam::DVec3;

use wordstrike_core::constants::*;
use wordstrike_core::types::EnemyId;

/// Font scale for a label at `distance` from the defender.
pub fn font_scale(distance: f64) -> f64 {
    (distance / FONT_FULL_SCALE_DISTANCE).clamp(MIN_FONT_SCALE, 1.0)
}

/// Rendered width of a word of `len` letters at `distance` from the defender.
pub fn word_width(len: usize, distance: f64) -> f64 {
    len as f64 * LETTER_WIDTH * font_scale(distance)
}

pub fn collision_radius(is_boss: bool) -> f64 {
    if is_boss {
        BOSS_COLLISION_RADIUS
    } else {
        ENEMY_COLLISION_RADIUS
    }
}

/// What the separation pass needs to know about one ship.
#[derive(Debug, Clone, Copy)]
pub struct SeparationBody {
    pub id: EnemyId,
    pub position: DVec3,
    pub is_boss: bool,
    pub word_len: usize,
    /// Current distance to the defender (drives word width).
    pub defender_distance: f64,
}

/// Distance below which two ships push each other apart.
pub fn min_separation(a: &SeparationBody, b: &SeparationBody) -> f64 {
    collision_radius(a.is_boss)
        + collision_radius(b.is_boss)
        + (word_width(a.word_len, a.defender_distance) + word_width(b.word_len, b.defender_distance))
            / 2.0
        + SEPARATION_BUFFER
}

/// Accumulated repulsion on `body` from every ship in `others` that is too close.
///
/// Each contributor pushes along the line between the two ships with
/// magnitude `1 + how_much_too_close`, where `how_much_too_close` is the
/// overlap as a fraction of the minimum distance. Coincident ships are split
/// sideways, lower id to the left.
pub fn separation_force(body: &SeparationBody, others: &[SeparationBody]) -> DVec3 {
    let mut force = DVec3::ZERO;
    for other in others {
        if other.id == body.id {
            continue;
        }
        let min_dist = min_separation(body, other);
        let offset = body.position - other.position;
        let dist = offset.length();
        if dist >= min_dist {
            continue;
        }

        let too_close = (min_dist - dist) / min_dist;
        let away = if dist > 1e-6 {
            offset / dist
        } else if body.id < other.id {
            DVec3::NEG_X
        } else {
            DVec3::X
        };
        force += away * (1.0 + too_close);
    }
    force
}
