//! Difficulty buckets: which named tier applies at a given level.
//!
//! The player's starting preference selects one of three threshold tables.
//! Each table is an ordered list of inclusive level ranges that must tile
//! `1..=MAX_LEVEL` exactly; this is checked at compile time below.

use wordstrike_core::constants::MAX_LEVEL;
use wordstrike_core::enums::Difficulty;

/// An inclusive level range mapped to a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketRange {
    pub first_level: u32,
    pub last_level: u32,
    pub bucket: Difficulty,
}

const fn range(first_level: u32, last_level: u32, bucket: Difficulty) -> BucketRange {
    BucketRange {
        first_level,
        last_level,
        bucket,
    }
}

pub const EASY_START_TABLE: [BucketRange; 5] = [
    range(1, 9, Difficulty::Easy),
    range(10, 24, Difficulty::Normal),
    range(25, 44, Difficulty::Hard),
    range(45, 69, Difficulty::Expert),
    range(70, MAX_LEVEL, Difficulty::Master),
];

pub const NORMAL_START_TABLE: [BucketRange; 4] = [
    range(1, 14, Difficulty::Normal),
    range(15, 34, Difficulty::Hard),
    range(35, 59, Difficulty::Expert),
    range(60, MAX_LEVEL, Difficulty::Master),
];

pub const HARD_START_TABLE: [BucketRange; 3] = [
    range(1, 9, Difficulty::Hard),
    range(10, 29, Difficulty::Expert),
    range(30, MAX_LEVEL, Difficulty::Master),
];

/// True when the ranges start at 1, are contiguous and non-overlapping,
/// end at MAX_LEVEL, and never step down a bucket.
pub const fn table_is_well_formed(table: &[BucketRange]) -> bool {
    if table.is_empty() || table[0].first_level != 1 {
        return false;
    }
    let mut i = 0;
    while i < table.len() {
        let r = table[i];
        if r.first_level > r.last_level {
            return false;
        }
        if i > 0 {
            let prev = table[i - 1];
            if r.first_level != prev.last_level + 1 || (r.bucket as u8) < (prev.bucket as u8) {
                return false;
            }
        }
        i += 1;
    }
    table[table.len() - 1].last_level == MAX_LEVEL
}

const _: () = assert!(table_is_well_formed(&EASY_START_TABLE));
const _: () = assert!(table_is_well_formed(&NORMAL_START_TABLE));
const _: () = assert!(table_is_well_formed(&HARD_START_TABLE));

/// The threshold table for a starting preference.
pub fn table_for(preference: Difficulty) -> &'static [BucketRange] {
    match preference {
        Difficulty::Easy => &EASY_START_TABLE,
        Difficulty::Normal => &NORMAL_START_TABLE,
        Difficulty::Hard | Difficulty::Expert | Difficulty::Master => &HARD_START_TABLE,
    }
}

/// Find the range containing `level`. `None` if the level is outside the table.
pub fn lookup(table: &[BucketRange], level: u32) -> Option<Difficulty> {
    table
        .iter()
        .find(|r| r.first_level <= level && level <= r.last_level)
        .map(|r| r.bucket)
}

/// Bucket for a level given the player's starting preference.
///
/// Levels outside `1..=MAX_LEVEL` are clamped first, so the lookup always
/// lands in a range of the (compile-time checked) table.
pub fn difficulty_bucket(level: u32, preference: Difficulty) -> Difficulty {
    let table = table_for(preference);
    let level = level.clamp(1, MAX_LEVEL);
    match lookup(table, level) {
        Some(bucket) => bucket,
        None => {
            debug_assert!(false, "bucket table does not cover level {level}");
            table[table.len() - 1].bucket
        }
    }
}

/// Speed multiplier applied on top of the raw enemy speed.
pub fn difficulty_multiplier(difficulty: Difficulty) -> f64 {
    match difficulty {
        Difficulty::Easy => 0.6,
        Difficulty::Normal => 1.0,
        Difficulty::Hard => 1.35,
        Difficulty::Expert => 1.65,
        Difficulty::Master => 2.0,
    }
}
