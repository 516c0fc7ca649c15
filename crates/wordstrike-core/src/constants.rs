//! Simulation constants and tuning parameters.

// --- Frame timing ---

/// Nominal host frame rate (Hz). The simulation itself runs on variable dt.
pub const TARGET_FRAME_RATE: u32 = 60;

/// Largest delta-time a single tick may consume (seconds).
/// Stalls (tab switch, debugger) are truncated to this to avoid jumps.
pub const MAX_FRAME_DT: f64 = 0.1;

// --- Level curve ---

pub const MAX_LEVEL: u32 = 100;

/// Target words-per-minute at level 1.
pub const BASE_WPM: f64 = 20.0;

/// Target words-per-minute at MAX_LEVEL.
pub const MAX_WPM: f64 = 400.0;

/// Characters per "word" for WPM purposes.
pub const CHARS_PER_WORD: f64 = 5.0;

// --- Enemy speed ---

/// Divisor applied to chars/s × word length to get a baseline speed.
pub const SPEED_BASELINE_DIVISOR: f64 = 18.0;

/// Words shorter than this are treated as this long for speed purposes.
pub const SPEED_MIN_WORD_LEN: usize = 3;

pub const SPEED_SCALE_BASE: f64 = 2.0;
pub const SPEED_SCALE_PER_LEVEL: f64 = 0.04;
pub const SPEED_SCALE_LEVEL_CAP: u32 = 30;

pub const ENEMY_MIN_SPEED: f64 = 1.8;
pub const ENEMY_MAX_SPEED: f64 = 10.0;

pub const BOSS_MIN_SPEED: f64 = 0.6;
pub const BOSS_MAX_SPEED: f64 = 3.5;

/// Boss speed scale in programming-language modes (long identifiers).
pub const BOSS_SPEED_SCALE_PROGRAMMING: f64 = 0.6;
pub const BOSS_SPEED_SCALE_DEFAULT: f64 = 0.7;

/// Boss words longer than this get an extra slow-down.
pub const BOSS_LONG_WORD_THRESHOLD: usize = 40;
pub const BOSS_LONG_WORD_FACTOR: f64 = 0.8;

pub const BOSS_LEVEL_FACTOR_BASE: f64 = 0.85;
pub const BOSS_LEVEL_FACTOR_LEVEL_CAP: u32 = 120;
pub const BOSS_LEVEL_FACTOR_DIVISOR: f64 = 240.0;

// --- Enemy health ---

pub const ENEMY_BASE_HEALTH: f64 = 10.0;
pub const ENEMY_HEALTH_PER_LEVEL: f64 = 0.5;
pub const BOSS_BASE_HEALTH: f64 = 100.0;
pub const BOSS_HEALTH_PER_LEVEL: f64 = 10.0;

// --- Spawning ---

pub const SPAWN_RATE_BASE_SECS: f64 = 4.0;
pub const SPAWN_RATE_PER_LEVEL: f64 = 0.03;
pub const SPAWN_RATE_MIN_SECS: f64 = 1.5;

pub const BASE_MAX_ENEMIES: u32 = 3;

/// One extra concurrent enemy is allowed every this many levels.
pub const LEVELS_PER_EXTRA_ENEMY: u32 = 15;

/// Every Nth level is a boss level.
pub const BOSS_LEVEL_INTERVAL: u32 = 3;

/// Below this level every non-boss enemy is `Basic`.
pub const FAST_ENEMY_MIN_LEVEL: u32 = 5;
pub const FAST_CHANCE_BASE: f64 = 0.2;
pub const FAST_CHANCE_PER_LEVEL: f64 = 0.04;
pub const FAST_CHANCE_MAX: f64 = 0.6;

/// Fast enemies take the longest of this many sampled words.
pub const FAST_WORD_CANDIDATES: usize = 3;

// --- Field layout ---

/// Depth at which enemies appear (they travel toward z = 0).
pub const SPAWN_DEPTH: f64 = -60.0;

/// Lateral offset of each spawn lane, indexed by `SpawnLane::index`.
pub const LANE_OFFSETS: [f64; 3] = [-14.0, 0.0, 14.0];

/// A lane is blocked while an enemy spawned in it is closer than this to the lane origin.
pub const LANE_CLEARANCE_DISTANCE: f64 = 8.0;

// --- Movement ---

/// Remaining distance below which an enemy is considered to have arrived.
pub const DEFENDER_REACH_DISTANCE: f64 = 1.5;

/// Radius of the defender ship for direct overlap checks.
pub const DEFENDER_COLLISION_RADIUS: f64 = 2.0;

pub const ENEMY_COLLISION_RADIUS: f64 = 1.0;
pub const BOSS_COLLISION_RADIUS: f64 = 2.5;

/// Maximum heading change (radians/s).
pub const MAX_TURN_RATE: f64 = 2.5;

/// Multiplier on the separation term; ≫ 1 so avoidance dominates when crowded.
pub const SEPARATION_GAIN: f64 = 6.0;

/// Fixed gap added to every pairwise separation distance.
pub const SEPARATION_BUFFER: f64 = 0.5;

/// Width of one rendered letter at full font scale (units).
pub const LETTER_WIDTH: f64 = 0.6;

/// Font scale never shrinks below this, however close the enemy gets.
pub const MIN_FONT_SCALE: f64 = 0.5;

/// At or beyond this distance from the defender text renders at full scale.
pub const FONT_FULL_SCALE_DISTANCE: f64 = 40.0;

// --- Combat ---

pub const POINTS_PER_CHAR: u64 = 10;
pub const BOSS_SCORE_MULTIPLIER: u64 = 2;

pub const ENEMY_DAMAGE: u32 = 10;
pub const BOSS_DAMAGE: u32 = 50;

/// The level advances every time words-correct reaches a multiple of this.
pub const WORDS_PER_LEVEL: u32 = 5;

/// A trivia question is due every this many boss defeats.
pub const BOSSES_PER_TRIVIA: u32 = 3;

pub const DEFENDER_MAX_HEALTH: u32 = 100;
pub const DEFENDER_MAX_SHIELD: u32 = 100;
pub const DEFENDER_START_SHIELD: u32 = 0;

/// EMP cooldown in ticks (~30 s at 60 Hz).
pub const EMP_MAX_COOLDOWN_TICKS: u32 = 1800;

/// Delay between typing the last letter and resolving the kill (seconds).
pub const WORD_COMPLETION_DELAY_SECS: f64 = 0.05;

// --- Bonus items ---

pub const MAX_BONUS_SLOTS: usize = 4;
pub const HEAL_AMOUNT: u32 = 30;
pub const SHIELD_AMOUNT: u32 = 50;
pub const FREEZE_DURATION_SECS: f64 = 5.0;
pub const FREEZE_USES: u32 = 2;

// --- Statistics ---

/// WPM is reported as 0 until this much active time has elapsed.
pub const WPM_MIN_ELAPSED_SECS: f64 = 1.0;

/// Number of high-score entries kept by the profile store.
pub const HIGH_SCORE_LIMIT: usize = 10;
