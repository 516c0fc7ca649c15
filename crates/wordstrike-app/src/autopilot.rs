//! Bot typist used for headless soak runs.
//!
//! Each frame the bot reads the latest snapshot and returns the commands a
//! player typing at a fixed WPM would issue: keep typing the focused word,
//! otherwise pick the closest enemy it can lock onto, pop the EMP when the
//! defender is crowded, and answer every trivia prompt with the first choice.

use wordstrike_core::commands::PlayerCommand;
use wordstrike_core::constants::CHARS_PER_WORD;
use wordstrike_core::enums::{GamePhase, Key};
use wordstrike_core::state::{EnemyView, GameStateSnapshot};
use wordstrike_core::types::{EnemyId, Position};

/// Enemies closer than this to the defender count as a threat.
pub const DANGER_RADIUS: f64 = 15.0;

/// Threat count that triggers the EMP.
pub const DANGER_COUNT: usize = 3;

/// Keystrokes that may pile up across a stall.
const MAX_BURST: f64 = 8.0;

#[derive(Debug, Clone)]
pub struct Autopilot {
    chars_per_sec: f64,
    budget: f64,
}

impl Autopilot {
    pub fn new(wpm: f64) -> Self {
        Self {
            chars_per_sec: wpm.max(0.0) * CHARS_PER_WORD / 60.0,
            budget: 0.0,
        }
    }

    /// Commands to queue before the next tick of `dt` seconds.
    pub fn plan(&mut self, snapshot: &GameStateSnapshot, dt: f64) -> Vec<PlayerCommand> {
        match snapshot.phase {
            GamePhase::TriviaPrompt => {
                return vec![PlayerCommand::AnswerTrivia { choice: 0 }];
            }
            GamePhase::Active => {}
            _ => {
                self.budget = 0.0;
                return Vec::new();
            }
        }

        if under_threat(snapshot) {
            return vec![PlayerCommand::KeyPress { key: Key::Enter }];
        }

        self.budget = (self.budget + self.chars_per_sec * dt.max(0.0)).min(MAX_BURST);

        // The snapshot already reflects every key sent so far, so the focused
        // enemy tells us exactly what is left to type.
        let mut remaining: Vec<char> = snapshot
            .enemies
            .iter()
            .find(|e| e.targeted)
            .map(|e| e.word.chars().skip(e.typed_characters).collect())
            .unwrap_or_default();
        remaining.reverse();

        let mut finished: Vec<EnemyId> = Vec::new();
        let mut commands = Vec::new();
        while self.budget >= 1.0 {
            if remaining.is_empty() {
                let Some(enemy) = choose_target(&snapshot.enemies, &finished) else {
                    break;
                };
                finished.push(enemy.id);
                remaining = enemy.word.chars().rev().collect();
            }
            let Some(c) = remaining.pop() else {
                break;
            };
            commands.push(PlayerCommand::KeyPress { key: Key::Char(c) });
            self.budget -= 1.0;
        }
        commands
    }
}

fn under_threat(snapshot: &GameStateSnapshot) -> bool {
    if snapshot.hud.emp_cooldown > 0 {
        return false;
    }
    let defender = Position::default();
    let close = snapshot
        .enemies
        .iter()
        .filter(|e| e.position.range_to(&defender) < DANGER_RADIUS)
        .count();
    close >= DANGER_COUNT
}

/// Closest untouched enemy that its own first letter would lock onto.
///
/// A letter acquires the lowest-id free enemy starting with it, so an enemy
/// sharing its first letter with a lower-id free enemy is out of reach.
fn choose_target<'a>(enemies: &'a [EnemyView], finished: &[EnemyId]) -> Option<&'a EnemyView> {
    let free: Vec<&EnemyView> = enemies
        .iter()
        .filter(|e| e.typed_characters == 0 && !e.word.is_empty() && !finished.contains(&e.id))
        .collect();
    let defender = Position::default();

    free.iter()
        .copied()
        .filter(|candidate| {
            let first = first_lower(&candidate.word);
            !free
                .iter()
                .any(|other| other.id < candidate.id && first_lower(&other.word) == first)
        })
        .min_by(|a, b| {
            a.position
                .range_to(&defender)
                .total_cmp(&b.position.range_to(&defender))
        })
}

fn first_lower(word: &str) -> Option<char> {
    word.chars().next().and_then(|c| c.to_lowercase().next())
}
