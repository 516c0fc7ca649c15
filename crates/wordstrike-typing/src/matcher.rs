//! Keystroke state machine.
//!
//! States: `Idle` (no focus) and `Targeting` (one enemy has focus, with the
//! prefix typed so far). Transitions per key:
//!
//! - printable, Idle: lock onto the first enemy (list order) whose word starts
//!   with the key and that has no progress yet.
//! - printable, Targeting: advance on a match, complete on the last letter,
//!   otherwise report a mistype and stay put.
//! - Backspace: drop one letter; focus is kept even at zero.
//! - Tab: move focus to the next enemy in list order, wrapping around (back to
//!   the same enemy when it is the only one), starting from scratch.
//! - Enter: request an EMP when it is off cooldown.
//! - Escape: request a pause toggle when the screen allows it.

use serde::{Deserialize, Serialize};

use wordstrike_core::enums::Key;
use wordstrike_core::types::EnemyId;

use crate::text::{char_at, char_len, chars_match, is_prefix_ignore_case};

/// What the matcher needs to know about one live enemy.
#[derive(Debug, Clone, Copy)]
pub struct TargetView<'a> {
    pub id: EnemyId,
    pub word: &'a str,
    pub typed_characters: usize,
    /// Word already submitted and awaiting resolution; cannot be targeted.
    pub locked: bool,
}

/// Session flags that gate the non-letter keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyContext {
    pub emp_ready: bool,
    pub pause_allowed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypingState {
    #[default]
    Idle,
    Targeting {
        id: EnemyId,
        /// Characters typed so far, exactly as pressed.
        typed: String,
    },
}

/// The effect of one key, for the simulation to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Key has no meaning in the current state.
    Ignored,
    /// Idle keypress matched no enemy.
    NoMatch { key: char },
    /// Focus taken on `id` with its first letter typed.
    Acquired { id: EnemyId },
    Advanced { id: EnemyId, typed_characters: usize },
    /// Final letter typed; focus released.
    Completed { id: EnemyId, typed: String },
    /// Key did not match the next letter of the focused word.
    Mistyped { id: EnemyId, key: char },
    Retreated { id: EnemyId, typed_characters: usize },
    /// Focus moved by Tab. `from` (if any) should lose its progress.
    Switched { from: Option<EnemyId>, to: EnemyId },
    EmpRequested,
    PauseToggled,
}

/// A correction made by `reconcile` when focus no longer fits the enemy list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Repair {
    /// Focused enemy no longer exists (or was locked); focus dropped.
    ReleasedMissing { id: EnemyId },
    /// Typed prefix no longer matches the enemy's word; focus dropped.
    ReleasedMismatch { id: EnemyId },
    /// Enemy progress disagreed with the typed prefix; progress should be set to this.
    ProgressResynced { id: EnemyId, typed_characters: usize },
}

#[derive(Debug, Clone, Default)]
pub struct TypingMatcher {
    state: TypingState,
}

impl TypingMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &TypingState {
        &self.state
    }

    /// The enemy with input focus, if any.
    pub fn active(&self) -> Option<EnemyId> {
        match &self.state {
            TypingState::Idle => None,
            TypingState::Targeting { id, .. } => Some(*id),
        }
    }

    /// The prefix typed against the focused enemy ("" when idle).
    pub fn typed(&self) -> &str {
        match &self.state {
            TypingState::Idle => "",
            TypingState::Targeting { typed, .. } => typed,
        }
    }

    /// Drop focus unconditionally.
    pub fn release(&mut self) {
        self.state = TypingState::Idle;
    }

    /// Drop focus if it is on `id`. Returns whether it was.
    pub fn release_if(&mut self, id: EnemyId) -> bool {
        if self.active() == Some(id) {
            self.release();
            true
        } else {
            false
        }
    }

    /// Process one key against the live enemies (in list order).
    pub fn handle_key(
        &mut self,
        key: Key,
        enemies: &[TargetView<'_>],
        ctx: KeyContext,
    ) -> MatchOutcome {
        // Focus on a vanished or locked enemy is treated as no focus at all.
        if let Some(id) = self.active() {
            if !enemies.iter().any(|e| e.id == id && !e.locked) {
                self.release();
            }
        }

        match key {
            Key::Char(c) if !c.is_control() => self.handle_char(c, enemies),
            Key::Backspace => self.handle_backspace(),
            Key::Tab => self.handle_tab(enemies),
            Key::Enter if ctx.emp_ready => MatchOutcome::EmpRequested,
            Key::Escape if ctx.pause_allowed => MatchOutcome::PauseToggled,
            _ => MatchOutcome::Ignored,
        }
    }

    fn handle_char(&mut self, c: char, enemies: &[TargetView<'_>]) -> MatchOutcome {
        if self.state == TypingState::Idle {
            return self.acquire(c, enemies);
        }
        let TypingState::Targeting { id, typed } = &mut self.state else {
            return MatchOutcome::Ignored;
        };
        let id = *id;

        let Some(target) = enemies.iter().find(|e| e.id == id) else {
            return MatchOutcome::Ignored;
        };
        let position = char_len(typed);
        let Some(expected) = char_at(target.word, position) else {
            return MatchOutcome::Ignored;
        };
        if !chars_match(c, expected) {
            return MatchOutcome::Mistyped { id, key: c };
        }

        typed.push(c);
        let typed_characters = position + 1;
        if typed_characters == char_len(target.word) {
            let typed = std::mem::take(typed);
            self.release();
            MatchOutcome::Completed { id, typed }
        } else {
            MatchOutcome::Advanced {
                id,
                typed_characters,
            }
        }
    }

    fn acquire(&mut self, c: char, enemies: &[TargetView<'_>]) -> MatchOutcome {
        let candidate = enemies.iter().find(|e| {
            !e.locked && e.typed_characters == 0 && char_at(e.word, 0).is_some_and(|f| chars_match(c, f))
        });
        let Some(target) = candidate else {
            return MatchOutcome::NoMatch { key: c };
        };

        if char_len(target.word) == 1 {
            return MatchOutcome::Completed {
                id: target.id,
                typed: c.to_string(),
            };
        }
        self.state = TypingState::Targeting {
            id: target.id,
            typed: c.to_string(),
        };
        MatchOutcome::Acquired { id: target.id }
    }

    fn handle_backspace(&mut self) -> MatchOutcome {
        match &mut self.state {
            TypingState::Idle => MatchOutcome::Ignored,
            TypingState::Targeting { id, typed } => {
                typed.pop();
                MatchOutcome::Retreated {
                    id: *id,
                    typed_characters: char_len(typed),
                }
            }
        }
    }

    fn handle_tab(&mut self, enemies: &[TargetView<'_>]) -> MatchOutcome {
        // `handle_key` already dropped focus on a locked or vanished enemy, so
        // the current target is itself a candidate for the wrap.
        let current = self.active();
        let candidates: Vec<EnemyId> = enemies
            .iter()
            .filter(|e| !e.locked)
            .map(|e| e.id)
            .collect();

        let next = match current {
            None => candidates.first().copied(),
            Some(cur) => candidates
                .iter()
                .copied()
                .find(|&id| id > cur)
                .or_else(|| candidates.first().copied()),
        };
        let Some(to) = next else {
            return MatchOutcome::Ignored;
        };

        self.state = TypingState::Targeting {
            id: to,
            typed: String::new(),
        };
        MatchOutcome::Switched { from: current, to }
    }

    /// Check focus against the live enemy list and fix anything inconsistent.
    pub fn reconcile(&mut self, enemies: &[TargetView<'_>]) -> Option<Repair> {
        let (id, typed) = match &self.state {
            TypingState::Idle => return None,
            TypingState::Targeting { id, typed } => (*id, typed),
        };

        let Some(target) = enemies.iter().find(|e| e.id == id && !e.locked) else {
            self.release();
            return Some(Repair::ReleasedMissing { id });
        };
        if !is_prefix_ignore_case(typed, target.word) {
            self.release();
            return Some(Repair::ReleasedMismatch { id });
        }
        let typed_characters = char_len(typed);
        (target.typed_characters != typed_characters).then_some(Repair::ProgressResynced {
            id,
            typed_characters,
        })
    }
}
