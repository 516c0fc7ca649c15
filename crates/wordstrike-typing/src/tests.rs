use wordstrike_core::enums::Key;
use wordstrike_core::types::EnemyId;

use crate::matcher::{KeyContext, MatchOutcome, Repair, TargetView, TypingMatcher, TypingState};
use crate::text::{eq_ignore_case, is_prefix_ignore_case};

/// Minimal enemy table standing in for the world.
struct Field {
    enemies: Vec<(EnemyId, String, usize, bool)>,
}

impl Field {
    fn new(words: &[&str]) -> Self {
        Self {
            enemies: words
                .iter()
                .enumerate()
                .map(|(i, w)| (EnemyId(i as u64 + 1), w.to_string(), 0, false))
                .collect(),
        }
    }

    fn views(&self) -> Vec<TargetView<'_>> {
        self.enemies
            .iter()
            .map(|(id, word, typed, locked)| TargetView {
                id: *id,
                word,
                typed_characters: *typed,
                locked: *locked,
            })
            .collect()
    }

    fn set_progress(&mut self, id: EnemyId, typed: usize) {
        if let Some(e) = self.enemies.iter_mut().find(|e| e.0 == id) {
            e.2 = typed;
        }
    }

    fn remove(&mut self, id: EnemyId) {
        self.enemies.retain(|e| e.0 != id);
    }

    fn lock(&mut self, id: EnemyId) {
        if let Some(e) = self.enemies.iter_mut().find(|e| e.0 == id) {
            e.3 = true;
        }
    }

    /// Feed a key and apply the outcome the way the simulation does.
    fn press(&mut self, matcher: &mut TypingMatcher, key: Key) -> MatchOutcome {
        let ctx = KeyContext {
            emp_ready: true,
            pause_allowed: true,
        };
        let outcome = matcher.handle_key(key, &self.views(), ctx);
        match &outcome {
            MatchOutcome::Acquired { id } => self.set_progress(*id, 1),
            MatchOutcome::Advanced {
                id,
                typed_characters,
            }
            | MatchOutcome::Retreated {
                id,
                typed_characters,
            } => self.set_progress(*id, *typed_characters),
            MatchOutcome::Completed { id, .. } => self.lock(*id),
            MatchOutcome::Switched { from, to } => {
                if let Some(from) = from {
                    self.set_progress(*from, 0);
                }
                self.set_progress(*to, 0);
            }
            _ => {}
        }
        outcome
    }

    fn type_str(&mut self, matcher: &mut TypingMatcher, text: &str) -> Vec<MatchOutcome> {
        text.chars()
            .map(|c| self.press(matcher, Key::Char(c)))
            .collect()
    }

    fn progress(&self, id: EnemyId) -> usize {
        self.enemies
            .iter()
            .find(|e| e.0 == id)
            .map(|e| e.2)
            .unwrap_or(0)
    }
}

// ---- Text helpers ----

#[test]
fn test_prefix_ignores_case() {
    assert!(is_prefix_ignore_case("CA", "cat"));
    assert!(is_prefix_ignore_case("", "cat"));
    assert!(!is_prefix_ignore_case("cats", "cat"));
    assert!(!is_prefix_ignore_case("co", "cat"));
    assert!(eq_ignore_case("Ünïcode", "üNÏCODE"));
    assert!(!eq_ignore_case("cat", "cats"));
}

// ---- Acquisition ----

#[test]
fn test_first_letter_acquires_matching_enemy() {
    let mut field = Field::new(&["dog", "cat"]);
    let mut matcher = TypingMatcher::new();
    let outcome = field.press(&mut matcher, Key::Char('c'));
    assert_eq!(outcome, MatchOutcome::Acquired { id: EnemyId(2) });
    assert_eq!(matcher.active(), Some(EnemyId(2)));
    assert_eq!(field.progress(EnemyId(2)), 1);
}

#[test]
fn test_acquisition_prefers_list_order() {
    let mut field = Field::new(&["cow", "cat"]);
    let mut matcher = TypingMatcher::new();
    field.press(&mut matcher, Key::Char('c'));
    assert_eq!(matcher.active(), Some(EnemyId(1)));
}

#[test]
fn test_acquisition_is_case_insensitive() {
    let mut field = Field::new(&["Cat"]);
    let mut matcher = TypingMatcher::new();
    let outcomes = field.type_str(&mut matcher, "cAT");
    assert_eq!(
        outcomes.last(),
        Some(&MatchOutcome::Completed {
            id: EnemyId(1),
            typed: "cAT".into()
        })
    );
}

#[test]
fn test_no_match_stays_idle() {
    let mut field = Field::new(&["dog"]);
    let mut matcher = TypingMatcher::new();
    let outcome = field.press(&mut matcher, Key::Char('x'));
    assert_eq!(outcome, MatchOutcome::NoMatch { key: 'x' });
    assert_eq!(*matcher.state(), TypingState::Idle);
}

#[test]
fn test_idle_skips_enemies_with_progress_or_locked() {
    let mut field = Field::new(&["cat", "cow", "cub"]);
    field.set_progress(EnemyId(1), 2);
    field.lock(EnemyId(2));
    let mut matcher = TypingMatcher::new();
    field.press(&mut matcher, Key::Char('c'));
    assert_eq!(matcher.active(), Some(EnemyId(3)));
}

// ---- Progress ----

#[test]
fn test_full_word_completes_and_releases() {
    let mut field = Field::new(&["cat"]);
    let mut matcher = TypingMatcher::new();
    let outcomes = field.type_str(&mut matcher, "cat");
    assert_eq!(
        outcomes,
        vec![
            MatchOutcome::Acquired { id: EnemyId(1) },
            MatchOutcome::Advanced {
                id: EnemyId(1),
                typed_characters: 2
            },
            MatchOutcome::Completed {
                id: EnemyId(1),
                typed: "cat".into()
            },
        ]
    );
    assert_eq!(matcher.active(), None);
}

#[test]
fn test_single_letter_word_completes_immediately() {
    let mut field = Field::new(&["a"]);
    let mut matcher = TypingMatcher::new();
    let outcome = field.press(&mut matcher, Key::Char('A'));
    assert!(matches!(outcome, MatchOutcome::Completed { id: EnemyId(1), .. }));
    assert_eq!(matcher.active(), None);
}

#[test]
fn test_mistype_keeps_target_and_progress() {
    let mut field = Field::new(&["cat"]);
    let mut matcher = TypingMatcher::new();
    field.press(&mut matcher, Key::Char('c'));
    let outcome = field.press(&mut matcher, Key::Char('x'));
    assert_eq!(
        outcome,
        MatchOutcome::Mistyped {
            id: EnemyId(1),
            key: 'x'
        }
    );
    assert_eq!(matcher.active(), Some(EnemyId(1)));
    assert_eq!(matcher.typed(), "c");
    assert_eq!(field.progress(EnemyId(1)), 1);
}

#[test]
fn test_focus_does_not_jump_to_other_word() {
    let mut field = Field::new(&["cat", "dog"]);
    let mut matcher = TypingMatcher::new();
    field.press(&mut matcher, Key::Char('c'));
    let outcome = field.press(&mut matcher, Key::Char('d'));
    assert!(matches!(outcome, MatchOutcome::Mistyped { .. }));
    assert_eq!(field.progress(EnemyId(2)), 0);
}

// ---- Backspace ----

#[test]
fn test_backspace_floors_at_zero_and_keeps_focus() {
    let mut field = Field::new(&["cat"]);
    let mut matcher = TypingMatcher::new();
    field.type_str(&mut matcher, "ca");
    field.press(&mut matcher, Key::Backspace);
    assert_eq!(field.progress(EnemyId(1)), 1);
    field.press(&mut matcher, Key::Backspace);
    let outcome = field.press(&mut matcher, Key::Backspace);
    assert_eq!(
        outcome,
        MatchOutcome::Retreated {
            id: EnemyId(1),
            typed_characters: 0
        }
    );
    assert_eq!(matcher.active(), Some(EnemyId(1)));

    // Still focused at zero: the first letter continues this word.
    let outcome = field.press(&mut matcher, Key::Char('c'));
    assert_eq!(
        outcome,
        MatchOutcome::Advanced {
            id: EnemyId(1),
            typed_characters: 1
        }
    );
}

#[test]
fn test_backspace_idle_is_ignored() {
    let field = Field::new(&["cat"]);
    let mut matcher = TypingMatcher::new();
    let outcome = matcher.handle_key(Key::Backspace, &field.views(), KeyContext::default());
    assert_eq!(outcome, MatchOutcome::Ignored);
}

// ---- Tab ----

#[test]
fn test_tab_cycles_in_list_order_and_wraps() {
    let mut field = Field::new(&["cat", "dog", "emu"]);
    let mut matcher = TypingMatcher::new();
    field.type_str(&mut matcher, "ca");

    let outcome = field.press(&mut matcher, Key::Tab);
    assert_eq!(
        outcome,
        MatchOutcome::Switched {
            from: Some(EnemyId(1)),
            to: EnemyId(2)
        }
    );
    assert_eq!(field.progress(EnemyId(1)), 0, "abandoned word is reset");
    assert_eq!(matcher.typed(), "");

    field.press(&mut matcher, Key::Tab);
    assert_eq!(matcher.active(), Some(EnemyId(3)));
    field.press(&mut matcher, Key::Tab);
    assert_eq!(matcher.active(), Some(EnemyId(1)));
}

#[test]
fn test_tab_from_idle_takes_first_enemy() {
    let mut field = Field::new(&["cat", "dog"]);
    let mut matcher = TypingMatcher::new();
    let outcome = field.press(&mut matcher, Key::Tab);
    assert_eq!(
        outcome,
        MatchOutcome::Switched {
            from: None,
            to: EnemyId(1)
        }
    );
    // Tab-selected word types from its first letter.
    let outcomes = field.type_str(&mut matcher, "cat");
    assert!(matches!(outcomes[2], MatchOutcome::Completed { .. }));
}

#[test]
fn test_tab_on_lone_enemy_restarts_it() {
    let mut field = Field::new(&["cat"]);
    let mut matcher = TypingMatcher::new();
    field.type_str(&mut matcher, "ca");
    assert_eq!(field.progress(EnemyId(1)), 2);

    let outcome = field.press(&mut matcher, Key::Tab);
    assert_eq!(
        outcome,
        MatchOutcome::Switched {
            from: Some(EnemyId(1)),
            to: EnemyId(1)
        }
    );
    assert_eq!(matcher.active(), Some(EnemyId(1)));
    assert_eq!(matcher.typed(), "");
    assert_eq!(field.progress(EnemyId(1)), 0);

    let outcomes = field.type_str(&mut matcher, "cat");
    assert!(matches!(outcomes[2], MatchOutcome::Completed { .. }));
}

#[test]
fn test_tab_with_no_enemies_is_ignored() {
    let empty = Field::new(&[]);
    let mut idle = TypingMatcher::new();
    let outcome = idle.handle_key(Key::Tab, &empty.views(), KeyContext::default());
    assert_eq!(outcome, MatchOutcome::Ignored);

    let mut field = Field::new(&["cat"]);
    field.lock(EnemyId(1));
    let outcome = idle.handle_key(Key::Tab, &field.views(), KeyContext::default());
    assert_eq!(outcome, MatchOutcome::Ignored);
}

#[test]
fn test_tab_skips_locked_enemies() {
    let mut field = Field::new(&["cat", "dog", "emu"]);
    field.lock(EnemyId(2));
    let mut matcher = TypingMatcher::new();
    field.press(&mut matcher, Key::Char('c'));
    field.press(&mut matcher, Key::Tab);
    assert_eq!(matcher.active(), Some(EnemyId(3)));
}

// ---- Control keys ----

#[test]
fn test_enter_requests_emp_only_when_ready() {
    let field = Field::new(&["cat"]);
    let mut matcher = TypingMatcher::new();
    let ready = KeyContext {
        emp_ready: true,
        pause_allowed: false,
    };
    assert_eq!(
        matcher.handle_key(Key::Enter, &field.views(), ready),
        MatchOutcome::EmpRequested
    );
    assert_eq!(
        matcher.handle_key(Key::Enter, &field.views(), KeyContext::default()),
        MatchOutcome::Ignored
    );
}

#[test]
fn test_escape_respects_pause_gate() {
    let field = Field::new(&[]);
    let mut matcher = TypingMatcher::new();
    let allowed = KeyContext {
        emp_ready: false,
        pause_allowed: true,
    };
    assert_eq!(
        matcher.handle_key(Key::Escape, &field.views(), allowed),
        MatchOutcome::PauseToggled
    );
    assert_eq!(
        matcher.handle_key(Key::Escape, &field.views(), KeyContext::default()),
        MatchOutcome::Ignored
    );
}

#[test]
fn test_control_characters_and_other_keys_ignored() {
    let mut field = Field::new(&["cat"]);
    let mut matcher = TypingMatcher::new();
    assert_eq!(field.press(&mut matcher, Key::Char('\u{7}')), MatchOutcome::Ignored);
    assert_eq!(field.press(&mut matcher, Key::Other), MatchOutcome::Ignored);
}

// ---- Focus loss ----

#[test]
fn test_removed_target_releases_focus_on_next_key() {
    let mut field = Field::new(&["cat", "cow"]);
    let mut matcher = TypingMatcher::new();
    field.press(&mut matcher, Key::Char('c'));
    field.remove(EnemyId(1));

    // Focus is gone, so 'c' acquires afresh.
    let outcome = field.press(&mut matcher, Key::Char('c'));
    assert_eq!(outcome, MatchOutcome::Acquired { id: EnemyId(2) });
}

#[test]
fn test_release_if_only_matches_focused_enemy() {
    let mut field = Field::new(&["cat"]);
    let mut matcher = TypingMatcher::new();
    field.press(&mut matcher, Key::Char('c'));
    assert!(!matcher.release_if(EnemyId(9)));
    assert!(matcher.release_if(EnemyId(1)));
    assert_eq!(matcher.active(), None);
}

#[test]
fn test_reconcile_handles_missing_and_drift() {
    let mut field = Field::new(&["cat"]);
    let mut matcher = TypingMatcher::new();
    assert_eq!(matcher.reconcile(&field.views()), None);

    field.type_str(&mut matcher, "ca");
    assert_eq!(matcher.reconcile(&field.views()), None);

    field.set_progress(EnemyId(1), 3);
    assert_eq!(
        matcher.reconcile(&field.views()),
        Some(Repair::ProgressResynced {
            id: EnemyId(1),
            typed_characters: 2
        })
    );

    field.remove(EnemyId(1));
    assert_eq!(
        matcher.reconcile(&field.views()),
        Some(Repair::ReleasedMissing { id: EnemyId(1) })
    );
    assert_eq!(matcher.active(), None);
}

#[test]
fn test_reconcile_releases_on_prefix_mismatch() {
    let mut field = Field::new(&["cat"]);
    let mut matcher = TypingMatcher::new();
    field.type_str(&mut matcher, "ca");
    field.enemies[0].1 = "dog".into();
    assert_eq!(
        matcher.reconcile(&field.views()),
        Some(Repair::ReleasedMismatch { id: EnemyId(1) })
    );
}
