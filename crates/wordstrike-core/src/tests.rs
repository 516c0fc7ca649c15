use crate::commands::PlayerCommand;
use crate::enums::*;
use crate::session::GameState;
use crate::types::{EnemyId, Position, SimTime};

fn fresh_state() -> GameState {
    GameState::new(
        GameMode::default(),
        Difficulty::Normal,
        Difficulty::Normal,
        100,
    )
}

#[test]
fn test_lane_rotation_wraps() {
    assert_eq!(SpawnLane::Left.next(), SpawnLane::Center);
    assert_eq!(SpawnLane::Center.next(), SpawnLane::Right);
    assert_eq!(SpawnLane::Right.next(), SpawnLane::Left);
}

#[test]
fn test_difficulty_is_ordered() {
    for pair in Difficulty::ALL.windows(2) {
        assert!(pair[0] < pair[1], "{:?} should be below {:?}", pair[0], pair[1]);
    }
}

#[test]
fn test_game_mode_language_key() {
    let natural = GameMode::default();
    assert_eq!(natural.language_key(), "english");
    assert!(!natural.is_programming());

    let code = GameMode::Programming {
        language: "rust".into(),
    };
    assert_eq!(code.language_key(), "rust");
    assert!(code.is_programming());
}

#[test]
fn test_game_mode_json_shape() {
    let json = serde_json::to_string(&GameMode::Programming {
        language: "python".into(),
    })
    .unwrap();
    assert_eq!(json, r#"{"kind":"programming","language":"python"}"#);
}

#[test]
fn test_key_press_command_from_json() {
    let cmd: PlayerCommand =
        serde_json::from_str(r#"{"type":"KeyPress","key":{"type":"Char","value":"a"}}"#).unwrap();
    assert!(matches!(
        cmd,
        PlayerCommand::KeyPress {
            key: Key::Char('a')
        }
    ));

    let cmd: PlayerCommand =
        serde_json::from_str(r#"{"type":"KeyPress","key":{"type":"Backspace"}}"#).unwrap();
    assert!(matches!(
        cmd,
        PlayerCommand::KeyPress {
            key: Key::Backspace
        }
    ));
}

#[test]
fn test_new_state_is_zeroed() {
    let state = fresh_state();
    assert_eq!(state.level, 1);
    assert_eq!(state.score, 0);
    assert_eq!(state.words_typed, 0);
    assert_eq!(state.health, state.max_health);
    assert_eq!(state.emp_cooldown, 0);
    assert!(state.active_enemy.is_none());
    assert!(state.bonus_items.is_empty());
}

#[test]
fn test_accuracy_recompute() {
    let mut state = fresh_state();
    state.recompute_accuracy();
    assert_eq!(state.accuracy, 0.0);

    state.words_typed = 4;
    state.words_correct = 3;
    state.recompute_accuracy();
    assert!((state.accuracy - 75.0).abs() < 1e-9);
}

#[test]
fn test_wpm_waits_for_minimum_elapsed() {
    let mut state = fresh_state();
    state.correct_chars = 50;
    state.active_secs = 0.5;
    state.recompute_wpm();
    assert_eq!(state.wpm, 0.0);

    // 50 chars = 10 words in 30 s = 20 WPM
    state.active_secs = 30.0;
    state.recompute_wpm();
    assert!((state.wpm - 20.0).abs() < 1e-9);
}

#[test]
fn test_keystroke_accuracy_independent_of_word_accuracy() {
    let mut state = fresh_state();
    assert_eq!(state.keystroke_accuracy(), 100.0);
    state.keystrokes = 10;
    state.keystrokes_missed = 2;
    assert!((state.keystroke_accuracy() - 80.0).abs() < 1e-9);
    state.recompute_accuracy();
    assert_eq!(state.accuracy, 0.0);
}

#[test]
fn test_final_stats_carry_mode_and_outcome() {
    let mut state = fresh_state();
    state.score = 420;
    state.level = 7;
    let stats = state.final_stats(true);
    assert_eq!(stats.score, 420);
    assert_eq!(stats.level, 7);
    assert!(stats.victory);
    assert_eq!(stats.mode, GameMode::default());
}

#[test]
fn test_sim_time_advance_variable_dt() {
    let mut time = SimTime::default();
    time.advance(0.016);
    time.advance(0.05);
    assert_eq!(time.tick, 2);
    assert!((time.elapsed_secs - 0.066).abs() < 1e-12);
}

#[test]
fn test_position_range() {
    let a = Position::new(0.0, 0.0, 0.0);
    let b = Position::new(3.0, 0.0, -4.0);
    assert!((a.range_to(&b) - 5.0).abs() < 1e-12);
}

#[test]
fn test_enemy_ids_order_by_spawn() {
    assert!(EnemyId(3) < EnemyId(10));
    assert_eq!(EnemyId(7).to_string(), "enemy#7");
}
