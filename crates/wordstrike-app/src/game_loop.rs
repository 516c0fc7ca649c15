//! Game loop thread: runs the simulation engine at the nominal frame rate and
//! publishes snapshots.
//!
//! The engine is created inside this thread because it's cleaner for ownership.
//! Commands arrive via `mpsc` channel. Each frame is ticked with the real time
//! elapsed since the previous one; the engine caps oversized steps.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::{info, warn};

use wordstrike_core::constants::TARGET_FRAME_RATE;
use wordstrike_core::state::GameStateSnapshot;
use wordstrike_sim::engine::{SimConfig, SimulationEngine};

use crate::logging::LogSink;
use crate::state::GameLoopCommand;

/// Nominal duration of one frame.
const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TARGET_FRAME_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender for the host to use.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> std::io::Result<mpsc::Sender<GameLoopCommand>> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    std::thread::Builder::new()
        .name("wordstrike-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, &latest_snapshot);
        })?;

    Ok(cmd_tx)
}

fn build_engine(config: SimConfig) -> SimulationEngine {
    let engine = match SimulationEngine::with_builtin_content(config.clone()) {
        Ok(engine) => engine,
        Err(err) => {
            warn!(%err, "built-in word content failed to load, running without words");
            SimulationEngine::new(config)
        }
    };
    engine.with_achievement_sink(Box::new(LogSink))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    let mut engine = build_engine(config);
    let mut last_frame = Instant::now();
    let mut next_frame_time = last_frame;
    info!("game loop started");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!("game loop stopped");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance by the real elapsed time (engine handles pause semantics internally)
        let now = Instant::now();
        let frame_dt = now.duration_since(last_frame).as_secs_f64();
        last_frame = now;
        let snapshot = engine.tick(frame_dt);

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until the next frame
        next_frame_time += FRAME_DURATION;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > FRAME_DURATION * 2 {
            // Too far behind, reset to avoid catch-up spiral
            next_frame_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordstrike_core::commands::PlayerCommand;
    use wordstrike_core::enums::{GameMode, GamePhase};

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartSession {
            mode: GameMode::default(),
        }))
        .unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Pause))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::StartSession { .. })
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::PlayerCommand(PlayerCommand::Pause)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_snapshot_serialization_under_3ms() {
        let mut engine = build_engine(SimConfig::default());
        engine.queue_command(PlayerCommand::StartSession {
            mode: GameMode::default(),
        });

        // Run long enough to populate the field
        for _ in 0..600 {
            engine.tick(1.0 / 60.0);
        }

        let snapshot = engine.tick(1.0 / 60.0);
        let start = Instant::now();
        let json = serde_json::to_string(&snapshot).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(3),
            "Snapshot serialization took {:?}, should be <3ms",
            elapsed
        );
        assert!(!json.is_empty());
    }

    #[test]
    fn test_loop_runs_session_and_shuts_down() {
        let latest = Arc::new(Mutex::new(None));
        let tx = spawn_game_loop(SimConfig::default(), Arc::clone(&latest)).unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartSession {
            mode: GameMode::default(),
        }))
        .unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut phase = None;
        while Instant::now() < deadline {
            phase = latest.lock().unwrap().as_ref().map(|s| s.phase);
            if phase == Some(GamePhase::Active) {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(phase, Some(GamePhase::Active));

        tx.send(GameLoopCommand::Shutdown).unwrap();
    }

    #[test]
    fn test_frame_duration_constant() {
        // 60Hz = 16.666ms per frame
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(FRAME_DURATION.as_nanos(), expected_nanos as u128);
    }
}
