//! WORDSTRIKE soak runner.
//!
//! Plays one headless session with the bot typist and prints the final
//! statistics as JSON.
//!
//! ```bash
//! wordstrike --duration 300 --bot-wpm 80
//! wordstrike --mode programming -l rust --seed 7
//! wordstrike --words my_pack.json --trivia my_trivia.json -v
//! ```

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};

use wordstrike_app::autopilot::Autopilot;
use wordstrike_app::config::Args;
use wordstrike_app::error::AppError;
use wordstrike_app::logging::{self, LogSink};
use wordstrike_core::commands::PlayerCommand;
use wordstrike_core::enums::GamePhase;
use wordstrike_core::events::{FinalStats, GameEvent};
use wordstrike_sim::engine::SimulationEngine;
use wordstrike_sim::persistence::{JsonFileStore, ProfileStore};
use wordstrike_words::builtin::{builtin_library, builtin_trivia};
use wordstrike_words::{TriviaBank, WordLibrary, WordPack, WordSupplier};

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match run(&args) {
        Ok(stats) => match serde_json::to_string_pretty(&stats) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                error!(%err, "failed to print final stats");
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            error!(%err, "wordstrike failed");
            ExitCode::FAILURE
        }
    }
}

fn load_words(args: &Args) -> Result<Box<dyn WordSupplier>, AppError> {
    let library = match &args.words {
        Some(path) => {
            let mut library = WordLibrary::new(args.seed);
            library.insert(WordPack::from_file(path)?)?;
            library
        }
        None => builtin_library(args.seed)?,
    };
    let language = args.game_mode().language_key().to_owned();
    if !library.is_loaded(&language) {
        warn!(language = %language, "no word pack for this language, nothing will spawn");
    }
    Ok(Box::new(library))
}

fn load_trivia(args: &Args) -> Result<TriviaBank, AppError> {
    Ok(match &args.trivia {
        Some(path) => TriviaBank::from_file(path, args.seed)?,
        None => builtin_trivia(args.seed)?,
    })
}

fn run(args: &Args) -> Result<FinalStats, AppError> {
    args.validate()?;

    let mut store = JsonFileStore::new(&args.data_dir);
    let mut engine = SimulationEngine::new(args.sim_config())
        .with_word_supplier(load_words(args)?)
        .with_trivia_source(Box::new(load_trivia(args)?))
        .with_profile_store(Box::new(store.clone()))
        .with_achievement_sink(Box::new(LogSink));
    let mut bot = Autopilot::new(args.bot_wpm);
    let dt = args.frame_dt();

    info!(
        seed = args.seed,
        duration = args.duration,
        bot_wpm = args.bot_wpm,
        profile = %store.path().display(),
        "soak session starting"
    );
    engine.queue_command(PlayerCommand::StartSession {
        mode: args.game_mode(),
    });
    let mut snapshot = engine.tick(dt);

    let mut ended = None;
    for _ in 0..args.frame_count() {
        engine.queue_commands(bot.plan(&snapshot, dt));
        snapshot = engine.tick(dt);
        ended = snapshot.events.iter().find_map(|event| match event {
            GameEvent::SessionEnded { stats } => Some(stats.clone()),
            _ => None,
        });
        if ended.is_some() {
            break;
        }
    }

    // The engine records game over and victory itself; a session that simply
    // ran out of time is recorded here.
    let stats = match ended {
        Some(stats) => stats,
        None => {
            let stats = engine
                .session()
                .map(|state| state.final_stats(false))
                .ok_or(AppError::NotStarted)?;
            store.record_session(&stats)?;
            stats
        }
    };

    info!(
        score = stats.score,
        level = stats.level,
        words = stats.words_correct,
        victory = stats.victory,
        phase = ?engine.phase(),
        "soak session finished"
    );
    if engine.phase() == GamePhase::GameOver {
        info!("the bot was overrun; try a higher --bot-wpm");
    }
    Ok(stats)
}
