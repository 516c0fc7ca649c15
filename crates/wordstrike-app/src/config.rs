//! Command-line configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use wordstrike_core::constants::TARGET_FRAME_RATE;
use wordstrike_core::enums::GameMode;
use wordstrike_sim::engine::SimConfig;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("duration must be a positive number of seconds, got {0}")]
    InvalidDuration(f64),

    #[error("bot WPM must be positive, got {0}")]
    InvalidWpm(f64),

    #[error("frame rate must be between 1 and 1000 Hz, got {0}")]
    InvalidFrameRate(u32),

    #[error("language must not be empty")]
    EmptyLanguage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeKind {
    /// Natural-language words.
    Language,
    /// Programming-language keywords and identifiers.
    Programming,
}

/// Headless WORDSTRIKE session driven by a bot typist.
#[derive(Debug, Clone, Parser)]
#[command(name = "wordstrike")]
#[command(author, version, about = "WORDSTRIKE - typing-combat simulation soak runner")]
pub struct Args {
    /// RNG seed; the same seed and flags replay the same session
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Word category
    #[arg(long, value_enum, default_value_t = ModeKind::Language)]
    pub mode: ModeKind,

    /// Language key of the word pack to play
    #[arg(long, short = 'l', default_value = "english")]
    pub language: String,

    /// Session length in simulated seconds
    #[arg(long, short = 'd', default_value_t = 120.0)]
    pub duration: f64,

    /// Typing speed of the bot
    #[arg(long, default_value_t = 60.0)]
    pub bot_wpm: f64,

    /// Simulation steps per simulated second
    #[arg(long, default_value_t = TARGET_FRAME_RATE)]
    pub fps: u32,

    /// Directory holding profile.json
    #[arg(long, default_value = ".wordstrike")]
    pub data_dir: PathBuf,

    /// Word pack JSON file (built-in packs when omitted)
    #[arg(long)]
    pub words: Option<PathBuf>,

    /// Trivia bank JSON file (built-in bank when omitted)
    #[arg(long)]
    pub trivia: Option<PathBuf>,

    /// Debug-level logging (RUST_LOG takes precedence)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Args {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(ConfigError::InvalidDuration(self.duration));
        }
        if !(self.bot_wpm.is_finite() && self.bot_wpm > 0.0) {
            return Err(ConfigError::InvalidWpm(self.bot_wpm));
        }
        if !(1..=1000).contains(&self.fps) {
            return Err(ConfigError::InvalidFrameRate(self.fps));
        }
        if self.language.trim().is_empty() {
            return Err(ConfigError::EmptyLanguage);
        }
        Ok(())
    }

    pub fn game_mode(&self) -> GameMode {
        let language = self.language.trim().to_lowercase();
        match self.mode {
            ModeKind::Language => GameMode::Language { language },
            ModeKind::Programming => GameMode::Programming { language },
        }
    }

    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            seed: self.seed,
            ..SimConfig::default()
        }
    }

    pub fn frame_dt(&self) -> f64 {
        1.0 / f64::from(self.fps)
    }

    /// Number of fixed steps covering `duration`.
    pub fn frame_count(&self) -> u64 {
        (self.duration * f64::from(self.fps)).ceil() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("wordstrike").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert_eq!(args.seed, 42);
        assert_eq!(args.mode, ModeKind::Language);
        assert_eq!(args.language, "english");
        assert_eq!(args.fps, TARGET_FRAME_RATE);
        assert!(args.validate().is_ok());
        assert_eq!(args.game_mode(), GameMode::default());
        assert_eq!(args.frame_count(), 120 * u64::from(TARGET_FRAME_RATE));
    }

    #[test]
    fn test_programming_mode() {
        let args = parse(&["--mode", "programming", "-l", "Rust", "--seed", "7"]);
        assert_eq!(
            args.game_mode(),
            GameMode::Programming {
                language: "rust".into()
            }
        );
        assert_eq!(args.sim_config().seed, 7);
    }

    #[test]
    fn test_validation_errors() {
        assert_eq!(
            parse(&["--duration", "0"]).validate(),
            Err(ConfigError::InvalidDuration(0.0))
        );
        assert_eq!(
            parse(&["--bot-wpm=-5"]).validate(),
            Err(ConfigError::InvalidWpm(-5.0))
        );
        assert_eq!(
            parse(&["--fps", "0"]).validate(),
            Err(ConfigError::InvalidFrameRate(0))
        );
        assert_eq!(
            parse(&["--language", " "]).validate(),
            Err(ConfigError::EmptyLanguage)
        );
    }

    #[test]
    fn test_unknown_mode_rejected() {
        assert!(Args::try_parse_from(["wordstrike", "--mode", "klingon"]).is_err());
    }
}
