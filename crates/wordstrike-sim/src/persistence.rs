//! Profile persistence: difficulty preference, high scores and lifetime totals.
//!
//! Only finished-session summaries are stored; live session state never is.
//! The engine treats every store error as non-fatal and logs it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use wordstrike_core::constants::HIGH_SCORE_LIMIT;
use wordstrike_core::enums::Difficulty;
use wordstrike_core::events::FinalStats;

const PROFILE_FILE: &str = "profile.json";

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to (de)serialize profile: {0}")]
    Json(#[from] serde_json::Error),
}

/// Player settings, read at session start and again on every level-up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifetimeTotals {
    pub sessions: u32,
    pub victories: u32,
    pub words_correct: u64,
    pub bosses_defeated: u64,
}

/// Everything persisted for one player.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub settings: Settings,
    /// Best sessions, highest score first.
    pub high_scores: Vec<FinalStats>,
    pub totals: LifetimeTotals,
}

impl Profile {
    /// Fold a finished session into the totals and the high-score table.
    pub fn record(&mut self, stats: &FinalStats) {
        self.totals.sessions += 1;
        if stats.victory {
            self.totals.victories += 1;
        }
        self.totals.words_correct += u64::from(stats.words_correct);
        self.totals.bosses_defeated += u64::from(stats.bosses_defeated);

        // Stable sort: earlier entries win ties.
        self.high_scores.push(stats.clone());
        self.high_scores.sort_by(|a, b| b.score.cmp(&a.score));
        self.high_scores.truncate(HIGH_SCORE_LIMIT);
    }
}

/// Pluggable persistence adapter.
pub trait ProfileStore: Send {
    fn load_settings(&self) -> Result<Settings, PersistenceError>;
    fn save_settings(&mut self, settings: &Settings) -> Result<(), PersistenceError>;
    fn record_session(&mut self, stats: &FinalStats) -> Result<(), PersistenceError>;
    fn high_scores(&self) -> Result<Vec<FinalStats>, PersistenceError>;
    fn totals(&self) -> Result<LifetimeTotals, PersistenceError>;
}

/// In-memory store. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    profile: Profile,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            profile: Profile {
                settings,
                ..Profile::default()
            },
        }
    }
}

impl ProfileStore for MemoryStore {
    fn load_settings(&self) -> Result<Settings, PersistenceError> {
        Ok(self.profile.settings)
    }

    fn save_settings(&mut self, settings: &Settings) -> Result<(), PersistenceError> {
        self.profile.settings = *settings;
        Ok(())
    }

    fn record_session(&mut self, stats: &FinalStats) -> Result<(), PersistenceError> {
        self.profile.record(stats);
        Ok(())
    }

    fn high_scores(&self) -> Result<Vec<FinalStats>, PersistenceError> {
        Ok(self.profile.high_scores.clone())
    }

    fn totals(&self) -> Result<LifetimeTotals, PersistenceError> {
        Ok(self.profile.totals)
    }
}

/// One pretty-printed `profile.json` in a directory, created on first write.
/// Every call reads or rewrites the whole file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(PROFILE_FILE)
    }

    /// Load the profile, or a default one if the file does not exist yet.
    pub fn load(&self) -> Result<Profile, PersistenceError> {
        let path = self.path();
        if !path.exists() {
            return Ok(Profile::default());
        }
        let json = fs::read_to_string(&path).map_err(|source| io_error(&path, source))?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save(&self, profile: &Profile) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.dir).map_err(|source| io_error(&self.dir, source))?;
        let path = self.path();
        let json = serde_json::to_string_pretty(profile)?;
        fs::write(&path, json).map_err(|source| io_error(&path, source))
    }
}

fn io_error(path: &Path, source: std::io::Error) -> PersistenceError {
    PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl ProfileStore for JsonFileStore {
    fn load_settings(&self) -> Result<Settings, PersistenceError> {
        Ok(self.load()?.settings)
    }

    fn save_settings(&mut self, settings: &Settings) -> Result<(), PersistenceError> {
        let mut profile = self.load()?;
        profile.settings = *settings;
        self.save(&profile)
    }

    fn record_session(&mut self, stats: &FinalStats) -> Result<(), PersistenceError> {
        let mut profile = self.load()?;
        profile.record(stats);
        self.save(&profile)
    }

    fn high_scores(&self) -> Result<Vec<FinalStats>, PersistenceError> {
        Ok(self.load()?.high_scores)
    }

    fn totals(&self) -> Result<LifetimeTotals, PersistenceError> {
        Ok(self.load()?.totals)
    }
}
