//! Host-level errors.

use wordstrike_sim::persistence::PersistenceError;
use wordstrike_words::WordError;

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to load word content: {0}")]
    Words(#[from] WordError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("simulation already running")]
    AlreadyRunning,

    #[error("simulation not started")]
    NotStarted,

    #[error("game loop has shut down")]
    Disconnected,

    #[error("shared state lock poisoned")]
    Poisoned,
}
