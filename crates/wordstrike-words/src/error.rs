use std::path::PathBuf;

/// Errors from loading or sampling word and trivia data.
#[derive(Debug, thiserror::Error)]
pub enum WordError {
    #[error("no word pool loaded for language '{0}'")]
    PoolNotLoaded(String),

    #[error("word pack '{language}' has an empty '{bucket}' bucket")]
    EmptyBucket { language: String, bucket: String },

    #[error("failed to parse data file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid data: {0}")]
    Validation(String),
}
