use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoxScoreError {
    /// The record stream was empty. Surfaced as a hard failure so callers
    /// can tell "no data" apart from a game that genuinely ended 0-0.
    #[error("no play-by-play events for game {game_id}")]
    NoEvents { game_id: String },

    #[error("invalid classifier config: {0}")]
    InvalidConfig(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("unsupported schema version: found {found}, expected {expected}")]
    SchemaVersionMismatch { found: u8, expected: u8 },

    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, BoxScoreError>;
