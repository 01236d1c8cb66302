//! Error types for the simulation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid grid unit {0}: must be > 0")]
    InvalidUnit(i32),

    #[error("color palette is empty")]
    EmptyPalette,

    #[error("creature_max_lines {0} must be at least 1")]
    InvalidSpawnLines(i32),

    #[error("world {width}x{height} cannot fit the largest spawnable creature ({span}px per axis)")]
    WorldTooSmall {
        width: i32,
        height: i32,
        span: i32,
    },

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
