use thiserror::Error;

use crate::core::types::SimTime;

#[derive(Error, Debug)]
pub enum ReefError {
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Snapshot at {recorded} is older than the newest snapshot at {last}")]
    HistoryOutOfOrder { recorded: SimTime, last: SimTime },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReefError>;
