use std::path::PathBuf;

use thiserror::Error;

/// Problems with a supplied stake grid.
#[derive(Error, Debug)]
pub enum GridError {
    #[error("expected exactly {expected} numbers, found {found}")]
    WrongCount { expected: usize, found: usize },

    #[error("invalid number '{token}' for block {block}")]
    NotANumber { token: String, block: usize },

    #[error("stake for block {block} must be finite and non-negative, got {value}")]
    InvalidStake { block: usize, value: f64 },

    #[error("failed to read grid file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
