use std::path::PathBuf;

use rc_core::{LookupError, PersistError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("year {0} is outside the supported calendar range")]
    InvalidYear(i32),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output")]
    Output {
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Persist(#[from] PersistError),
}

pub type Result<T> = std::result::Result<T, ChartError>;
