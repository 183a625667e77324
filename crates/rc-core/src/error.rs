use std::path::PathBuf;

use thiserror::Error;

/// A named section could not be resolved.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("no section named `{0}` was registered")]
    UnknownSection(String),

    #[error("child group `{0}` is not a section")]
    NotASection(String),
}

/// Writing a serialized document failed.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
