//! Error type shared by the parser, the index and the repository loader.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("input path not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("no such class: {0}")]
    UnknownClass(String),

    #[error("no features for guide id: {0:?}")]
    UnknownGuideId(String),

    /// A `@param` occurrence whose name could not be parsed.
    #[error("cannot parse parameter name in {param:?} (block: {block:?})")]
    InvalidParam { param: String, block: String },

    #[error("function {function} is documented before any class")]
    FunctionWithoutClass { function: String },

    #[error("block has neither a class nor a function marker: {0:?}")]
    UnrecognizedBlock(String),

    #[error("{}: {source}", .path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error("no semantic version found in {}", .0.display())]
    InvalidVersion(PathBuf),

    #[error("invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid source pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
