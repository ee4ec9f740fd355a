// src/error.rs

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong in the pipeline.
///
/// Stages decide the severity: the catalog fetch and manifest I/O propagate
/// these as fatal, per-record work catches them inside the loop and counts them.
#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP {code} from {url}")]
    Status { url: String, code: u16 },

    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("could not decode {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid document {}: {source}", path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("path exists but is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }

    pub(crate) fn decode(context: impl Into<String>, source: serde_json::Error) -> Self {
        Error::Decode { context: context.into(), source }
    }
}
