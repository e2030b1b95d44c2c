//! Error types for the retrieval engine.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::transport::TransportError;

/// A single document fetch that did not complete.
///
/// Always recovered by the engine: the partial file is discarded and the
/// scan moves on. There is no retry; one attempt per matched filename.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The remote transfer failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The local file could not be created or flushed.
    #[error("IO error writing {path}: {source}")]
    Io {
        /// Local path being written.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },
}

impl FetchError {
    /// Creates an IO error with the local path as context.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
