//! Error types for chessbi-ingest.

use std::path::PathBuf;

use chessbi_fetch::FetchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("failed to persist {path}: {source}")]
    Persistence {
        path:   PathBuf,
        #[source]
        source: chessbi_fs::Error,
    },

    #[error("failed to encode JSON: {0}")]
    Encode(#[from] serde_json::Error),
}

impl IngestError {
    pub(crate) fn persistence(source: chessbi_fs::Error) -> Self {
        IngestError::Persistence {
            path: source.path().to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
