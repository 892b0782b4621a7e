use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Read {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn path(&self) -> &std::path::Path {
        match self {
            Error::Read { path, .. } | Error::Write { path, .. } | Error::CreateDir { path, .. } => {
                path
            }
        }
    }

    /// `true` when the underlying I/O error is "not found".
    pub fn is_not_found(&self) -> bool {
        let source = match self {
            Error::Read { source, .. }
            | Error::Write { source, .. }
            | Error::CreateDir { source, .. } => source,
        };
        source.kind() == std::io::ErrorKind::NotFound
    }
}

pub type Result<T> = std::result::Result<T, Error>;
