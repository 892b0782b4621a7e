use std::collections::BTreeMap;
use std::path::Path;

use chessbi_fetch::Validator;
use chessbi_fs::AtomicWriteOptions;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::archive::ArchiveRef;
use crate::error::{IngestError, Result};

/// Validators from previous runs, keyed by the archive they were issued for.
///
/// On disk this is a flat JSON object `{ "<archive url>": "<etag>", ... }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidatorStore {
    entries: BTreeMap<ArchiveRef, Validator>,
}

impl ValidatorStore {
    pub fn new() -> Self { Self::default() }

    /// Load the store at `path`.
    ///
    /// Never fails: a missing, unreadable or malformed file yields an empty
    /// store, which only costs a full re-fetch.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let bytes = match chessbi_fs::atomic_read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.is_not_found() => {
                debug!(path = %path.display(), "no validator cache yet");
                return Self::default();
            }
            Err(err) => {
                warn!(%err, "unreadable validator cache, starting empty");
                return Self::default();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(store) => store,
            Err(err) => {
                warn!(path = %path.display(), %err, "corrupt validator cache, starting empty");
                Self::default()
            }
        }
    }

    /// Replace the file at `path` with the full mapping, creating parent
    /// directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_vec_pretty(self)?;
        let options = AtomicWriteOptions::new().create_parents(true).sync(true);
        chessbi_fs::atomic_write(path, &json, options).map_err(IngestError::persistence)
    }

    pub fn get(&self, archive: &ArchiveRef) -> Option<&Validator> { self.entries.get(archive) }

    pub fn set(&mut self, archive: ArchiveRef, validator: Validator) {
        self.entries.insert(archive, validator);
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}
