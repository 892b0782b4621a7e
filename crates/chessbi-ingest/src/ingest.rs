use std::path::{Path, PathBuf};

use chessbi_fetch::HttpClient;
use chessbi_fs::AtomicWriteOptions;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::archive::{ArchiveRef, MonthKey};
use crate::client::{ChessComClient, MonthArchive};
use crate::error::{IngestError, Result};
use crate::select::select_window;
use crate::store::ValidatorStore;

/// Directory segment for this provider under the output root.
const PROVIDER_DIR: &str = "chesscom";

/// Parameters of one ingestion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOptions {
    pub username:   String,
    pub out_dir:    PathBuf,
    pub max_months: usize,
    pub since:      Option<MonthKey>,
    pub cache_path: PathBuf,
}

impl IngestOptions {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username:   username.into(),
            out_dir:    PathBuf::from("data/raw"),
            max_months: 3,
            since:      None,
            cache_path: PathBuf::from(".cache/chesscom_etags.json"),
        }
    }

    #[must_use]
    pub fn out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.out_dir = out_dir.into();
        self
    }

    #[must_use]
    pub fn max_months(mut self, max_months: usize) -> Self {
        self.max_months = max_months;
        self
    }

    #[must_use]
    pub fn since(mut self, since: Option<MonthKey>) -> Self {
        self.since = since;
        self
    }

    #[must_use]
    pub fn cache_path(mut self, cache_path: impl Into<PathBuf>) -> Self {
        self.cache_path = cache_path.into();
        self
    }
}

/// What a completed run did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    pub username:         String,
    pub months_selected:  Vec<MonthKey>,
    pub months_fetched:   Vec<MonthKey>,
    pub months_unchanged: Vec<MonthKey>,
    pub total_games:      usize,
    pub out_dir:          PathBuf,
}

/// `{out_dir}/chesscom/{username}/{YYYY-MM}.json`
pub fn output_path(out_dir: &Path, username: &str, month: &MonthKey) -> PathBuf {
    out_dir.join(PROVIDER_DIR).join(username).join(format!("{month}.json"))
}

/// Length of the top level `games` array, 0 when absent or not an array.
pub fn game_count(document: &Map<String, Value>) -> usize {
    document.get("games").and_then(Value::as_array).map_or(0, Vec::len)
}

/// Run one ingestion for `options.username`.
///
/// Archives are processed one at a time in ascending month order. The
/// validator store is written once, after the loop, and only when the run
/// gets that far: an index failure or a service failure on any archive
/// aborts without touching it. A malformed archive body or an output file
/// that cannot be written only skips that archive.
pub async fn run_ingest<C: HttpClient>(
    client: &ChessComClient<C>,
    options: &IngestOptions,
) -> Result<IngestSummary> {
    info!(username = %options.username, "starting ingestion");
    let mut store = ValidatorStore::load(&options.cache_path);

    info!("fetching archive list");
    let archives = client.archives(&options.username).await?;
    let discovered = archives.len();

    let window = select_window(archives, options.since.as_ref(), options.max_months);
    let mut summary = IngestSummary {
        username: options.username.clone(),
        months_selected: window.iter().filter_map(ArchiveRef::month_key).collect(),
        out_dir: options.out_dir.clone(),
        ..Default::default()
    };
    info!(
        discovered,
        selected = window.len(),
        since = options.since.as_ref().map(MonthKey::as_str),
        "selected archives"
    );

    for archive in &window {
        let Some(month) = archive.month_key() else {
            warn!(url = %archive, "could not parse year/month from archive url, skipping");
            continue;
        };
        let cached = store.get(archive).cloned();

        match client.month_archive(archive, cached.as_ref()).await {
            Ok(MonthArchive::Unchanged { validator }) => {
                info!(%month, "archive unchanged");
                if let Some(validator) = validator {
                    store.set(archive.clone(), validator);
                }
                summary.months_unchanged.push(month);
            }
            Ok(MonthArchive::Fresh { document, validator }) => {
                let games = game_count(&document);
                let path = output_path(&options.out_dir, &options.username, &month);
                if let Err(err) = write_archive(&path, &document) {
                    warn!(%month, %err, "failed to write archive, skipping");
                    continue;
                }
                info!(%month, games, path = %path.display(), "archive fetched");

                if let Some(validator) = validator {
                    store.set(archive.clone(), validator);
                }
                summary.months_fetched.push(month);
                summary.total_games += games;
            }
            Err(err) if err.is_service_failure() => return Err(err.into()),
            Err(err) => warn!(%month, %err, "skipping archive"),
        }
    }

    store.save(&options.cache_path)?;
    info!(
        fetched = summary.months_fetched.len(),
        unchanged = summary.months_unchanged.len(),
        total_games = summary.total_games,
        "ingestion complete"
    );
    Ok(summary)
}

fn write_archive(path: &Path, document: &Map<String, Value>) -> Result<()> {
    let json = serde_json::to_vec_pretty(document)?;
    chessbi_fs::atomic_write(path, &json, AtomicWriteOptions::new().create_parents(true))
        .map_err(IngestError::persistence)
}
