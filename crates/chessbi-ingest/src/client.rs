use chessbi_fetch::{FetchError, FetchOutcome, Fetcher, HttpClient, Validator};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::archive::ArchiveRef;

pub const DEFAULT_BASE_URL: &str = "https://api.chess.com/pub";

/// Result of a conditional fetch of one monthly archive.
#[derive(Debug, Clone, PartialEq)]
pub enum MonthArchive {
    /// New content. `document` is the top level JSON object as served, with
    /// its key order kept.
    Fresh {
        document:  Map<String, Value>,
        validator: Option<Validator>,
    },
    Unchanged { validator: Option<Validator> },
}

#[derive(Debug, Deserialize)]
struct ArchiveIndex {
    archives: Vec<ArchiveRef>,
}

/// Chess.com public API endpoints on top of a [`Fetcher`].
pub struct ChessComClient<C: HttpClient> {
    fetcher:  Fetcher<C>,
    base_url: String,
}

impl<C: HttpClient> ChessComClient<C> {
    pub fn new(fetcher: Fetcher<C>) -> Self {
        Self {
            fetcher,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str { &self.base_url }

    pub fn fetcher(&self) -> &Fetcher<C> { &self.fetcher }

    pub fn archives_url(&self, username: &str) -> String {
        format!("{}/player/{username}/games/archives", self.base_url)
    }

    /// List the archive URLs published for `username`, in server order.
    pub async fn archives(&self, username: &str) -> Result<Vec<ArchiveRef>, FetchError> {
        let url = self.archives_url(username);
        let FetchOutcome::Fresh { body, .. } = self.fetcher.fetch(&url, None).await? else {
            return Err(FetchError::ResponseFormat {
                url,
                reason: "archive index reported as unchanged".to_string(),
            });
        };

        let index: ArchiveIndex = serde_json::from_slice(&body)
            .map_err(|err| FetchError::ResponseFormat {
                url: url.clone(),
                reason: err.to_string(),
            })?;
        debug!(url, count = index.archives.len(), "archive index received");
        Ok(index.archives)
    }

    /// Conditionally fetch one monthly archive.
    ///
    /// A fresh body that is not a JSON object fails with
    /// [`FetchError::ResponseFormat`].
    pub async fn month_archive(
        &self,
        archive: &ArchiveRef,
        validator: Option<&Validator>,
    ) -> Result<MonthArchive, FetchError> {
        match self.fetcher.fetch(archive.as_str(), validator).await? {
            FetchOutcome::Unchanged { validator } => Ok(MonthArchive::Unchanged { validator }),
            FetchOutcome::Fresh { body, validator } => {
                let document = serde_json::from_slice::<Map<String, Value>>(&body).map_err(|err| {
                    FetchError::ResponseFormat {
                        url:    archive.to_string(),
                        reason: err.to_string(),
                    }
                })?;
                Ok(MonthArchive::Fresh { document, validator })
            }
        }
    }

    /// Release the underlying connection pool.
    pub fn close(self) {
        debug!(base_url = %self.base_url, "closing client");
        drop(self.fetcher.into_client());
    }
}
