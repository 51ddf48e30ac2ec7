//! Core operations composed from the normalizer, the fetcher, and the URL store.
//!
//! Expected failures (bad input, unknown id, fetch errors, storage errors)
//! come back as an [`Outcome`], never as an `Err` or a panic, so a front end
//! can report them and keep serving.

use std::sync::Arc;

use anyhow::Result;

use crate::error::{FailureKind, FetchError};
use crate::fetch_page::{PageFetcher, PageMetadata};
use crate::url_db::{Check, InsertUrl, NewCheck, Url, UrlDb, UrlId, UrlSummary};
use crate::url_norm;

pub const MSG_INVALID_URL: &str = "invalid URL";
pub const MSG_ALREADY_EXISTS: &str = "already exists";
pub const MSG_ADDED: &str = "added";
pub const MSG_URL_NOT_FOUND: &str = "URL not found";
pub const MSG_CHECK_FAILED: &str = "check failed";
pub const MSG_CHECK_ADDED: &str = "check added";

/// Result of a mutating operation: success flag, affected id, user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// True if a new row was written.
    pub created: bool,
    /// Id of the new or already existing row; `None` on failure.
    pub id: Option<i64>,
    pub message: String,
    /// Set when the operation failed.
    pub failure: Option<FailureKind>,
}

impl Outcome {
    fn created(id: i64, message: &str) -> Self {
        Self {
            created: true,
            id: Some(id),
            message: message.to_string(),
            failure: None,
        }
    }

    fn existing(id: i64, message: &str) -> Self {
        Self {
            created: false,
            id: Some(id),
            message: message.to_string(),
            failure: None,
        }
    }

    fn failed(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            created: false,
            id: None,
            message: message.into(),
            failure: Some(kind),
        }
    }

    fn storage(err: &anyhow::Error) -> Self {
        Self::failed(FailureKind::Storage, format!("storage error: {err:#}"))
    }

    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// URL store front door used by the presentation layer.
pub struct Repository<F> {
    db: UrlDb,
    fetcher: Arc<F>,
}

impl<F> Clone for Repository<F> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            fetcher: Arc::clone(&self.fetcher),
        }
    }
}

impl<F: PageFetcher> Repository<F> {
    pub fn new(db: UrlDb, fetcher: F) -> Self {
        Self {
            db,
            fetcher: Arc::new(fetcher),
        }
    }

    pub fn db(&self) -> &UrlDb {
        &self.db
    }

    /// Normalize `raw_url` and store it unless an equivalent URL already exists.
    pub async fn add(&self, raw_url: &str) -> Outcome {
        let name = url_norm::normalize(raw_url);
        if !url_norm::is_valid(&name) {
            tracing::debug!("rejected url input {:?}", raw_url);
            return Outcome::failed(FailureKind::Validation, MSG_INVALID_URL);
        }

        match self.db.insert_url(&name).await {
            Ok(InsertUrl::Inserted(id)) => {
                tracing::info!("added url id={} name={}", id, name);
                Outcome::created(id, MSG_ADDED)
            }
            Ok(InsertUrl::Existing(id)) => Outcome::existing(id, MSG_ALREADY_EXISTS),
            Err(e) => {
                tracing::warn!("storing url {} failed: {:#}", name, e);
                Outcome::storage(&e)
            }
        }
    }

    /// Look up a stored URL.
    pub async fn find_by_id(&self, id: UrlId) -> Result<Option<Url>> {
        self.db.find_url(id).await
    }

    /// All URLs, newest first, with their latest check time and status.
    pub async fn list_all(&self) -> Result<Vec<UrlSummary>> {
        self.db.list_urls().await
    }

    /// Fetch the stored URL and record the result as a new check.
    ///
    /// No row is written if the URL is unknown or the fetch fails.
    pub async fn add_check(&self, url_id: UrlId) -> Outcome {
        let url = match self.db.find_url(url_id).await {
            Ok(Some(url)) => url,
            Ok(None) => return Outcome::failed(FailureKind::NotFound, MSG_URL_NOT_FOUND),
            Err(e) => {
                tracing::warn!("looking up url id={} failed: {:#}", url_id, e);
                return Outcome::storage(&e);
            }
        };

        let meta = match self.fetch(url.name.clone()).await {
            Ok(meta) => meta,
            Err(e) => {
                tracing::warn!("check of {} failed: {}", url.name, e);
                return Outcome::failed(FailureKind::Fetch, MSG_CHECK_FAILED);
            }
        };

        match self.db.insert_check(url.id, &NewCheck::from(&meta)).await {
            Ok(check_id) => {
                tracing::info!(
                    "added check id={} url={} status={}",
                    check_id,
                    url.name,
                    meta.status_code
                );
                Outcome::created(check_id, MSG_CHECK_ADDED)
            }
            Err(e) => {
                tracing::warn!("storing check for {} failed: {:#}", url.name, e);
                Outcome::storage(&e)
            }
        }
    }

    /// Checks of one URL, newest first, numbered oldest-first.
    pub async fn list_checks(&self, url_id: UrlId) -> Result<Vec<Check>> {
        self.db.list_checks(url_id).await
    }

    /// Runs the blocking fetcher off the async worker threads.
    async fn fetch(&self, url: String) -> Result<PageMetadata, FetchError> {
        let fetcher = Arc::clone(&self.fetcher);
        tokio::task::spawn_blocking(move || fetcher.fetch(&url))
            .await
            .map_err(|e| FetchError::Join(e.to_string()))?
    }
}
