//! Record types returned by the URL store.

use crate::fetch_page::PageMetadata;
use crate::limits::{truncate_chars, MAX_FIELD_LEN};

/// URL identifier.
pub type UrlId = i64;

/// Check identifier.
pub type CheckId = i64;

/// A stored URL. Immutable once inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Url {
    pub id: UrlId,
    /// Normalized `scheme://host` key.
    pub name: String,
    /// Unix seconds.
    pub created_at: i64,
}

/// Row of the URL listing: the URL plus its most recent check, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlSummary {
    pub url: Url,
    pub last_check_at: Option<i64>,
    pub last_status_code: Option<i64>,
}

/// A stored check, annotated with its per-URL sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    pub id: CheckId,
    pub url_id: UrlId,
    /// 1-based position among this URL's checks, oldest first. Computed at read time.
    pub seq: i64,
    pub status_code: i64,
    pub h1: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub created_at: i64,
}

/// Column values for a check about to be inserted.
///
/// Text is already truncated to the column limit; empty text is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCheck {
    pub status_code: i64,
    pub h1: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl From<&PageMetadata> for NewCheck {
    fn from(meta: &PageMetadata) -> Self {
        Self {
            status_code: i64::from(meta.status_code),
            h1: column_text(&meta.h1),
            title: column_text(&meta.title),
            description: column_text(&meta.description),
        }
    }
}

fn column_text(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(truncate_chars(s, MAX_FIELD_LEN).to_string())
    }
}

/// Result of inserting a URL name that may already be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertUrl {
    Inserted(UrlId),
    Existing(UrlId),
}
