//! Validation of normalized URLs.

use url::{Host, Url};

use super::scheme::has_scheme;
use crate::limits::MAX_FIELD_LEN;

/// True if `url` is a well-formed absolute URL that may be stored.
///
/// Requires an explicit `scheme://`, a host with at least one `.` and no
/// empty labels (so `localhost`-style hosts are rejected), and at most
/// 255 characters. Never panics on malformed input.
pub fn is_valid(url: &str) -> bool {
    if url.is_empty() || url.chars().count() > MAX_FIELD_LEN {
        return false;
    }
    if !has_scheme(url) {
        return false;
    }
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    match parsed.host() {
        Some(Host::Domain(domain)) => {
            domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
        }
        Some(Host::Ipv4(_)) => true,
        Some(Host::Ipv6(_)) | None => false,
    }
}
