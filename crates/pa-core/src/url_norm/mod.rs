//! URL normalization and validation.
//!
//! Turns raw user input into the canonical `scheme://host` key used to
//! deduplicate stored URLs. The path, query, and fragment are dropped: the
//! store tracks sites, not pages.

mod scheme;
mod validate;

pub use validate::is_valid;

use crate::limits::{truncate_chars, MAX_FIELD_LEN};
use scheme::{has_opaque_scheme, has_scheme};

/// Scheme assumed when the input carries none.
const DEFAULT_SCHEME: &str = "https";

/// Canonicalizes raw user input into a `scheme://host[:port]` key.
///
/// Never fails. Input that cannot be parsed comes back trimmed and prefixed,
/// and [`is_valid`] rejects it. Input with a scheme but no authority
/// (`mailto:a@example.com`) is returned trimmed, without the default scheme.
///
/// # Examples
///
/// - `normalize("example.com")` → `"https://example.com"`
/// - `normalize("//example.com/a/b")` → `"https://example.com"`
/// - `normalize(" HTTP://Example.COM:8080/x?y=1 ")` → `"http://example.com:8080"`
pub fn normalize(raw: &str) -> String {
    let mut candidate = raw.trim().to_string();

    if candidate.starts_with("//") {
        candidate = format!("{DEFAULT_SCHEME}:{candidate}");
    }
    if !has_scheme(&candidate) && !has_opaque_scheme(&candidate) {
        candidate = format!("{DEFAULT_SCHEME}://{candidate}");
    }

    let canonical = canonical_origin(&candidate).unwrap_or(candidate);
    truncate_chars(&canonical, MAX_FIELD_LEN).to_string()
}

/// `scheme://host[:port]` of an absolute URL, or `None` if it has no host.
fn canonical_origin(candidate: &str) -> Option<String> {
    let parsed = url::Url::parse(candidate).ok()?;
    let host = parsed.host_str().filter(|h| !h.is_empty())?;
    Some(match parsed.port() {
        Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
        None => format!("{}://{}", parsed.scheme(), host),
    })
}
