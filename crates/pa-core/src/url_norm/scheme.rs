//! Scheme detection on raw input.

/// True if `s` starts with `<scheme>://` where scheme follows RFC 3986
/// (`ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`).
///
/// `example.com:8080` and `localhost:3000/x` have no scheme here, unlike what
/// a plain URL parser would report.
pub(super) fn has_scheme(s: &str) -> bool {
    let Some((scheme, _)) = s.split_once("://") else {
        return false;
    };
    is_scheme_name(scheme)
}

/// True if `s` is `<scheme>:<rest>` with no authority (`mailto:a@b.com`,
/// `urn:isbn:0451450523`).
///
/// A `:` followed by digits (or nothing) up to the end or the next `/`, `?`,
/// `#` is a port, so `example.com:8080` and `localhost:3000/x` are not matched.
pub(super) fn has_opaque_scheme(s: &str) -> bool {
    let Some((scheme, rest)) = s.split_once(':') else {
        return false;
    };
    if !is_scheme_name(scheme) || rest.starts_with("//") {
        return false;
    }
    let port = rest.split(['/', '?', '#']).next().unwrap_or_default();
    !port.is_empty() && !port.bytes().all(|b| b.is_ascii_digit())
}

fn is_scheme_name(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
