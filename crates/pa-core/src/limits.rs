//! Column length limits shared by the normalizer and the check writer.

/// Maximum length, in characters, of `urls.name` and of each scraped text column.
pub const MAX_FIELD_LEN: usize = 255;

/// Returns the longest prefix of `s` holding at most `max_chars` characters.
///
/// Cuts on a char boundary, so multi-byte text never panics.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
