//! Plain-text extraction for index content.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

static TAG_REGEX: OnceLock<Regex> = OnceLock::new();

fn tag_regex() -> &'static Regex {
    TAG_REGEX.get_or_init(|| Regex::new(r"<[^<>]*>").unwrap())
}

/// Remove every `<...>` span that holds no other `<`. Tags may span lines;
/// a bare `<` (as in `a < b`) is left for punctuation stripping.
pub fn strip_tags(input: &str) -> Cow<'_, str> {
    tag_regex().replace_all(input, "")
}

/// Drop everything that is not alphanumeric or whitespace, then collapse
/// whitespace runs to a single space.
///
/// Underscores count as punctuation.
pub fn strip_punctuation(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut pending_space = false;

    for ch in input.chars() {
        if ch.is_whitespace() {
            pending_space = true;
        } else if ch.is_alphanumeric() {
            if pending_space {
                result.push(' ');
                pending_space = false;
            }
            result.push(ch);
        }
    }
    if pending_space {
        result.push(' ');
    }

    result
}

/// Searchable text for a document: tags and punctuation removed, trimmed.
///
/// Idempotent: `plain_text(&plain_text(s)) == plain_text(s)`.
///
/// # Example
///
/// ```
/// use pagedex_core::sanitize::plain_text;
///
/// assert_eq!(plain_text("<p>Some **body** text.</p>\n"), "Some body text");
/// ```
pub fn plain_text(input: &str) -> String {
    strip_punctuation(&strip_tags(input)).trim().to_string()
}
