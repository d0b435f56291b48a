//! Title sanitizer.
//!
//! Turns a raw title from a filename into something safe to use as a
//! display name and path component.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Trailing " (1999)" or " (1999) -" year token.
static TRAILING_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s?\(\d{4}\)\s?-?$").unwrap());

/// Anything that is not a word character or whitespace.
static SPECIAL_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Sanitize a title.
///
/// Trims whitespace and trailing hyphens, strips a trailing `(YYYY)` year,
/// optionally replaces special characters with spaces, and collapses
/// whitespace runs into single spaces.
pub fn sanitize(name: &str, keep_special_characters: bool) -> String {
    let trimmed = name.trim().trim_end_matches('-').trim();
    let without_year = TRAILING_YEAR_RE.replace(trimmed, "");

    let cleaned: Cow<'_, str> = if keep_special_characters {
        without_year
    } else {
        Cow::Owned(SPECIAL_CHARS_RE.replace_all(&without_year, " ").into_owned())
    };

    WHITESPACE_RE.replace_all(&cleaned, " ").trim().to_string()
}
