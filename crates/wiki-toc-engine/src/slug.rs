use std::sync::LazyLock;

use regex::Regex;

/// Slug used when a heading has no sluggable characters at all.
pub const FALLBACK_SLUG: &str = "heading";

// Word and whitespace classes follow Python's `re` for `str` patterns: a word
// character is a letter, a number or `_` (no combining marks, no connector
// punctuation), and whitespace includes the information separators
// U+001C..U+001F.
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}_\s\x1C-\x1F-]").expect("valid slug regex"));
static SEPARATOR_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\x1C-\x1F_]+").expect("valid slug regex"));
static HYPHEN_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-+").expect("valid slug regex"));

fn is_separator_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Turns heading text into an anchor-safe slug.
///
/// The server injects anchors with the same algorithm, so this must stay
/// bit-identical to it: lowercase and trim, drop everything that is not a
/// word character, whitespace or hyphen, turn whitespace/underscore runs into
/// a single hyphen, collapse hyphen runs and trim hyphens from both ends.
pub fn generate_heading_slug(text: &str) -> String {
    let lowered = text.to_lowercase();
    let slug = DISALLOWED.replace_all(lowered.trim_matches(is_separator_space), "");
    let slug = SEPARATOR_RUNS.replace_all(&slug, "-");
    let slug = HYPHEN_RUNS.replace_all(&slug, "-");
    let slug = slug.trim_matches('-');

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug.to_string()
    }
}
