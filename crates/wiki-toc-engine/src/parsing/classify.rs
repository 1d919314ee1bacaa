use std::sync::LazyLock;

use regex::Regex;

use super::lines::LineRef;
use crate::models::HeadingLevel;

/// `##`/`###`, whitespace, text, then an optional `{#anchor}` annotation.
static ATX_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(#{2,3})\s+(.+?)(?:\s*\{#[\p{L}\p{N}_-]+\})?\s*$").expect("valid heading regex")
});

/// A line recognized as a TOC-eligible ATX heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingLine<'a> {
    pub level: HeadingLevel,
    /// Heading text, trimmed, with the anchor annotation removed but inline
    /// markup still in place.
    pub raw_text: &'a str,
}

/// Classifies individual lines as level 2/3 ATX headings.
///
/// Each line is looked at on its own; fenced code is not tracked so that the
/// numbering agrees with the server-side parser.
pub struct AtxHeadingClassifier;

impl AtxHeadingClassifier {
    pub fn classify<'a>(&self, lr: &LineRef<'a>) -> Option<HeadingLine<'a>> {
        let caps = ATX_HEADING.captures(lr.text)?;
        let level = HeadingLevel::from_marker_len(caps.get(1)?.len())?;
        let raw_text = caps.get(2)?.as_str().trim();
        Some(HeadingLine { level, raw_text })
    }
}
