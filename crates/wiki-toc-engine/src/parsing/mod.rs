//! # Markdown TOC parsing
//!
//! Fallback extraction of the table of contents from raw markdown, used
//! when a content item arrives without a backend-computed TOC.
//!
//! Parsing is line-oriented and happens in two phases:
//!
//! 1. **`classify`**: each line is checked on its own for a `##`/`###` ATX
//!    heading, with any trailing `{#anchor}` annotation dropped.
//! 2. **`inline`**: bold, italic, code and link markup is stripped from the
//!    heading text so formatting never leaks into labels or anchors.
//!
//! IDs come from a single [`HeadingIdGenerator`] folded over the headings of
//! one call, so they are unique per document and numbered first-come.

pub mod classify;
pub mod inline;
pub mod lines;

use classify::AtxHeadingClassifier;
use inline::strip_inline_markup;
use lines::{Span, lines_with_spans};

use crate::heading_ids::HeadingIdGenerator;
use crate::models::{HeadingLevel, TocItem};

/// Deepest heading level included by default (`###`).
pub const DEFAULT_MAX_LEVEL: u8 = 3;

/// A TOC-eligible heading together with where it sits in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedHeading {
    pub level: HeadingLevel,
    /// Display text with inline markup removed.
    pub text: String,
    /// Zero-based line number.
    pub line: usize,
    pub span: Span,
}

/// Finds the level 2/3 headings of `markdown`, in document order.
///
/// Headings deeper than `max_level` are left out entirely.
pub fn scan_headings(markdown: &str, max_level: u8) -> Vec<ScannedHeading> {
    let classifier = AtxHeadingClassifier;

    lines_with_spans(markdown)
        .filter_map(|lr| {
            let heading = classifier.classify(&lr)?;
            if heading.level.as_u8() > max_level {
                return None;
            }
            Some(ScannedHeading {
                level: heading.level,
                text: strip_inline_markup(heading.raw_text),
                line: lr.index,
                span: lr.span,
            })
        })
        .collect()
}

/// Builds a TOC from the `##`/`###` headings of `markdown`.
///
/// Pure: the same input always yields the same items.
pub fn parse_toc_from_markdown(markdown: &str, max_level: u8) -> Vec<TocItem> {
    let (_, items) = scan_headings(markdown, max_level).into_iter().fold(
        (HeadingIdGenerator::new(), Vec::new()),
        |(ids, mut items), heading| {
            let (ids, id) = ids.issue(&heading.text);
            items.push(TocItem {
                id,
                text: heading.text,
                level: heading.level,
            });
            (ids, items)
        },
    );
    items
}

/// [`parse_toc_from_markdown`] with [`DEFAULT_MAX_LEVEL`].
pub fn parse_toc(markdown: &str) -> Vec<TocItem> {
    parse_toc_from_markdown(markdown, DEFAULT_MAX_LEVEL)
}
