//! Choosing between the backend TOC and the client-side parse.
//!
//! A non-empty `ext.toc` always wins: its IDs are the ones the backend
//! injected into the rendered heading anchors, and re-deriving them locally
//! risks drift. Parsing the markdown is only a fallback for content that has
//! no backend TOC. There is no backend-only mode that refuses to parse.

use crate::models::{ContentExt, ContentItem, HeadingLevel, TocItem};
use crate::parsing::{DEFAULT_MAX_LEVEL, parse_toc_from_markdown};

/// Returns the TOC for `content`, or an empty list when there is no content.
pub fn get_toc_from_content(content: Option<&ContentItem>) -> Vec<TocItem> {
    let Some(content) = content else {
        return Vec::new();
    };

    if let Some(toc) = content.backend_toc() {
        log::debug!("using backend TOC with {} entries", toc.len());
        return toc.to_vec();
    }

    log::debug!("no backend TOC, parsing {} bytes of markdown", content.content.len());
    parse_toc_from_markdown(&content.content, DEFAULT_MAX_LEVEL)
}

/// Level-2 entries only, in their original order.
pub fn get_h2_toc_items(toc: &[TocItem]) -> Vec<TocItem> {
    toc.iter()
        .filter(|item| item.level == HeadingLevel::H2)
        .cloned()
        .collect()
}

/// Stores a parsed TOC in `ext.toc` before the item is persisted.
///
/// An existing non-empty TOC is left untouched. Returns the TOC the item
/// carries afterwards.
pub fn attach_toc(content: &mut ContentItem, max_level: u8) -> Vec<TocItem> {
    if let Some(toc) = content.backend_toc() {
        return toc.to_vec();
    }

    let toc = parse_toc_from_markdown(&content.content, max_level);
    log::debug!("attaching {} TOC entries to content item {:?}", toc.len(), content.id);
    content.ext.get_or_insert_with(ContentExt::default).toc = Some(toc.clone());
    toc
}
