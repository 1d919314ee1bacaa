//! Binding TOC IDs to rendered headings.
//!
//! Every heading a TOC points at has to carry an element ID equal to the TOC
//! item's `id`; scroll tracking and navigation only ever look headings up by
//! ID. [`AnchorAssigner`] hands those IDs out while a renderer walks the
//! document, and [`render_html_with_anchors`] is the HTML renderer built on it.

use std::collections::HashMap;

use pulldown_cmark::{CowStr, Event, HeadingLevel as CmarkLevel, Options, Parser, Tag, TagEnd, html};

use crate::heading_ids::HeadingIdGenerator;
use crate::models::{HeadingLevel, TocItem};
use crate::parsing::{DEFAULT_MAX_LEVEL, scan_headings};

/// Hands out anchor IDs for rendered headings from an authoritative TOC.
#[derive(Debug, Clone)]
pub struct AnchorAssigner<'a> {
    toc: &'a [TocItem],
    used: Vec<bool>,
    fallback: HeadingIdGenerator,
}

impl<'a> AnchorAssigner<'a> {
    pub fn new(toc: &'a [TocItem]) -> Self {
        Self {
            toc,
            used: vec![false; toc.len()],
            fallback: HeadingIdGenerator::with_issued(toc.iter().map(|item| item.id.clone())),
        }
    }

    /// ID for the next rendered heading with this level and text.
    ///
    /// Takes the first unused TOC entry that matches; headings the TOC does not
    /// know about get a generated ID that cannot clash with any TOC ID.
    pub fn assign(&mut self, level: HeadingLevel, text: &str) -> String {
        let text = text.trim();
        match self.find_unused(level, text) {
            Some(index) => self.take(index),
            None => self.generate(text),
        }
    }

    /// ID for the heading found at `position` among the TOC-eligible headings
    /// of the source, in document order.
    ///
    /// `text` is the heading as the TOC parser labels it. The entry at the
    /// same position wins when level and text agree; otherwise the first
    /// unused entry with that level and text; otherwise the entry at the same
    /// position when its level agrees.
    pub fn assign_at(&mut self, position: usize, level: HeadingLevel, text: &str) -> String {
        let text = text.trim();
        let positional = self
            .toc
            .get(position)
            .filter(|item| !self.used[position] && item.level == level)
            .map(|item| item.text == text);

        let index = match positional {
            Some(true) => Some(position),
            _ => self
                .find_unused(level, text)
                .or(positional.map(|_| position)),
        };
        match index {
            Some(index) => self.take(index),
            None => self.generate(text),
        }
    }

    fn find_unused(&self, level: HeadingLevel, text: &str) -> Option<usize> {
        self.toc
            .iter()
            .zip(self.used.iter())
            .position(|(item, used)| !used && item.level == level && item.text == text)
    }

    fn take(&mut self, index: usize) -> String {
        self.used[index] = true;
        self.toc[index].id.clone()
    }

    fn generate(&mut self, text: &str) -> String {
        let id = self.fallback.generate_id(text);
        log::debug!("heading {text:?} is not in the TOC, using generated id {id}");
        id
    }
}

fn toc_level(level: CmarkLevel) -> Option<HeadingLevel> {
    match level {
        CmarkLevel::H2 => Some(HeadingLevel::H2),
        CmarkLevel::H3 => Some(HeadingLevel::H3),
        _ => None,
    }
}

fn plain_text<'e, 'a: 'e>(events: impl Iterator<Item = &'e Event<'a>>) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }
    text
}

/// Renders markdown to HTML with an `id` on every h2/h3 heading.
///
/// Headings written as `##`/`###` lines are matched to the TOC by their
/// position among those lines, using the same text the TOC parser derives,
/// so the rendered text never has to equal the label. Other h2/h3 headings
/// (setext, nested in lists or quotes) are matched by rendered text.
/// Explicit `{#anchor}` annotations are overridden so the TOC stays
/// authoritative.
pub fn render_html_with_anchors(markdown: &str, toc: &[TocItem]) -> String {
    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_HEADING_ATTRIBUTES;
    let mut events: Vec<(Event<'_>, std::ops::Range<usize>)> =
        Parser::new_ext(markdown, options).into_offset_iter().collect();
    let scanned: HashMap<usize, (usize, String)> = scan_headings(markdown, DEFAULT_MAX_LEVEL)
        .into_iter()
        .enumerate()
        .map(|(position, heading)| (heading.span.start, (position, heading.text)))
        .collect();
    let mut assigner = AnchorAssigner::new(toc);

    for start in 0..events.len() {
        let (level, source_start) = match &events[start] {
            (Event::Start(Tag::Heading { level, .. }), range) => (*level, range.start),
            _ => continue,
        };
        let Some(level) = toc_level(level) else {
            continue;
        };

        let anchor = match scanned.get(&source_start) {
            Some((position, text)) => assigner.assign_at(*position, level, text),
            None => {
                let end = events[start..]
                    .iter()
                    .position(|(e, _)| matches!(e, Event::End(TagEnd::Heading(_))))
                    .map_or(events.len(), |offset| start + offset);
                let text = plain_text(events[start + 1..end].iter().map(|(e, _)| e));
                assigner.assign(level, &text)
            }
        };
        if let (Event::Start(Tag::Heading { id, .. }), _) = &mut events[start] {
            *id = Some(CowStr::from(anchor));
        }
    }

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter().map(|(event, _)| event));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse_toc;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn every_toc_id_reaches_the_html() {
        let md = "# Title\n\n## Intro\n\nText\n\n### **Details**\n\n## Intro\n";
        let toc = parse_toc(md);
        let html = render_html_with_anchors(md, &toc);

        for item in &toc {
            assert!(
                html.contains(&format!("id=\"{}\"", item.id)),
                "missing anchor {} in {html}",
                item.id
            );
        }
        assert!(html.contains("<h1>Title</h1>"));
    }

    #[rstest]
    #[case::closing_sequence("## Title ##\n", "title")]
    #[case::entity("## A &amp; B\n", "a-amp-b")]
    #[case::underscore_bold("## __init__ usage\n", "init-usage")]
    #[case::markup_in_code_span("## Use `**x**` flag\n", "use-x-flag")]
    fn anchor_survives_rendered_text_differing_from_label(
        #[case] md: &str,
        #[case] expected_id: &str,
    ) {
        let toc = parse_toc(md);
        assert_eq!(toc[0].id, expected_id);

        let html = render_html_with_anchors(md, &toc);

        assert!(
            html.starts_with(&format!("<h2 id=\"{expected_id}\">")),
            "{html}"
        );
    }

    #[test]
    fn heading_inside_fence_does_not_shift_later_anchors() {
        let md = "## Setup\n\n```md\n## Setup\n```\n\n## Setup\n";
        let toc = parse_toc(md);
        let html = render_html_with_anchors(md, &toc);

        assert!(html.contains("<h2 id=\"setup\">"), "{html}");
        assert!(html.contains("<h2 id=\"setup-2\">"), "{html}");
        assert!(!html.contains("id=\"setup-1\""), "{html}");
    }

    #[test]
    fn setext_headings_are_matched_by_text() {
        let toc = vec![TocItem::new("overview", "Overview", HeadingLevel::H2)];
        let html = render_html_with_anchors("Overview\n--------\n", &toc);
        assert_eq!(html, "<h2 id=\"overview\">Overview</h2>\n");
    }

    #[test]
    fn positional_entry_wins_over_text_when_labels_differ() {
        let toc = vec![
            TocItem::new("sec-a", "Alpha", HeadingLevel::H2),
            TocItem::new("sec-b", "Beta", HeadingLevel::H2),
        ];
        let mut assigner = AnchorAssigner::new(&toc);
        assert_eq!(assigner.assign_at(0, HeadingLevel::H2, "Alpha (renamed)"), "sec-a");
        assert_eq!(assigner.assign_at(1, HeadingLevel::H2, "Beta"), "sec-b");
    }

    #[test]
    fn text_match_wins_when_toc_skips_headings() {
        // A TOC built with max level 2 has no entry for the h3 at position 1.
        let toc = vec![
            TocItem::new("intro", "Intro", HeadingLevel::H2),
            TocItem::new("usage", "Usage", HeadingLevel::H2),
            TocItem::new("faq", "FAQ", HeadingLevel::H2),
        ];
        let mut assigner = AnchorAssigner::new(&toc);
        assert_eq!(assigner.assign_at(0, HeadingLevel::H2, "Intro"), "intro");
        assert_eq!(assigner.assign_at(1, HeadingLevel::H3, "Detail"), "detail");
        assert_eq!(assigner.assign_at(2, HeadingLevel::H2, "Usage"), "usage");
        assert_eq!(assigner.assign_at(3, HeadingLevel::H2, "FAQ"), "faq");
    }

    #[test]
    fn backend_ids_are_used_even_when_they_differ_from_slugs() {
        let toc = vec![TocItem::new("sec-1", "Overview", HeadingLevel::H2)];
        let html = render_html_with_anchors("## Overview\n", &toc);
        assert_eq!(html, "<h2 id=\"sec-1\">Overview</h2>\n");
    }

    #[test]
    fn explicit_anchor_annotation_is_overridden() {
        let md = "## Install {#custom}\n";
        let html = render_html_with_anchors(md, &parse_toc(md));
        assert!(html.contains("<h2 id=\"install\">"), "{html}");
        assert!(!html.contains("custom"), "{html}");
    }

    #[test]
    fn unknown_headings_get_non_clashing_ids() {
        let toc = vec![TocItem::new("faq", "Something else", HeadingLevel::H2)];
        let mut assigner = AnchorAssigner::new(&toc);
        assert_eq!(assigner.assign(HeadingLevel::H2, "FAQ"), "faq-1");
    }

    #[test]
    fn duplicate_headings_take_entries_in_order() {
        let toc = parse_toc("## Run\n## Run\n");
        let mut assigner = AnchorAssigner::new(&toc);
        assert_eq!(assigner.assign(HeadingLevel::H2, "Run"), "run");
        assert_eq!(assigner.assign(HeadingLevel::H2, "Run"), "run-1");
        assert_eq!(assigner.assign(HeadingLevel::H2, "Run"), "run-2");
    }
}
