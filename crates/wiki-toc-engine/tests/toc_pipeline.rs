//! End-to-end: content item in, anchored HTML and scroll-spy state out.

use std::collections::HashMap;

use insta::assert_yaml_snapshot;
use pretty_assertions::assert_eq;
use wiki_toc_engine::{
    ActiveHeadingTracker, ContentItem, ElementLocator, IntersectionBatch, IntersectionSampler,
    ObservationService, ObserverOptions, Rect, ScrollBehavior, ScrollRoot, ScrollSurface,
    SubscriptionId, get_h2_toc_items, get_toc_from_content, render_html_with_anchors,
    scroll_to_heading,
};

const GUIDE: &str = "# Guide

## Getting Started

Intro text.

### Install

### Configure

## Usage

### Install

## FAQ
";

/// A page with headings laid out at fixed document offsets.
struct Page {
    positions: HashMap<String, f64>,
    viewport_height: f64,
    scroll_top: f64,
    subscription: Option<(SubscriptionId, Vec<String>)>,
    sampler: IntersectionSampler,
    next_id: u64,
}

impl Page {
    fn new(headings: &[(&str, f64)]) -> Self {
        Self {
            positions: headings
                .iter()
                .map(|(id, y)| (id.to_string(), *y))
                .collect(),
            viewport_height: 1000.0,
            scroll_top: 0.0,
            subscription: None,
            sampler: IntersectionSampler::new(ObserverOptions::default()),
            next_id: 0,
        }
    }

    /// What a browser observer would deliver after the latest scroll.
    fn pending_batch(&mut self) -> Option<IntersectionBatch> {
        let (subscription, targets) = self.subscription.clone()?;
        let rects: Vec<(String, Rect)> = targets
            .iter()
            .filter_map(|id| self.bounding_rect(id).map(|rect| (id.clone(), rect)))
            .collect();
        let viewport = Rect::new(0.0, 0.0, 1200.0, self.viewport_height);
        let entries = self
            .sampler
            .sample(viewport, rects.iter().map(|(id, rect)| (id.as_str(), *rect)));
        (!entries.is_empty()).then_some(IntersectionBatch {
            subscription,
            entries,
        })
    }
}

impl ElementLocator for Page {
    fn bounding_rect(&self, id: &str) -> Option<Rect> {
        self.positions
            .get(id)
            .map(|y| Rect::new(y - self.scroll_top, 0.0, 1200.0, 30.0))
    }
}

impl ObservationService for Page {
    fn observe(
        &mut self,
        _root: &ScrollRoot,
        targets: &[String],
        options: &ObserverOptions,
    ) -> SubscriptionId {
        self.next_id += 1;
        self.sampler = IntersectionSampler::new(options.clone());
        self.subscription = Some((SubscriptionId(self.next_id), targets.to_vec()));
        SubscriptionId(self.next_id)
    }

    fn unobserve(&mut self, subscription: SubscriptionId) {
        if self.subscription.as_ref().map(|(id, _)| *id) == Some(subscription) {
            self.subscription = None;
        }
    }
}

impl ScrollSurface for Page {
    fn page_scroll_top(&self) -> f64 {
        self.scroll_top
    }

    fn scroll_page_to(&mut self, top: f64, _behavior: ScrollBehavior) {
        self.scroll_top = top.max(0.0);
    }

    fn container_rect(&self, _container: &str) -> Option<Rect> {
        None
    }

    fn container_scroll_top(&self, _container: &str) -> f64 {
        0.0
    }

    fn scroll_container_to(&mut self, _container: &str, _top: f64, _behavior: ScrollBehavior) {}
}

#[test]
fn parsed_toc_snapshot() {
    let toc = get_toc_from_content(Some(&ContentItem::from_markdown(GUIDE)));
    assert_yaml_snapshot!(toc, @r"
    - id: getting-started
      text: Getting Started
      level: 2
    - id: install
      text: Install
      level: 3
    - id: configure
      text: Configure
      level: 3
    - id: usage
      text: Usage
      level: 2
    - id: install-1
      text: Install
      level: 3
    - id: faq
      text: FAQ
      level: 2
    ");
}

#[test]
fn secondary_navigation_lists_sections() {
    let toc = get_toc_from_content(Some(&ContentItem::from_markdown(GUIDE)));
    let sections: Vec<_> = get_h2_toc_items(&toc).into_iter().map(|t| t.text).collect();
    assert_eq!(sections, vec!["Getting Started", "Usage", "FAQ"]);
}

const TRICKY_HEADINGS: &str = "# Reference

## Title ##

## A &amp; B

### __init__ usage

### Use `**x**` flag

```md
## Not rendered
```

## Title ##
";

#[test]
fn rendered_html_carries_every_toc_anchor() {
    for markdown in [GUIDE, TRICKY_HEADINGS] {
        let toc = get_toc_from_content(Some(&ContentItem::from_markdown(markdown)));
        let html = render_html_with_anchors(markdown, &toc);

        let missing: Vec<_> = toc
            .iter()
            .filter(|item| item.text != "Not rendered")
            .filter(|item| !html.contains(&format!("id=\"{}\"", item.id)))
            .map(|item| item.id.as_str())
            .collect();
        assert_eq!(missing, Vec::<&str>::new(), "{html}");
    }
}

#[test]
fn scrolling_moves_the_active_heading() {
    let toc = get_toc_from_content(Some(&ContentItem::from_markdown(GUIDE)));
    let ids: Vec<String> = toc.iter().map(|item| item.id.clone()).collect();
    let page = Page::new(&[
        ("getting-started", 100.0),
        ("install", 600.0),
        ("configure", 1200.0),
        ("usage", 1800.0),
        ("install-1", 2400.0),
        ("faq", 3000.0),
    ]);

    let mut tracker = ActiveHeadingTracker::new(page);
    tracker.watch(&ids, ScrollRoot::Page, ObserverOptions::default());
    assert_eq!(tracker.active_id(), Some("getting-started"));

    // Clicking "Usage" in the TOC.
    let target = scroll_to_heading(tracker.service_mut(), "usage", 80.0);
    assert_eq!(target, Some(1720.0));

    let batch = tracker.service_mut().pending_batch().unwrap();
    assert_eq!(tracker.handle_batch(&batch), Some("usage"));

    // Scrolling back to the top.
    tracker.service_mut().scroll_page_to(0.0, ScrollBehavior::Smooth);
    let batch = tracker.service_mut().pending_batch().unwrap();
    assert_eq!(tracker.handle_batch(&batch), Some("getting-started"));
}
