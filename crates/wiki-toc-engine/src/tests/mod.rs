//! Shared test fixtures: an in-memory stand-in for a rendered page.

use std::collections::HashMap;

use tempfile::TempDir;

use crate::navigation::{
    ElementLocator, IntersectionBatch, IntersectionEntry, ObservationService, ObserverOptions,
    Rect, ScrollBehavior, ScrollRoot, ScrollSurface, SubscriptionId,
};

pub type Subscription = (SubscriptionId, ScrollRoot, Vec<String>, ObserverOptions);

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollRequest {
    pub root: ScrollRoot,
    pub top: f64,
    pub behavior: ScrollBehavior,
}

/// Fake page that records subscriptions and scroll requests.
///
/// Element positions never move; tests synthesize the batches they need.
#[derive(Debug, Default)]
pub struct FakeDom {
    pub elements: HashMap<String, Rect>,
    pub containers: HashMap<String, (Rect, f64)>,
    pub page_scroll_top: f64,
    pub observed: Vec<Subscription>,
    pub unobserved: Vec<SubscriptionId>,
    pub scroll_requests: Vec<ScrollRequest>,
    next_subscription: u64,
}

impl FakeDom {
    pub fn with_headings(headings: &[(&str, f64)]) -> Self {
        Self {
            elements: headings
                .iter()
                .map(|(id, top)| (id.to_string(), Rect::new(*top, 0.0, 800.0, 32.0)))
                .collect(),
            ..Self::default()
        }
    }

    pub fn add_container(&mut self, id: &str, rect: Rect, scroll_top: f64) {
        self.containers.insert(id.to_string(), (rect, scroll_top));
    }

    pub fn batch(&self, subscription: SubscriptionId, entries: Vec<IntersectionEntry>) -> IntersectionBatch {
        IntersectionBatch {
            subscription,
            entries,
        }
    }
}

impl ElementLocator for FakeDom {
    fn bounding_rect(&self, id: &str) -> Option<Rect> {
        self.elements.get(id).copied()
    }
}

impl ObservationService for FakeDom {
    fn observe(
        &mut self,
        root: &ScrollRoot,
        targets: &[String],
        options: &ObserverOptions,
    ) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.observed
            .push((id, root.clone(), targets.to_vec(), options.clone()));
        id
    }

    fn unobserve(&mut self, subscription: SubscriptionId) {
        self.unobserved.push(subscription);
    }
}

impl ScrollSurface for FakeDom {
    fn page_scroll_top(&self) -> f64 {
        self.page_scroll_top
    }

    fn scroll_page_to(&mut self, top: f64, behavior: ScrollBehavior) {
        self.scroll_requests.push(ScrollRequest {
            root: ScrollRoot::Page,
            top,
            behavior,
        });
    }

    fn container_rect(&self, container: &str) -> Option<Rect> {
        self.containers.get(container).map(|(rect, _)| *rect)
    }

    fn container_scroll_top(&self, container: &str) -> f64 {
        self.containers
            .get(container)
            .map_or(0.0, |(_, scroll_top)| *scroll_top)
    }

    fn scroll_container_to(&mut self, container: &str, top: f64, behavior: ScrollBehavior) {
        self.scroll_requests.push(ScrollRequest {
            root: ScrollRoot::Container(container.to_string()),
            top,
            behavior,
        });
    }
}

pub fn entry(id: &str, is_intersecting: bool, top: f64) -> IntersectionEntry {
    IntersectionEntry {
        target_id: id.to_string(),
        is_intersecting,
        top,
        intersection_ratio: if is_intersecting { 1.0 } else { 0.0 },
    }
}

pub fn ids(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

pub fn create_test_content_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}
