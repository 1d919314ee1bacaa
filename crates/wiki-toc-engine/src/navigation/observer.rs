//! The element-locator and observation seam the scroll-spy runs against.
//!
//! A browser binding implements these traits over `getElementById` and
//! `IntersectionObserver`; the terminal viewer and the tests implement them
//! over in-memory layouts and synthesize batches with [`IntersectionSampler`].

use std::collections::HashMap;

use super::geometry::{Rect, RootMargin};

/// Options for one observation subscription.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    pub root_margin: RootMargin,
    /// Minimum visible fraction of a target for it to count as intersecting.
    pub threshold: f64,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            root_margin: RootMargin::default(),
            threshold: 0.0,
        }
    }
}

/// The scrollable region headings are observed against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ScrollRoot {
    /// The page viewport.
    #[default]
    Page,
    /// A scrollable element, by element ID.
    Container(String),
}

impl ScrollRoot {
    pub fn from_container(container: Option<&str>) -> Self {
        container.map_or(ScrollRoot::Page, |id| ScrollRoot::Container(id.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Observation of one target at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry {
    pub target_id: String,
    pub is_intersecting: bool,
    /// Top edge of the target's bounding box, in viewport coordinates.
    pub top: f64,
    pub intersection_ratio: f64,
}

/// Entries delivered together for one subscription.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionBatch {
    pub subscription: SubscriptionId,
    pub entries: Vec<IntersectionEntry>,
}

/// Resolves elements by ID.
pub trait ElementLocator {
    /// Bounding box of the element in viewport coordinates, if it is mounted.
    fn bounding_rect(&self, id: &str) -> Option<Rect>;

    fn is_mounted(&self, id: &str) -> bool {
        self.bounding_rect(id).is_some()
    }
}

/// Delivers intersection batches for observed elements.
///
/// Batches are delivered out of band (the implementation's event loop hands
/// them to [`ActiveHeadingTracker::handle_batch`](super::ActiveHeadingTracker::handle_batch)),
/// tagged with the subscription they belong to.
pub trait ObservationService: ElementLocator {
    fn observe(
        &mut self,
        root: &ScrollRoot,
        targets: &[String],
        options: &ObserverOptions,
    ) -> SubscriptionId;

    fn unobserve(&mut self, subscription: SubscriptionId);
}

impl<T: ElementLocator + ?Sized> ElementLocator for &T {
    fn bounding_rect(&self, id: &str) -> Option<Rect> {
        (**self).bounding_rect(id)
    }
}

impl<T: ElementLocator + ?Sized> ElementLocator for &mut T {
    fn bounding_rect(&self, id: &str) -> Option<Rect> {
        (**self).bounding_rect(id)
    }
}

impl<T: ObservationService + ?Sized> ObservationService for &mut T {
    fn observe(
        &mut self,
        root: &ScrollRoot,
        targets: &[String],
        options: &ObserverOptions,
    ) -> SubscriptionId {
        (**self).observe(root, targets, options)
    }

    fn unobserve(&mut self, subscription: SubscriptionId) {
        (**self).unobserve(subscription)
    }
}

/// Computes intersection entries the way a browser observer reports them.
///
/// The first sample reports every target; later samples only report targets
/// whose intersecting state flipped.
#[derive(Debug, Clone)]
pub struct IntersectionSampler {
    options: ObserverOptions,
    previous: HashMap<String, bool>,
}

impl IntersectionSampler {
    pub fn new(options: ObserverOptions) -> Self {
        Self {
            options,
            previous: HashMap::new(),
        }
    }

    pub fn options(&self) -> &ObserverOptions {
        &self.options
    }

    pub fn sample<'a, I>(&mut self, root: Rect, targets: I) -> Vec<IntersectionEntry>
    where
        I: IntoIterator<Item = (&'a str, Rect)>,
    {
        let effective_root = self.options.root_margin.apply(root);
        let mut seen = HashMap::with_capacity(self.previous.len());
        let mut entries = Vec::new();

        for (id, rect) in targets {
            let entry = self.entry_for(id, rect, &effective_root);
            let intersecting = entry.is_intersecting;
            if self.previous.get(id) != Some(&intersecting) {
                entries.push(entry);
            }
            seen.insert(id.to_string(), intersecting);
        }

        self.previous = seen;
        entries
    }

    fn entry_for(&self, id: &str, rect: Rect, root: &Rect) -> IntersectionEntry {
        let overlap = rect.intersection(root);
        let ratio = match overlap {
            Some(overlap) if rect.area() > 0.0 => overlap.area() / rect.area(),
            Some(_) => 1.0,
            None => 0.0,
        };
        IntersectionEntry {
            target_id: id.to_string(),
            is_intersecting: overlap.is_some() && ratio >= self.options.threshold,
            top: rect.top,
            intersection_ratio: ratio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn heading(top: f64) -> Rect {
        Rect::new(top, 0.0, 600.0, 20.0)
    }

    #[test]
    fn first_sample_reports_everything() {
        let mut sampler = IntersectionSampler::new(ObserverOptions::default());
        let viewport = Rect::new(0.0, 0.0, 600.0, 1000.0);

        let entries = sampler.sample(viewport, [("a", heading(40.0)), ("b", heading(500.0))]);

        let flags: Vec<_> = entries
            .iter()
            .map(|e| (e.target_id.as_str(), e.is_intersecting))
            .collect();
        assert_eq!(flags, vec![("a", true), ("b", false)]);
    }

    #[test]
    fn later_samples_report_only_changes() {
        let mut sampler = IntersectionSampler::new(ObserverOptions::default());
        let viewport = Rect::new(0.0, 0.0, 600.0, 1000.0);
        sampler.sample(viewport, [("a", heading(40.0)), ("b", heading(500.0))]);

        // Scrolled by 400: `a` leaves the top band, `b` enters it.
        let entries = sampler.sample(viewport, [("a", heading(-360.0)), ("b", heading(100.0))]);
        assert_eq!(entries.len(), 2);

        let entries = sampler.sample(viewport, [("a", heading(-370.0)), ("b", heading(90.0))]);
        assert!(entries.is_empty());
    }

    #[test]
    fn threshold_requires_visible_fraction() {
        let options = ObserverOptions {
            root_margin: RootMargin::ZERO,
            threshold: 0.5,
        };
        let mut sampler = IntersectionSampler::new(options);
        let viewport = Rect::new(0.0, 0.0, 600.0, 100.0);

        let entries = sampler.sample(viewport, [("less", heading(92.0)), ("most", heading(85.0))]);

        assert!(!entries[0].is_intersecting);
        assert_eq!(entries[0].intersection_ratio, 0.4);
        assert!(entries[1].is_intersecting);
    }

    #[test]
    fn scroll_root_from_container() {
        assert_eq!(ScrollRoot::from_container(None), ScrollRoot::Page);
        assert_eq!(
            ScrollRoot::from_container(Some("doc")),
            ScrollRoot::Container("doc".into())
        );
    }
}
