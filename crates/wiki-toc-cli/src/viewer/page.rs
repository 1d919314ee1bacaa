use std::collections::HashMap;

use wiki_toc_engine::{
    ElementLocator, IntersectionBatch, IntersectionSampler, ObservationService, ObserverOptions,
    Rect, ScrollBehavior, ScrollRoot, ScrollSurface, SubscriptionId,
};

/// The document pane as a scrollable page, one row per source line.
///
/// Heading "elements" are the rows their anchors were assigned to; their
/// bounding boxes are one row high and move as the pane scrolls.
pub struct TerminalPage {
    lines: Vec<String>,
    anchors: HashMap<String, usize>,
    scroll_top: usize,
    scroll_target: Option<usize>,
    width: u16,
    height: u16,
    smooth: bool,
    subscription: Option<(SubscriptionId, Vec<String>)>,
    sampler: IntersectionSampler,
    next_subscription: u64,
}

impl TerminalPage {
    pub fn new(lines: Vec<String>, anchors: HashMap<String, usize>, smooth: bool) -> Self {
        Self {
            lines,
            anchors,
            scroll_top: 0,
            scroll_target: None,
            width: 0,
            height: 0,
            smooth,
            subscription: None,
            sampler: IntersectionSampler::new(ObserverOptions::default()),
            next_subscription: 0,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn anchor_line(&self, id: &str) -> Option<usize> {
        self.anchors.get(id).copied()
    }

    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.scroll_top = self.scroll_top.min(self.max_scroll());
    }

    fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(self.height as usize)
    }

    /// Manual scrolling; cancels any animation in flight.
    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll_target = None;
        self.scroll_top = self
            .scroll_top
            .saturating_add_signed(delta)
            .min(self.max_scroll());
    }

    /// Advances a smooth scroll by one frame. Returns whether the pane moved.
    pub fn step_animation(&mut self) -> bool {
        let Some(target) = self.scroll_target else {
            return false;
        };
        let distance = target.abs_diff(self.scroll_top);
        let step = (distance / 3).max(1);
        self.scroll_top = if target > self.scroll_top {
            self.scroll_top + step.min(distance)
        } else {
            self.scroll_top - step.min(distance)
        };
        if self.scroll_top == target {
            self.scroll_target = None;
        }
        distance > 0
    }

    /// The batch an observer would deliver for the current scroll position,
    /// if any observed heading changed state.
    pub fn pending_batch(&mut self) -> Option<IntersectionBatch> {
        let (subscription, targets) = self.subscription.as_ref()?;
        let root = Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height));
        let rects: Vec<(&str, Rect)> = targets
            .iter()
            .filter_map(|id| self.bounding_rect(id).map(|rect| (id.as_str(), rect)))
            .collect();
        let subscription = *subscription;
        let entries = self.sampler.sample(root, rects);
        (!entries.is_empty()).then_some(IntersectionBatch {
            subscription,
            entries,
        })
    }
}

impl ElementLocator for TerminalPage {
    fn bounding_rect(&self, id: &str) -> Option<Rect> {
        let line = self.anchors.get(id)?;
        let top = *line as f64 - self.scroll_top as f64;
        Some(Rect::new(top, 0.0, f64::from(self.width.max(1)), 1.0))
    }
}

impl ObservationService for TerminalPage {
    fn observe(
        &mut self,
        _root: &ScrollRoot,
        targets: &[String],
        options: &ObserverOptions,
    ) -> SubscriptionId {
        self.next_subscription += 1;
        let subscription = SubscriptionId(self.next_subscription);
        self.sampler = IntersectionSampler::new(options.clone());
        self.subscription = Some((subscription, targets.to_vec()));
        subscription
    }

    fn unobserve(&mut self, subscription: SubscriptionId) {
        if self
            .subscription
            .as_ref()
            .is_some_and(|(current, _)| *current == subscription)
        {
            self.subscription = None;
        }
    }
}

impl ScrollSurface for TerminalPage {
    fn page_scroll_top(&self) -> f64 {
        self.scroll_top as f64
    }

    fn scroll_page_to(&mut self, top: f64, behavior: ScrollBehavior) {
        let target = (top.max(0.0).round() as usize).min(self.max_scroll());
        if self.smooth && behavior == ScrollBehavior::Smooth {
            self.scroll_target = Some(target);
        } else {
            self.scroll_target = None;
            self.scroll_top = target;
        }
    }

    // The pane has no nested scroll containers.
    fn container_rect(&self, _container: &str) -> Option<Rect> {
        None
    }

    fn container_scroll_top(&self, _container: &str) -> f64 {
        0.0
    }

    fn scroll_container_to(&mut self, _container: &str, _top: f64, _behavior: ScrollBehavior) {}
}
