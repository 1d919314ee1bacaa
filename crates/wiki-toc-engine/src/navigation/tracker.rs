use super::observer::{
    IntersectionBatch, ObservationService, ObserverOptions, ScrollRoot, SubscriptionId,
};

/// Which heading the scroll-spy currently highlights.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveHeading {
    #[default]
    NoActiveHeading,
    Active(String),
}

impl ActiveHeading {
    pub fn id(&self) -> Option<&str> {
        match self {
            ActiveHeading::NoActiveHeading => None,
            ActiveHeading::Active(id) => Some(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Watch {
    heading_ids: Vec<String>,
    root: ScrollRoot,
    options: ObserverOptions,
}

/// Scroll-spy: tracks the heading closest to the top of the observed region.
///
/// The tracker owns one subscription at a time on its [`ObservationService`].
/// Batches for any other subscription are dropped, so bursts that straddle a
/// re-subscribe never mix old and new state. The subscription is released on
/// [`teardown`](Self::teardown), on every re-subscribe and on drop.
#[derive(Debug)]
pub struct ActiveHeadingTracker<S: ObservationService> {
    service: S,
    watch: Option<Watch>,
    subscription: Option<SubscriptionId>,
    state: ActiveHeading,
}

impl<S: ObservationService> ActiveHeadingTracker<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            watch: None,
            subscription: None,
            state: ActiveHeading::NoActiveHeading,
        }
    }

    /// Observes the mounted elements among `heading_ids` inside `root`.
    ///
    /// Does nothing when called again with the same arguments; otherwise the
    /// previous subscription is torn down first. Returns whether a new
    /// subscription was made.
    pub fn watch(
        &mut self,
        heading_ids: &[String],
        root: ScrollRoot,
        options: ObserverOptions,
    ) -> bool {
        let next = Watch {
            heading_ids: heading_ids.to_vec(),
            root,
            options,
        };
        if self.watch.as_ref() == Some(&next) {
            return false;
        }

        self.teardown();

        let targets: Vec<String> = next
            .heading_ids
            .iter()
            .filter(|id| self.service.is_mounted(id))
            .cloned()
            .collect();
        if targets.len() < next.heading_ids.len() {
            log::debug!(
                "{} of {} headings are not mounted and will not be observed",
                next.heading_ids.len() - targets.len(),
                next.heading_ids.len()
            );
        }

        let subscription = self.service.observe(&next.root, &targets, &next.options);
        log::debug!("observing {} headings as {subscription:?}", targets.len());
        self.subscription = Some(subscription);

        if let ActiveHeading::Active(id) = &self.state
            && !next.heading_ids.contains(id)
        {
            self.state = ActiveHeading::NoActiveHeading;
        }
        self.watch = Some(next);
        self.apply_initial_default();
        true
    }

    /// Resolves one batch of intersection entries.
    ///
    /// The intersecting entry with the smallest `top` becomes active. When
    /// nothing intersects the previous value is kept. Returns the active ID
    /// after the batch.
    pub fn handle_batch(&mut self, batch: &IntersectionBatch) -> Option<&str> {
        if self.subscription != Some(batch.subscription) {
            log::debug!("dropping batch for stale {:?}", batch.subscription);
            return self.active_id();
        }

        let closest = batch
            .entries
            .iter()
            .filter(|entry| entry.is_intersecting)
            .min_by(|a, b| a.top.total_cmp(&b.top));
        if let Some(entry) = closest {
            self.state = ActiveHeading::Active(entry.target_id.clone());
        }

        self.apply_initial_default();
        self.active_id()
    }

    // Before any heading has intersected, the first one counts as active.
    fn apply_initial_default(&mut self) {
        if self.state != ActiveHeading::NoActiveHeading {
            return;
        }
        if let Some(first) = self.watch.as_ref().and_then(|w| w.heading_ids.first()) {
            self.state = ActiveHeading::Active(first.clone());
        }
    }

    pub fn active_id(&self) -> Option<&str> {
        self.state.id()
    }

    pub fn state(&self) -> &ActiveHeading {
        &self.state
    }

    pub fn subscription(&self) -> Option<SubscriptionId> {
        self.subscription
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut S {
        &mut self.service
    }

    /// Releases the current subscription, if any. The active value is kept.
    pub fn teardown(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            log::debug!("releasing {subscription:?}");
            self.service.unobserve(subscription);
        }
        self.watch = None;
    }
}

impl<S: ObservationService> Drop for ActiveHeadingTracker<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}
