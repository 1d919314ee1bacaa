use super::geometry::Rect;
use super::observer::ElementLocator;

/// Height of the fixed navigation bar headings are scrolled below.
pub const DEFAULT_SCROLL_OFFSET: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
}

/// Something that can be scrolled: the page, and scrollable containers in it.
///
/// Scroll requests are fire-and-forget. A new request replaces whatever
/// target an in-flight animation was heading for.
pub trait ScrollSurface: ElementLocator {
    fn page_scroll_top(&self) -> f64;

    fn scroll_page_to(&mut self, top: f64, behavior: ScrollBehavior);

    /// Bounding box of a scrollable container, in viewport coordinates.
    fn container_rect(&self, container: &str) -> Option<Rect>;

    fn container_scroll_top(&self, container: &str) -> f64;

    fn scroll_container_to(&mut self, container: &str, top: f64, behavior: ScrollBehavior);
}

impl<T: ScrollSurface + ?Sized> ScrollSurface for &mut T {
    fn page_scroll_top(&self) -> f64 {
        (**self).page_scroll_top()
    }

    fn scroll_page_to(&mut self, top: f64, behavior: ScrollBehavior) {
        (**self).scroll_page_to(top, behavior)
    }

    fn container_rect(&self, container: &str) -> Option<Rect> {
        (**self).container_rect(container)
    }

    fn container_scroll_top(&self, container: &str) -> f64 {
        (**self).container_scroll_top(container)
    }

    fn scroll_container_to(&mut self, container: &str, top: f64, behavior: ScrollBehavior) {
        (**self).scroll_container_to(container, top, behavior)
    }
}

/// Smooth-scrolls the page so heading `id` sits `offset` below the top.
///
/// Returns the requested scroll position, or `None` when the heading is not
/// mounted (yet), in which case nothing happens.
pub fn scroll_to_heading<S: ScrollSurface + ?Sized>(
    surface: &mut S,
    id: &str,
    offset: f64,
) -> Option<f64> {
    let Some(rect) = surface.bounding_rect(id) else {
        log::debug!("heading {id} is not mounted, skipping scroll");
        return None;
    };
    let target = rect.top + surface.page_scroll_top() - offset;
    surface.scroll_page_to(target, ScrollBehavior::Smooth);
    Some(target)
}

/// Like [`scroll_to_heading`], but scrolls `container` instead of the page.
///
/// A `None` container, or one that is not mounted, falls back to scrolling
/// the page.
pub fn scroll_to_heading_in_container<S: ScrollSurface + ?Sized>(
    surface: &mut S,
    id: &str,
    container: Option<&str>,
    offset: f64,
) -> Option<f64> {
    let Some((container, container_rect)) =
        container.and_then(|c| surface.container_rect(c).map(|rect| (c, rect)))
    else {
        return scroll_to_heading(surface, id, offset);
    };

    let Some(rect) = surface.bounding_rect(id) else {
        log::debug!("heading {id} is not mounted in {container}, skipping scroll");
        return None;
    };
    let target = rect.top - container_rect.top + surface.container_scroll_top(container) - offset;
    surface.scroll_container_to(container, target, ScrollBehavior::Smooth);
    Some(target)
}
