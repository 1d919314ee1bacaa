//! # Scroll-spy and heading navigation
//!
//! - **`geometry`**: `Rect` and CSS-style `RootMargin`
//! - **`observer`**: the `ElementLocator`/`ObservationService` seam, batch
//!   types and `IntersectionSampler` for in-process viewports
//! - **`tracker`**: `ActiveHeadingTracker`, the active-heading state machine
//! - **`scroll`**: `scroll_to_heading` and `scroll_to_heading_in_container`
//!   over a `ScrollSurface`
//!
//! Everything here resolves headings purely by element ID, so it works with
//! any renderer that puts the TOC IDs on its heading elements.

pub mod geometry;
pub mod observer;
pub mod scroll;
pub mod tracker;

pub use geometry::{GeometryError, Length, Rect, RootMargin};
pub use observer::{
    ElementLocator, IntersectionBatch, IntersectionEntry, IntersectionSampler,
    ObservationService, ObserverOptions, ScrollRoot, SubscriptionId,
};
pub use scroll::{
    DEFAULT_SCROLL_OFFSET, ScrollBehavior, ScrollSurface, scroll_to_heading,
    scroll_to_heading_in_container,
};
pub use tracker::{ActiveHeading, ActiveHeadingTracker};
