pub mod content_item;
pub mod toc_item;

pub use content_item::{ContentExt, ContentItem};
pub use toc_item::{HeadingLevel, TocItem};
