pub mod heading_ids;
pub mod io;
pub mod models;
pub mod navigation;
pub mod parsing;
pub mod render;
pub mod slug;
pub mod toc;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use heading_ids::HeadingIdGenerator;
pub use io::*;
pub use models::*;
pub use navigation::*;
pub use parsing::{DEFAULT_MAX_LEVEL, ScannedHeading, parse_toc, parse_toc_from_markdown, scan_headings};
pub use render::{AnchorAssigner, render_html_with_anchors};
pub use slug::generate_heading_slug;
pub use toc::{attach_toc, get_h2_toc_items, get_toc_from_content};
