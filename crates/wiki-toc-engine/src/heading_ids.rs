use std::collections::HashSet;

use crate::slug::generate_heading_slug;

/// Issues unique heading IDs for a single document pass.
///
/// The first heading with a given slug keeps the bare slug; later ones get
/// `-1`, `-2`, ... in the order they are seen. Use one generator per TOC
/// computation and [`reset`](Self::reset) (or drop it) between documents.
#[derive(Debug, Clone, Default)]
pub struct HeadingIdGenerator {
    issued: HashSet<String>,
}

impl HeadingIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a set of IDs that are already taken.
    pub fn with_issued<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            issued: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the next unique ID for `text` and records it as issued.
    pub fn generate_id(&mut self, text: &str) -> String {
        let base = generate_heading_slug(text);
        let mut candidate = base.clone();
        let mut counter = 1usize;
        while self.issued.contains(&candidate) {
            candidate = format!("{base}-{counter}");
            counter += 1;
        }
        self.issued.insert(candidate.clone());
        candidate
    }

    /// By-value form of [`generate_id`](Self::generate_id), for threading the
    /// generator through a fold.
    pub fn issue(mut self, text: &str) -> (Self, String) {
        let id = self.generate_id(text);
        (self, id)
    }

    pub fn is_issued(&self, id: &str) -> bool {
        self.issued.contains(id)
    }

    pub fn reset(&mut self) {
        self.issued.clear();
    }
}
