use std::fmt;

use serde::{Deserialize, Serialize};

/// Heading levels that take part in the table of contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum HeadingLevel {
    H2,
    H3,
}

impl HeadingLevel {
    pub fn as_u8(self) -> u8 {
        match self {
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    /// Maps an ATX marker count (`##` = 2) to a TOC level.
    pub fn from_marker_len(len: usize) -> Option<Self> {
        match len {
            2 => Some(HeadingLevel::H2),
            3 => Some(HeadingLevel::H3),
            _ => None,
        }
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_marker_len(value as usize)
            .ok_or_else(|| format!("unsupported TOC heading level {value}, expected 2 or 3"))
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        level.as_u8()
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h{}", self.as_u8())
    }
}

/// One entry in a document's table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocItem {
    /// Anchor ID; unique within one TOC.
    pub id: String,
    /// Display text with inline markdown removed.
    pub text: String,
    pub level: HeadingLevel,
}

impl TocItem {
    pub fn new(id: impl Into<String>, text: impl Into<String>, level: HeadingLevel) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            level,
        }
    }
}
