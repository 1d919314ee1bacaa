use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("invalid root margin {input:?}: {reason}")]
    InvalidRootMargin { input: String, reason: String },
}

/// An axis-aligned box in viewport coordinates (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// The overlapping region, or `None` when the boxes do not overlap.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let top = self.top.max(other.top);
        let bottom = self.bottom().min(other.bottom());
        let left = self.left.max(other.left);
        let right = self.right().min(other.right());
        (bottom > top && right > left).then(|| Rect::new(top, left, right - left, bottom - top))
    }
}

/// A CSS length as accepted by `rootMargin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f64),
    Percent(f64),
}

impl Length {
    /// Resolves to pixels; percentages are taken of `basis`.
    pub fn resolve(self, basis: f64) -> f64 {
        match self {
            Length::Px(px) => px,
            Length::Percent(pct) => basis * pct / 100.0,
        }
    }
}

impl FromStr for Length {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (number, ctor): (&str, fn(f64) -> Length) = if let Some(n) = s.strip_suffix("px") {
            (n, Length::Px)
        } else if let Some(n) = s.strip_suffix('%') {
            (n, Length::Percent)
        } else if s == "0" {
            ("0", Length::Px)
        } else {
            return Err(format!("{s:?} must be in px or %"));
        };
        let value: f64 = number
            .parse()
            .map_err(|_| format!("{s:?} is not a number"))?;
        if !value.is_finite() {
            return Err(format!("{s:?} is not finite"));
        }
        Ok(ctor(value))
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Px(px) => write!(f, "{px}px"),
            Length::Percent(pct) => write!(f, "{pct}%"),
        }
    }
}

/// Grows (positive) or shrinks (negative) the observation root, using the
/// CSS `margin` shorthand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootMargin {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
}

impl RootMargin {
    pub const ZERO: RootMargin = RootMargin {
        top: Length::Px(0.0),
        right: Length::Px(0.0),
        bottom: Length::Px(0.0),
        left: Length::Px(0.0),
    };

    /// Applies the margin to `root`. Vertical percentages are of the root's
    /// height, horizontal ones of its width.
    pub fn apply(&self, root: Rect) -> Rect {
        let top = root.top - self.top.resolve(root.height);
        let bottom = root.bottom() + self.bottom.resolve(root.height);
        let left = root.left - self.left.resolve(root.width);
        let right = root.right() + self.right.resolve(root.width);
        Rect::new(top, left, (right - left).max(0.0), (bottom - top).max(0.0))
    }
}

impl Default for RootMargin {
    /// Only the top 20% of the root counts.
    fn default() -> Self {
        RootMargin {
            top: Length::Px(0.0),
            right: Length::Px(0.0),
            bottom: Length::Percent(-80.0),
            left: Length::Px(0.0),
        }
    }
}

impl FromStr for RootMargin {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| GeometryError::InvalidRootMargin {
            input: s.to_string(),
            reason,
        };

        let lengths = s
            .split_whitespace()
            .map(str::parse::<Length>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(invalid)?;

        let margin = match lengths.as_slice() {
            [all] => RootMargin {
                top: *all,
                right: *all,
                bottom: *all,
                left: *all,
            },
            [vertical, horizontal] => RootMargin {
                top: *vertical,
                right: *horizontal,
                bottom: *vertical,
                left: *horizontal,
            },
            [top, horizontal, bottom] => RootMargin {
                top: *top,
                right: *horizontal,
                bottom: *bottom,
                left: *horizontal,
            },
            [top, right, bottom, left] => RootMargin {
                top: *top,
                right: *right,
                bottom: *bottom,
                left: *left,
            },
            other => return Err(invalid(format!("expected 1 to 4 lengths, got {}", other.len()))),
        };
        Ok(margin)
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}
