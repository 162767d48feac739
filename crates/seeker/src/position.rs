//! Relative positions inside a control's bounding rectangle.
//!
//! A [`RelativePosition`] is resolved against the rectangle at the moment of
//! use, never persisted. Offsets are taken as-is: an out-of-range offset
//! produces a point outside the control, which is accepted.

use crate::node::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq)]
enum XAnchor {
    /// Distance from the left edge.
    Left(f64),
    /// Distance from the right edge.
    Right(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum YAnchor {
    /// Distance from the top edge.
    Top(f64),
    /// Distance from the bottom edge.
    Bottom(f64),
}

/// An anchor origin plus up to two offset distances. An axis with no offset
/// resolves to the center of that axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RelativePosition {
    x: Option<XAnchor>,
    y: Option<YAnchor>,
}

impl RelativePosition {
    /// The center of the rectangle.
    pub fn center() -> Self {
        Self::default()
    }

    /// `dx` from the left edge, vertically centered.
    pub fn left(dx: f64) -> Self {
        Self {
            x: Some(XAnchor::Left(dx)),
            y: None,
        }
    }

    /// `dx` from the right edge, vertically centered.
    pub fn right(dx: f64) -> Self {
        Self {
            x: Some(XAnchor::Right(dx)),
            y: None,
        }
    }

    /// `dy` from the top edge, horizontally centered.
    pub fn top(dy: f64) -> Self {
        Self {
            x: None,
            y: Some(YAnchor::Top(dy)),
        }
    }

    /// `dy` from the bottom edge, horizontally centered.
    pub fn bottom(dy: f64) -> Self {
        Self {
            x: None,
            y: Some(YAnchor::Bottom(dy)),
        }
    }

    pub fn top_left(dx: f64, dy: f64) -> Self {
        Self {
            x: Some(XAnchor::Left(dx)),
            y: Some(YAnchor::Top(dy)),
        }
    }

    pub fn top_right(dx: f64, dy: f64) -> Self {
        Self {
            x: Some(XAnchor::Right(dx)),
            y: Some(YAnchor::Top(dy)),
        }
    }

    pub fn bottom_left(dx: f64, dy: f64) -> Self {
        Self {
            x: Some(XAnchor::Left(dx)),
            y: Some(YAnchor::Bottom(dy)),
        }
    }

    pub fn bottom_right(dx: f64, dy: f64) -> Self {
        Self {
            x: Some(XAnchor::Right(dx)),
            y: Some(YAnchor::Bottom(dy)),
        }
    }

    /// Compute the absolute screen point for `rect`.
    pub fn resolve(&self, rect: Rect) -> Point {
        let x = match self.x {
            Some(XAnchor::Left(dx)) => dx,
            Some(XAnchor::Right(dx)) => rect.width - dx,
            None => rect.width / 2.0,
        };
        let y = match self.y {
            Some(YAnchor::Top(dy)) => dy,
            Some(YAnchor::Bottom(dy)) => rect.height - dy,
            None => rect.height / 2.0,
        };
        Point::new(rect.left + x, rect.top + y)
    }
}
