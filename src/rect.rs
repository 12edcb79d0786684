// Copyright 2026 the Kerfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A rectangle.

use core::fmt;

use crate::{Point, Size};

/// An axis-aligned rectangle, used for every bounding box.
///
/// `(x0, y0)` is the top left corner in the y-down space of cut files and
/// `(x1, y1)` the bottom right one.
#[derive(Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// The minimum x coordinate (left edge).
    pub x0: f64,
    /// The minimum y coordinate (top edge).
    pub y0: f64,
    /// The maximum x coordinate (right edge).
    pub x1: f64,
    /// The maximum y coordinate (bottom edge).
    pub y1: f64,
}

impl Rect {
    /// A new rectangle from minimum and maximum coordinates.
    #[inline]
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// A new rectangle from two points.
    ///
    /// The result will have non-negative width and height.
    #[inline]
    pub fn from_points(p0: impl Into<Point>, p1: impl Into<Point>) -> Self {
        let p0 = p0.into();
        let p1 = p1.into();
        Self::new(
            p0.x.min(p1.x),
            p0.y.min(p1.y),
            p0.x.max(p1.x),
            p0.y.max(p1.y),
        )
    }

    /// The top left corner.
    #[inline]
    pub fn top_left(&self) -> Point {
        Point::new(self.x0, self.y0)
    }

    /// The bottom right corner.
    #[inline]
    pub fn bottom_right(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    /// The width of the rectangle.
    #[inline]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// The height of the rectangle.
    #[inline]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// The width and height of the rectangle.
    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// The center point of the rectangle.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(0.5 * (self.x0 + self.x1), 0.5 * (self.y0 + self.y1))
    }

    /// The smallest rectangle enclosing two rectangles.
    #[inline]
    #[must_use]
    pub fn union(&self, other: Self) -> Self {
        Self::new(
            self.x0.min(other.x0),
            self.y0.min(other.y0),
            self.x1.max(other.x1),
            self.y1.max(other.y1),
        )
    }

    /// The smallest rectangle enclosing this one and a point.
    #[inline]
    #[must_use]
    pub fn union_pt(&self, pt: Point) -> Self {
        Self::new(
            self.x0.min(pt.x),
            self.y0.min(pt.y),
            self.x1.max(pt.x),
            self.y1.max(pt.y),
        )
    }

    /// Do the interiors of two rectangles overlap?
    ///
    /// Rectangles that only share an edge, or whose extent on one axis is
    /// zero and touches the other, do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        let dx = (self.width() + other.width()) / 2.0;
        if (self.center().x - other.center().x).abs() >= dx {
            return false;
        }
        let dy = (self.height() + other.height()) / 2.0;
        (self.center().y - other.center().y).abs() < dy
    }

    /// Is `pt` inside the rectangle or on its boundary?
    #[inline]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x0 && pt.x <= self.x1 && pt.y >= self.y0 && pt.y <= self.y1
    }
}

impl fmt::Debug for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(
                f,
                "Rect {{ top_left: {:?}, size: {:?} }}",
                self.top_left(),
                self.size()
            )
        } else {
            write!(
                f,
                "Rect {{ {:?} {:?} }}",
                self.top_left(),
                self.bottom_right()
            )
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rect {{ ")?;
        fmt::Display::fmt(&self.top_left(), f)?;
        write!(f, " ")?;
        fmt::Display::fmt(&self.bottom_right(), f)?;
        write!(f, " }}")
    }
}
