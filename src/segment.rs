// Copyright 2026 the Kerfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path segments.

use core::fmt::{self, Write};

use crate::common::round_to_digits;
use crate::{CubicBez, Line, Point, Rect};

/// One step of a path.
///
/// A `Move` relocates the cursor without cutting. `Line` and `Curve` are
/// drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Segment {
    /// A cursor relocation.
    Move(Line),
    /// A straight cut.
    Line(Line),
    /// A cubic Bézier cut.
    Curve(CubicBez),
}

impl Segment {
    /// A move from `p0` to `p1`.
    #[inline]
    pub fn move_to(p0: impl Into<Point>, p1: impl Into<Point>) -> Self {
        Self::Move(Line::new(p0, p1))
    }

    /// A line from `p0` to `p1`.
    #[inline]
    pub fn line(p0: impl Into<Point>, p1: impl Into<Point>) -> Self {
        Self::Line(Line::new(p0, p1))
    }

    /// A cubic curve.
    #[inline]
    pub fn curve<P: Into<Point>>(p0: P, p1: P, p2: P, p3: P) -> Self {
        Self::Curve(CubicBez::new(p0, p1, p2, p3))
    }

    /// Where the segment starts.
    #[inline]
    pub fn start(&self) -> Point {
        match self {
            Self::Move(l) | Self::Line(l) => l.p0,
            Self::Curve(c) => c.p0,
        }
    }

    /// Where the segment ends.
    #[inline]
    pub fn end(&self) -> Point {
        match self {
            Self::Move(l) | Self::Line(l) => l.p1,
            Self::Curve(c) => c.p3,
        }
    }

    /// Is this a move?
    #[inline]
    pub fn is_move(&self) -> bool {
        matches!(self, Self::Move(_))
    }

    /// The same segment starting at `start`.
    #[inline]
    #[must_use]
    pub fn with_start(mut self, start: Point) -> Self {
        match &mut self {
            Self::Move(l) | Self::Line(l) => l.p0 = start,
            Self::Curve(c) => c.p0 = start,
        }
        self
    }

    /// The same segment ending at `end`.
    #[inline]
    #[must_use]
    pub fn with_end(mut self, end: Point) -> Self {
        match &mut self {
            Self::Move(l) | Self::Line(l) => l.p1 = end,
            Self::Curve(c) => c.p3 = end,
        }
        self
    }

    /// The segment traversed in the opposite direction.
    #[inline]
    #[must_use]
    pub fn reversed(&self) -> Self {
        match self {
            Self::Move(l) => Self::Move(l.reversed()),
            Self::Line(l) => Self::Line(l.reversed()),
            Self::Curve(c) => Self::Curve(c.reversed()),
        }
    }

    /// Map every defining point through `f`.
    #[must_use]
    pub fn transform_points(&self, mut f: impl FnMut(Point) -> Point) -> Self {
        match self {
            Self::Move(l) => Self::Move(Line::new(f(l.p0), f(l.p1))),
            Self::Line(l) => Self::Line(Line::new(f(l.p0), f(l.p1))),
            Self::Curve(c) => Self::Curve(CubicBez::new(f(c.p0), f(c.p1), f(c.p2), f(c.p3))),
        }
    }

    /// The smallest rectangle holding the segment.
    pub fn bounding_box(&self) -> Rect {
        match self {
            Self::Move(l) | Self::Line(l) => l.bounding_box(),
            Self::Curve(c) => c.bounding_box(),
        }
    }

    /// Same variant, with every defining point equal at `precision` digits.
    pub fn precision_eq(&self, other: &Self, precision: i32) -> bool {
        match (self, other) {
            (Self::Move(a), Self::Move(b)) | (Self::Line(a), Self::Line(b)) => {
                a.p0.precision_eq(&b.p0, precision) && a.p1.precision_eq(&b.p1, precision)
            }
            (Self::Curve(a), Self::Curve(b)) => a
                .points()
                .iter()
                .zip(b.points())
                .all(|(p, q)| p.precision_eq(&q, precision)),
            _ => false,
        }
    }

    /// Write the path data command for this segment.
    ///
    /// The start point is implied by the previous command and not written.
    ///
    /// # Errors
    ///
    /// Returns any error of the underlying writer.
    pub fn write_svg(&self, w: &mut impl Write, precision: usize) -> fmt::Result {
        match self {
            Self::Move(l) => {
                w.write_str("M ")?;
                write_point(w, l.p1, precision)
            }
            Self::Line(l) => {
                w.write_str("L ")?;
                write_point(w, l.p1, precision)
            }
            Self::Curve(c) => {
                w.write_str("C ")?;
                write_point(w, c.p1, precision)?;
                w.write_char(' ')?;
                write_point(w, c.p2, precision)?;
                w.write_char(' ')?;
                write_point(w, c.p3, precision)
            }
        }
    }

    /// The path data command for this segment, as in [`Segment::write_svg`].
    ///
    /// # Examples
    ///
    /// ```
    /// use kerfline::Segment;
    ///
    /// let c = Segment::curve((0.0, 0.0), (1.0, 2.0), (3.0, 4.0), (5.0, -0.0001));
    /// assert_eq!(c.svg(3), "C 1.000 2.000 3.000 4.000 5.000 0.000");
    /// ```
    pub fn svg(&self, precision: usize) -> String {
        let mut s = String::new();
        // writing to a String cannot fail
        let _ = self.write_svg(&mut s, precision);
        s
    }
}

pub(crate) fn write_point(w: &mut impl Write, p: Point, precision: usize) -> fmt::Result {
    write_number(w, p.x, precision)?;
    w.write_char(' ')?;
    write_number(w, p.y, precision)
}

pub(crate) fn write_number(w: &mut impl Write, v: f64, precision: usize) -> fmt::Result {
    let digits = i32::try_from(precision).unwrap_or(i32::MAX);
    write!(w, "{:.*}", precision, round_to_digits(v, digits))
}

impl From<CubicBez> for Segment {
    #[inline]
    fn from(c: CubicBez) -> Self {
        Self::Curve(c)
    }
}

impl From<Line> for Segment {
    #[inline]
    fn from(l: Line) -> Self {
        Self::Line(l)
    }
}

#[cfg(test)]
mod tests {
    use super::Segment;
    use crate::{Point, Rect};

    #[test]
    fn start_and_end() {
        let c = Segment::curve((1.0, 2.0), (3.0, 4.0), (5.0, 6.0), (7.0, 8.0));
        assert_eq!(c.start(), Point::new(1.0, 2.0));
        assert_eq!(c.end(), Point::new(7.0, 8.0));
        let r = c.reversed();
        assert_eq!(
            r,
            Segment::curve((7.0, 8.0), (5.0, 6.0), (3.0, 4.0), (1.0, 2.0))
        );
        let moved = c.with_start(Point::ORIGIN);
        assert_eq!(moved.start(), Point::ORIGIN);
        assert_eq!(moved.end(), c.end());
    }

    #[test]
    fn svg_commands() {
        assert_eq!(Segment::move_to((0.0, 0.0), (1.5, 2.0)).svg(3), "M 1.500 2.000");
        assert_eq!(Segment::line((0.0, 0.0), (-0.0, 2.0)).svg(1), "L 0.0 2.0");
        assert_eq!(Segment::line((0.0, 0.0), (15.0, 17.0)).svg(0), "L 15 17");
    }

    #[test]
    fn precision_equality_needs_same_variant() {
        let a = Segment::line((0.0, 0.0), (1.0, 1.0));
        let b = Segment::line((0.0001, 0.0), (1.0, 0.9999));
        assert!(a.precision_eq(&b, 3));
        assert!(!a.precision_eq(&b, 5));
        let m = Segment::move_to((0.0, 0.0), (1.0, 1.0));
        assert!(!a.precision_eq(&m, 3));
    }

    #[test]
    fn transform_and_bounds() {
        let l = Segment::line((1.0, 5.0), (4.0, 2.0));
        assert_eq!(l.bounding_box(), Rect::new(1.0, 2.0, 4.0, 5.0));
        let shifted = l.transform_points(|p| Point::new(p.x + 1.0, p.y * 2.0));
        assert_eq!(shifted, Segment::line((2.0, 10.0), (5.0, 4.0)));
    }
}
