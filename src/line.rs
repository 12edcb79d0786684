// Copyright 2026 the Kerfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lines.

use crate::common::precision_eq;
use crate::{Error, Point, Rect, Result};

/// A single straight line between two points.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// The line's start point.
    pub p0: Point,
    /// The line's end point.
    pub p1: Point,
}

impl Line {
    /// Create a new line.
    #[inline]
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>) -> Self {
        Self {
            p0: p0.into(),
            p1: p1.into(),
        }
    }

    /// A line from `start` of the given `length`, pointing `degrees` away
    /// from the positive x axis, the inverse of [`Line::angle`].
    pub fn from_angle(start: Point, length: f64, degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(start, Point::new(start.x + cos * length, start.y + sin * length))
    }

    /// The same line running in the other direction.
    #[inline]
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.p1, self.p0)
    }

    /// Rise over run. Infinite for vertical lines.
    #[inline]
    pub fn slope(&self) -> f64 {
        (self.p1.y - self.p0.y) / (self.p1.x - self.p0.x)
    }

    /// Where the infinite extension of the line crosses `x = 0`.
    #[inline]
    pub fn y_intercept(&self) -> f64 {
        self.p0.y - self.slope() * self.p0.x
    }

    /// The `y` of the infinite extension of the line at `x`.
    #[inline]
    pub fn eval_x(&self, x: f64) -> f64 {
        self.slope() * x + self.y_intercept()
    }

    /// Is the line vertical at the given precision?
    #[inline]
    pub fn is_vertical(&self, precision: i32) -> bool {
        precision_eq(self.p0.x, self.p1.x, precision)
    }

    /// Is the line horizontal at the given precision?
    #[inline]
    pub fn is_horizontal(&self, precision: i32) -> bool {
        precision_eq(self.p0.y, self.p1.y, precision)
    }

    /// The length of the line.
    #[inline]
    pub fn length(&self) -> f64 {
        self.p0.distance(self.p1)
    }

    /// The direction of the line in degrees, where a line pointing along the
    /// positive x axis is 0.
    #[inline]
    pub fn angle(&self) -> f64 {
        let d = self.p1 - self.p0;
        d.y.atan2(d.x).to_degrees()
    }

    /// The point `distance` away from the start, towards the end.
    pub fn point_at_distance(&self, distance: f64) -> Point {
        let d = self.p1 - self.p0;
        let len = d.hypot();
        if len == 0.0 {
            return self.p0;
        }
        self.p0 + d * (distance / len)
    }

    /// The smallest rectangle holding both end points.
    #[inline]
    pub fn bounding_box(&self) -> Rect {
        Rect::from_points(self.p0, self.p1)
    }

    /// A line of the same length shifted perpendicularly by `distance`.
    ///
    /// Positive distances move a line running down the page towards
    /// positive x.
    ///
    /// # Examples
    ///
    /// ```
    /// use kerfline::{Line, Point};
    ///
    /// let l = Line::new((10.0, 10.0), (10.0, 100.0)).parallel(10.0);
    /// assert_eq!(l, Line::new((20.0, 10.0), (20.0, 100.0)));
    /// ```
    #[must_use]
    pub fn parallel(&self, distance: f64) -> Self {
        let Self { p0, p1 } = *self;
        let l = self.length();
        let dx = distance * (p1.y - p0.y) / l;
        let dy = distance * (p0.x - p1.x) / l;
        Self::new(
            Point::new(p0.x + dx, p0.y + dy),
            Point::new(p1.x + dx, p1.y + dy),
        )
    }
}

impl From<(Point, Point)> for Line {
    #[inline]
    fn from((p0, p1): (Point, Point)) -> Self {
        Self::new(p0, p1)
    }
}

/// Where the infinite extensions of two lines cross.
///
/// # Errors
///
/// Returns [`Error::ParallelLines`] if the slopes are equal at `precision`,
/// if both lines are vertical, or if the solution is not a number.
pub fn line_intersection(l1: &Line, l2: &Line, precision: i32) -> Result<Point> {
    let s1 = l1.slope();
    let s2 = l2.slope();
    if precision_eq(s1, s2, precision) || (s1.is_nan() && s2.is_nan()) {
        return Err(Error::ParallelLines);
    }
    // vertical lines have no usable slope
    if l1.is_vertical(precision) {
        if l2.is_vertical(precision) {
            return Err(Error::ParallelLines);
        }
        let x = l1.p0.x;
        return finite(x, l2.eval_x(x));
    }
    if l2.is_vertical(precision) {
        let x = l2.p0.x;
        return finite(x, l1.eval_x(x));
    }
    let x = (l2.y_intercept() - l1.y_intercept()) / (s1 - s2);
    finite(x, l1.eval_x(x))
}

fn finite(x: f64, y: f64) -> Result<Point> {
    if x.is_nan() || y.is_nan() {
        Err(Error::ParallelLines)
    } else {
        Ok(Point::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::{line_intersection, Line};
    use crate::{Error, Point};

    #[test]
    fn parallel_side_follows_direction() {
        let l = Line::new((10.0, 100.0), (10.0, 10.0)).parallel(10.0);
        assert_eq!(l.p0.x, 0.0);
        assert_eq!(l.p1.x, 0.0);

        let l = Line::new((10.0, 10.0), (15.0, 30.0)).parallel(-5.0);
        assert!(l.p1.precision_eq(&Point::new(10.149, 31.213), 3), "{l:?}");
    }

    #[test]
    fn intersection() {
        let l1 = Line::new((10.0, 10.0), (150.0, 30.0));
        let l2 = Line::new((10.0, 20.0), (100.0, 25.0));
        let p = line_intersection(&l1, &l2, 3).unwrap();
        assert!(p.precision_eq(&Point::new(124.545, 26.364), 3), "{p:?}");
    }

    #[test]
    fn vertical_intersection() {
        let l1 = Line::new((5.0, 0.0), (5.0, 10.0));
        let l2 = Line::new((0.0, 0.0), (10.0, 10.0));
        let p = line_intersection(&l1, &l2, 3).unwrap();
        assert_eq!(p, Point::new(5.0, 5.0));
        let p = line_intersection(&l2, &l1, 3).unwrap();
        assert_eq!(p, Point::new(5.0, 5.0));
        let l3 = Line::new((7.0, 0.0), (7.0, -10.0));
        assert_eq!(line_intersection(&l1, &l3, 3), Err(Error::ParallelLines));
    }

    #[test]
    fn nearly_parallel_lines_do_not_intersect() {
        let s1 = Line::new(
            (5.382_503_390_580_880_3, 0.169_284_524_943_473_3),
            (1.623_732_907_437_245_7, 1.537_365_098_246_148_2),
        );
        let s2 = Line::new(
            (1.281_712_764_111_577_1, 0.597_672_477_460_239_8),
            (5.040_483_247_255_211, -0.770_408_095_842_435_1),
        );
        assert_eq!(line_intersection(&s1, &s2, 3), Err(Error::ParallelLines));
    }

    #[test]
    fn distance_along_line() {
        let l = Line::new((10.0, 10.0), (4.0, 2.0));
        let p = l.point_at_distance(5.0);
        assert!(p.precision_eq(&Point::new(7.0, 6.0), 9), "{p:?}");
        assert_eq!(l.length(), 10.0);
        let l = Line::from_angle(Point::ORIGIN, 2.0, 90.0);
        assert!(l.p1.precision_eq(&Point::new(0.0, 2.0), 9));
        let l = Line::from_angle(Point::ORIGIN, 2.0, 18.0);
        assert!((l.angle() - 18.0).abs() < 1e-9);
        assert!((Line::new((0.0, 0.0), (3.0, 2.0)).angle() - 33.690).abs() < 1e-3);
        assert!((Line::new((0.0, 0.0), (0.0, -3.0)).angle() + 90.0).abs() < 1e-9);
    }
}
