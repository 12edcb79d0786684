// Copyright 2026 the Kerfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A 2D point.

use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};

use crate::common::{precision_eq, round_to_digits};

/// A 2D point, optionally tagged with the curve parameter that produced it.
///
/// Equality (`==`) compares the coordinates exactly and ignores the tag. Use
/// [`Point::precision_eq`] for the quantized comparison the path algorithms
/// rely on.
#[derive(Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// The x coordinate.
    pub x: f64,
    /// The y coordinate.
    pub y: f64,
    /// The curve parameter this point was found at, if known.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub t: Option<f64>,
}

impl Point {
    /// The point at the origin; (0, 0).
    pub const ORIGIN: Self = Self {
        x: 0.,
        y: 0.,
        t: None,
    };

    /// Create a new `Point`.
    ///
    /// Negative zero coordinates are stored as positive zero.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: x + 0.0,
            y: y + 0.0,
            t: None,
        }
    }

    /// The same point, tagged with the curve parameter `t`.
    #[inline]
    #[must_use]
    pub fn with_t(mut self, t: f64) -> Self {
        self.t = Some(t);
        self
    }

    /// The curve parameter tag.
    #[inline]
    pub fn t(&self) -> Option<f64> {
        self.t
    }

    /// Is either coordinate NaN?
    #[inline]
    pub fn is_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }

    /// Are both coordinates equal once rounded to `digits` decimal places?
    ///
    /// A negative `digits` compares exactly.
    #[inline]
    pub fn precision_eq(&self, other: &Self, digits: i32) -> bool {
        precision_eq(self.x, other.x, digits) && precision_eq(self.y, other.y, digits)
    }

    /// This point with both coordinates rounded to `digits` decimal places.
    #[inline]
    #[must_use]
    pub fn rounded(self, digits: i32) -> Self {
        Self::new(round_to_digits(self.x, digits), round_to_digits(self.y, digits))
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        (self - other).hypot()
    }

    /// Length of the vector from the origin to this point.
    #[inline]
    pub fn hypot(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Dot product, treating both points as vectors.
    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Cross product, treating both points as vectors.
    #[inline]
    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// This vector scaled to unit length.
    #[inline]
    #[must_use]
    pub fn normalize(self) -> Self {
        self * (1.0 / self.hypot())
    }

    /// Determine the midpoint of two points.
    #[inline]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new(0.5 * (self.x + other.x), 0.5 * (self.y + other.y))
    }

    /// Linearly interpolate between two points.
    #[inline]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self::new(
            self.x + t * (other.x - self.x),
            self.y + t * (other.y - self.y),
        )
    }

    /// Rotate clockwise by `degrees` around the origin (y pointing down).
    ///
    /// # Examples
    ///
    /// ```
    /// use kerfline::Point;
    ///
    /// let p = Point::new(1.0, 0.0).rotate(90.0);
    /// assert!(p.precision_eq(&Point::new(0.0, 1.0), 9));
    /// ```
    #[inline]
    #[must_use]
    pub fn rotate(self, degrees: f64) -> Self {
        let rad = -degrees * core::f64::consts::PI / 180.0;
        let (sin, cos) = rad.sin_cos();
        Self::new(self.x * cos + self.y * sin, -self.x * sin + self.y * cos)
    }

    /// The signed angle at `self` from the direction of `v1` to the
    /// direction of `v2`, in radians.
    #[inline]
    pub fn angle_between(self, v1: Self, v2: Self) -> f64 {
        let d1 = v1 - self;
        let d2 = v2 - self;
        d1.cross(d2).atan2(d1.dot(d2))
    }
}

impl PartialEq for Point {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for (f64, f64) {
    #[inline]
    fn from(p: Point) -> (f64, f64) {
        (p.x, p.y)
    }
}

impl Add for Point {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.t {
            Some(t) => write!(f, "({:?}, {:?} @ t={:?})", self.x, self.y, t),
            None => write!(f, "({:?}, {:?})", self.x, self.y),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "(")?;
        fmt::Display::fmt(&self.x, formatter)?;
        write!(formatter, ", ")?;
        fmt::Display::fmt(&self.y, formatter)?;
        write!(formatter, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::Point;

    #[test]
    fn negative_zero_is_normalized() {
        let p = Point::new(-0.0, -0.0);
        assert!(p.x.is_sign_positive());
        assert!(p.y.is_sign_positive());
        assert_eq!(format!("{p:.1}"), "(0.0, 0.0)");
    }

    #[test]
    fn equality_ignores_tag() {
        let a = Point::new(1.0, 2.0).with_t(0.25);
        assert_eq!(a, Point::new(1.0, 2.0));
        assert_eq!(a.t(), Some(0.25));
        assert!(a.precision_eq(&Point::new(1.0004, 1.9996), 3));
        assert!(!a.precision_eq(&Point::new(1.0004, 1.9996), -1));
    }

    #[test]
    fn rotation_is_clockwise_in_y_down_space() {
        let p = Point::new(0.0, 1.0).rotate(90.0);
        assert!(p.precision_eq(&Point::new(-1.0, 0.0), 9), "{p:?}");
        let p = Point::new(10.0, 10.0).rotate(180.0);
        assert!(p.precision_eq(&Point::new(-10.0, -10.0), 9), "{p:?}");
    }

    #[test]
    fn vector_helpers() {
        let a = Point::new(3.0, 4.0);
        assert_eq!(a.hypot(), 5.0);
        assert_eq!(a.distance(Point::ORIGIN), 5.0);
        assert_eq!(a.midpoint(Point::ORIGIN), Point::new(1.5, 2.0));
        assert_eq!(Point::ORIGIN.lerp(a, 0.5), Point::new(1.5, 2.0));
        let n = a.normalize();
        assert!((n.x - 0.6).abs() < 1e-12);
        let angle = Point::ORIGIN.angle_between(Point::new(1.0, 0.0), Point::new(0.0, 1.0));
        assert!((angle - core::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }
}
