// Copyright 2026 the Kerfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transforms that map every point of a path.

use crate::path::start_and_end;
use crate::{Anchor, Error, Line, Path, PathTransform, Point, Result};

/// Map every defining point of `path` through `f`.
fn map_points(path: &Path, mut f: impl FnMut(Point) -> Point) -> Path {
    Path::from_segments(path.iter().map(|s| s.transform_points(&mut f)))
}

/// Translate a path.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Shift {
    /// Horizontal distance.
    pub dx: f64,
    /// Vertical distance.
    pub dy: f64,
}

impl Shift {
    /// Translate by `(dx, dy)`.
    #[inline]
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

impl PathTransform for Shift {
    fn transform(&self, path: &Path) -> Result<Path> {
        Ok(map_points(path, |p| Point::new(p.x + self.dx, p.y + self.dy)))
    }
}

/// Translate a path so that its `handle` lands on `point`.
///
/// # Examples
///
/// ```
/// use kerfline::{Anchor, MoveTo, Path, PathTransform, Point};
///
/// let path = Path::from_svg("M 30 30 l 5,5 l 10,0").unwrap();
/// let moved = MoveTo::new(Point::new(10.0, 10.0))
///     .with_handle(Anchor::MiddleMiddle)
///     .transform(&path)
///     .unwrap();
/// assert_eq!(moved.svg(1), "M 2.5 7.5 L 7.5 12.5 L 17.5 12.5");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveTo {
    /// Where the handle goes.
    pub point: Point,
    /// The point of the path that is moved.
    pub handle: Anchor,
}

impl MoveTo {
    /// Move the top left corner of the path to `point`.
    #[inline]
    pub fn new(point: Point) -> Self {
        Self {
            point,
            handle: Anchor::TopLeft,
        }
    }

    /// Move `handle` instead.
    #[inline]
    #[must_use]
    pub fn with_handle(mut self, handle: Anchor) -> Self {
        self.handle = handle;
        self
    }
}

impl PathTransform for MoveTo {
    fn transform(&self, path: &Path) -> Result<Path> {
        let h = self.handle.point(path)?;
        Shift::new(self.point.x - h.x, self.point.y - h.y).transform(path)
    }
}

/// The axis a path is mirrored across.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MirrorAxis {
    /// Flip top to bottom.
    Horizontal,
    /// Flip left to right.
    Vertical,
}

/// Flip a path.
///
/// The path is moved so that `handle` sits at the origin and flipped within
/// its whitespace bounding box, then moved back by the handle position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mirror {
    /// The axis to flip across.
    pub axis: MirrorAxis,
    /// The point of the path the flip is anchored at.
    pub handle: Anchor,
}

impl Mirror {
    /// Mirror across `axis`, anchored at the top left.
    #[inline]
    pub fn new(axis: MirrorAxis) -> Self {
        Self {
            axis,
            handle: Anchor::TopLeft,
        }
    }
}

impl PathTransform for Mirror {
    fn transform(&self, path: &Path) -> Result<Path> {
        let at = self.handle.point(path)?;
        let moved = MoveTo {
            point: Point::ORIGIN,
            handle: self.handle,
        }
        .transform(path)?;
        let br = moved.bounding_box_with_whitespace().bottom_right();
        let flipped = match self.axis {
            MirrorAxis::Horizontal => map_points(&moved, |p| Point::new(p.x, br.y - p.y)),
            MirrorAxis::Vertical => map_points(&moved, |p| Point::new(br.x - p.x, p.y)),
        };
        Shift::new(at.x, at.y).transform(&flipped)
    }
}

/// Rotate a path clockwise (in y-down space) about one of its anchors.
///
/// # Examples
///
/// ```
/// use kerfline::{Path, PathTransform, Rotate};
///
/// let path = Path::from_svg("M 50 50 l 20,0").unwrap();
/// let rotated = Rotate::new(130.0).transform(&path).unwrap();
/// assert_eq!(rotated.svg(3), "M 50.000 50.000 L 37.144 65.321");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotate {
    /// The angle, in degrees.
    pub degrees: f64,
    /// The point the path turns around.
    pub axis: Anchor,
}

impl Rotate {
    /// Rotate by `degrees` around the top left corner.
    #[inline]
    pub fn new(degrees: f64) -> Self {
        Self {
            degrees,
            axis: Anchor::TopLeft,
        }
    }

    /// Rotate around `axis` instead.
    #[inline]
    #[must_use]
    pub fn around(mut self, axis: Anchor) -> Self {
        self.axis = axis;
        self
    }
}

impl PathTransform for Rotate {
    fn transform(&self, path: &Path) -> Result<Path> {
        let at = self.axis.point(path)?;
        let moved = MoveTo {
            point: Point::ORIGIN,
            handle: self.axis,
        }
        .transform(path)?;
        let turned = map_points(&moved, |p| p.rotate(self.degrees));
        Shift::new(at.x, at.y).transform(&turned)
    }
}

/// Scale a path about the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scale {
    /// Explicit factors per axis.
    Factors {
        /// Horizontal factor.
        x: f64,
        /// Vertical factor.
        y: f64,
    },
    /// Scale the trimmed bounding box to a target size. A missing side
    /// follows the other one, keeping the aspect ratio.
    Size {
        /// Target width.
        width: Option<f64>,
        /// Target height.
        height: Option<f64>,
    },
    /// Scale so that the path's start and end points span the same
    /// horizontal and vertical distances as `start` and `end`. An axis
    /// without a distance on either side follows the other axis.
    Points {
        /// Start of the target span.
        start: Point,
        /// End of the target span.
        end: Point,
    },
}

impl Scale {
    /// The same factor on both axes.
    #[inline]
    pub fn uniform(factor: f64) -> Self {
        Self::Factors {
            x: factor,
            y: factor,
        }
    }

    fn factors(&self, path: &Path) -> Result<(f64, f64)> {
        let (xs, ys) = match *self {
            Self::Factors { x, y } => (x, y),
            Self::Size { width, height } => {
                let bbox = path.bounding_box_trim_whitespace();
                let xs = width.map(|w| w / bbox.width().abs());
                let ys = height.map(|h| h / bbox.height().abs());
                match (xs, ys) {
                    (Some(xs), Some(ys)) => (xs, ys),
                    (Some(s), None) | (None, Some(s)) => (s, s),
                    (None, None) => (1.0, 1.0),
                }
            }
            Self::Points { start, end } => {
                let (s, e) = start_and_end(path).ok_or_else(|| {
                    Error::DegenerateInput("cannot scale an empty path to points".into())
                })?;
                let (new_x, new_y) = ((end.x - start.x).abs(), (end.y - start.y).abs());
                let (old_x, old_y) = ((e.x - s.x).abs(), (e.y - s.y).abs());
                let mut xs = new_x / old_x;
                let mut ys = new_y / old_y;
                if new_x == 0.0 || old_x == 0.0 {
                    xs = ys;
                }
                if new_y == 0.0 || old_y == 0.0 {
                    ys = xs;
                }
                (xs, ys)
            }
        };
        if xs.is_finite() && ys.is_finite() {
            Ok((xs, ys))
        } else {
            Err(Error::DegenerateInput(format!("{self:?} has no finite scale factor")))
        }
    }
}

impl PathTransform for Scale {
    fn transform(&self, path: &Path) -> Result<Path> {
        let (xs, ys) = self.factors(path)?;
        Ok(map_points(path, |p| Point::new(p.x * xs, p.y * ys)))
    }
}

/// Apply the affine map `x' = ax + cy + e`, `y' = bx + dy + f`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix {
    /// x scale.
    pub a: f64,
    /// y shear.
    pub b: f64,
    /// x shear.
    pub c: f64,
    /// y scale.
    pub d: f64,
    /// x translation.
    pub e: f64,
    /// y translation.
    pub f: f64,
}

impl Matrix {
    /// The identity map.
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    /// A map from its six coefficients.
    #[inline]
    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Where the map sends `p`.
    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PathTransform for Matrix {
    fn transform(&self, path: &Path) -> Result<Path> {
        Ok(map_points(path, |p| self.apply(p)))
    }
}

/// Move a path so that its trimmed bounding box starts at the origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrimWhitespace;

impl PathTransform for TrimWhitespace {
    fn transform(&self, path: &Path) -> Result<Path> {
        let tl = path.bounding_box_trim_whitespace().top_left();
        Shift::new(-tl.x, -tl.y).transform(path)
    }
}

/// Fit a path onto a line.
///
/// The line from `path_start` to `path_end` is turned to the direction of
/// the line from `start` to `end`, the path is scaled uniformly by the
/// larger of the two axis ratios between the lines, and finally moved so
/// that its start point lands on `start`. Rotation and scaling are about
/// the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotateScale {
    /// Where the path should start.
    pub start: Point,
    /// Where the path should end.
    pub end: Point,
    /// The point of the path treated as its start.
    pub path_start: Anchor,
    /// The point of the path treated as its end.
    pub path_end: Anchor,
}

impl RotateScale {
    /// Fit the start and end points of the path onto `start` and `end`.
    #[inline]
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            path_start: Anchor::StartPoint,
            path_end: Anchor::EndPoint,
        }
    }
}

impl PathTransform for RotateScale {
    fn transform(&self, path: &Path) -> Result<Path> {
        let requested = Line::new(self.start, self.end);
        let current = Line::new(self.path_start.point(path)?, self.path_end.point(path)?);
        let degrees = requested.angle() - current.angle();
        let turned = Rotate {
            degrees,
            axis: Anchor::Origin,
        }
        .transform(path)?;
        let current = Line::new(current.p0.rotate(degrees), current.p1.rotate(degrees));
        let ratio = |new: f64, old: f64| if old == 0.0 { 0.0 } else { new / old };
        let d_new = requested.p1 - requested.p0;
        let d_old = current.p1 - current.p0;
        let factor = ratio(d_new.x.abs(), d_old.x.abs()).max(ratio(d_new.y.abs(), d_old.y.abs()));
        let scaled = Scale::uniform(factor).transform(&turned)?;
        MoveTo {
            point: self.start,
            handle: Anchor::StartPoint,
        }
        .transform(&scaled)
    }
}

#[cfg(test)]
mod tests {
    use super::{Matrix, Mirror, MirrorAxis, MoveTo, Rotate, RotateScale, Scale, Shift, TrimWhitespace};
    use crate::{Anchor, Error, Path, PathTransform, Point};

    fn parse(text: &str) -> Path {
        Path::from_svg(text).unwrap()
    }

    #[test]
    fn shift_and_trim() {
        let p = parse("M 3 4 L 5 9");
        assert_eq!(Shift::new(-1.0, 2.0).transform(&p).unwrap().svg(0), "M 2 6 L 4 11");
        assert_eq!(TrimWhitespace.transform(&p).unwrap().svg(0), "M 0 0 L 2 5");
    }

    #[test]
    fn move_to_handles() {
        let p = parse("M 30.000 30.000 l 5,5 l 10,0");
        let t = MoveTo::new(Point::new(10.0, 10.0)).with_handle(Anchor::MiddleMiddle);
        assert_eq!(
            t.transform(&p).unwrap().svg(3),
            "M 2.500 7.500 L 7.500 12.500 L 17.500 12.500"
        );
        let t = MoveTo::new(Point::ORIGIN);
        assert_eq!(t.transform(&p).unwrap().svg(0), "M 0 0 L 5 5 L 15 5");
        let t = MoveTo::new(Point::ORIGIN).with_handle(Anchor::Width);
        assert!(matches!(t.transform(&p), Err(Error::DegenerateInput(_))));
    }

    #[test]
    fn matrix() {
        let p = parse(
            "M 0,0 C 46.434 102.260 139.261 169.468 163.395 119.000 \
             C 170.800 103.516 171.739 76.955 160.000 30.000",
        );
        let m = Matrix::new(3.0, 1.0, -1.0, 3.0, 30.0, 40.0);
        assert_eq!(
            m.transform(&p).unwrap().svg(3),
            "M 30.000 40.000 C 67.042 393.214 278.315 687.665 401.185 560.395 \
             C 438.884 521.348 468.262 442.604 480.000 290.000"
        );
        assert_eq!(Matrix::default().transform(&p).unwrap(), p);
    }

    #[test]
    fn mirror_horizontally() {
        let p = parse(
            "M425.474,539.286L345.318,539.286C330.065,539.286 317.682,551.67 317.682,566.923\
             L317.682,622.195C317.682,637.448 330.065,649.832 345.318,649.832\
             C383.05,617.532 417.826,603.513 450.386,603.194\
             C482.947,603.513 517.723,617.532 555.455,649.832\
             C570.708,649.832 583.091,637.448 583.091,622.195L583.091,566.923\
             C583.091,551.67 570.708,539.286 555.455,539.286L475.298,539.286",
        );
        let t = Mirror {
            axis: MirrorAxis::Horizontal,
            handle: Anchor::MiddleMiddle,
        };
        assert_eq!(
            t.transform(&p).unwrap().svg(3),
            "M 425.474 705.105 L 345.318 705.105 C 330.065 705.105 317.682 692.721 317.682 677.468 \
             L 317.682 622.196 C 317.682 606.943 330.065 594.559 345.318 594.559 \
             C 383.050 626.859 417.826 640.878 450.386 641.197 \
             C 482.947 640.878 517.723 626.859 555.455 594.559 \
             C 570.708 594.559 583.091 606.943 583.091 622.196 L 583.091 677.468 \
             C 583.091 692.721 570.708 705.105 555.455 705.105 L 475.298 705.105"
        );
    }

    #[test]
    fn mirror_vertically_about_top_left() {
        let p = parse("M 2 2 L 6 2 L 6 3");
        let out = Mirror::new(MirrorAxis::Vertical).transform(&p).unwrap();
        assert_eq!(out.svg(0), "M 6 2 L 2 2 L 2 3");
    }

    #[test]
    fn rotate_about_top_left() {
        let p = parse("M 50.000 50.000 l 20,0");
        assert_eq!(
            Rotate::new(130.0).transform(&p).unwrap().svg(3),
            "M 50.000 50.000 L 37.144 65.321"
        );
        let quarter = Rotate::new(90.0).around(Anchor::Origin).transform(&p).unwrap();
        assert_eq!(quarter.svg(3), "M -50.000 50.000 L -50.000 70.000");
    }

    #[test]
    fn scale_by_points() {
        let p = parse(
            "M348.7,980.332L257.96,1029.19L329.328,881.936 \
             C638.607,1066.56 477.01,980.332 477.01,980.332",
        );
        let t = Scale::Points {
            start: Point::new(0.0, 0.0),
            end: Point::new(0.5, 0.0),
        };
        assert_eq!(
            t.transform(&p).unwrap().svg(3),
            "M 1.359 3.820 L 1.005 4.011 L 1.283 3.437 C 2.489 4.156 1.859 3.820 1.859 3.820"
        );
    }

    #[test]
    fn scale_by_size_and_factors() {
        let p = parse("M 1 1 L 3 5");
        let t = Scale::Size {
            width: Some(4.0),
            height: None,
        };
        assert_eq!(t.transform(&p).unwrap().svg(0), "M 2 2 L 6 10");
        let t = Scale::Size {
            width: Some(4.0),
            height: Some(2.0),
        };
        assert_eq!(t.transform(&p).unwrap().svg(1), "M 2.0 0.5 L 6.0 2.5");
        let t = Scale::Factors { x: -1.0, y: 2.0 };
        assert_eq!(t.transform(&p).unwrap().svg(0), "M -1 2 L -3 10");

        let flat = parse("M 1 1 L 3 1");
        let t = Scale::Size {
            width: None,
            height: Some(4.0),
        };
        assert!(matches!(t.transform(&flat), Err(Error::DegenerateInput(_))));
    }

    #[test]
    fn rotate_scale_onto_a_line() {
        let p = parse("M 0 0 L 10 0");
        let t = RotateScale::new(Point::new(5.0, 5.0), Point::new(5.0, 25.0));
        assert_eq!(t.transform(&p).unwrap().svg(3), "M 5.000 5.000 L 5.000 25.000");

        let p = parse("M 1 1 L 2 1 L 3 2");
        let t = RotateScale::new(Point::new(0.0, 0.0), Point::new(4.0, 2.0));
        let out = t.transform(&p).unwrap();
        assert!(out.cursor().precision_eq(&Point::new(4.0, 2.0), 9), "{out}");
    }
}
