// Copyright 2026 the Kerfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cubic Bézier segments.
//!
//! Evaluation, splitting, reduction into simple pieces, offsetting, and
//! line/curve intersection. The reduction and offset algorithms follow
//! Pomax's "A Primer on Bézier Curves".

use core::cell::OnceCell;
use core::f64::consts::PI;

use arrayvec::ArrayVec;

use crate::common::{approx, between, crt, droots, map_range, precision_eq};
use crate::log::{debug, warn};
use crate::{Error, Line, Point, Rect, Result};

/// Number of samples in a curve's lookup table.
pub const LUT_STEPS: usize = 100;

/// Parameter step used while growing simple sub-curves in [`CubicBez::reduce`].
const REDUCE_STEP: f64 = 0.01;

/// Bisection depth at which the curve/curve intersection search reports its
/// current estimate instead of recursing further.
const MAX_PAIR_DEPTH: usize = 32;

/// A single cubic Bézier segment.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubicBez {
    /// Start point.
    pub p0: Point,
    /// Start control point.
    pub p1: Point,
    /// End control point.
    pub p2: Point,
    /// End point.
    pub p3: Point,
}

/// The closest point of a curve to some other point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// The point on the curve.
    pub point: Point,
    /// The curve parameter of `point`.
    pub t: f64,
    /// Distance between `point` and the projected point.
    pub distance: f64,
}

/// A portion of some ancestor curve, remembering which parameter range of
/// the ancestor it covers.
#[derive(Clone, Debug)]
pub struct CurveRange {
    /// The geometry of this portion.
    pub curve: CubicBez,
    /// Ancestor parameter at the start of this portion.
    pub t1: f64,
    /// Ancestor parameter at the end of this portion.
    pub t2: f64,
    lut: OnceCell<Vec<Point>>,
}

impl CubicBez {
    /// Create a new cubic Bézier segment.
    #[inline]
    pub fn new<P: Into<Point>>(p0: P, p1: P, p2: P, p3: P) -> Self {
        Self {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
            p3: p3.into(),
        }
    }

    /// The control points, in order.
    #[inline]
    pub fn points(&self) -> [Point; 4] {
        [self.p0, self.p1, self.p2, self.p3]
    }

    /// The point at parameter `t`, using the Bernstein form.
    ///
    /// `t == 0` and `t == 1` return the end points exactly.
    ///
    /// # Examples
    ///
    /// ```
    /// use kerfline::{CubicBez, Point};
    ///
    /// let c = CubicBez::new((90.0, 110.0), (25.0, 40.0), (230.0, 40.0), (150.0, 240.0));
    /// assert!(c.eval(0.43).precision_eq(&Point::new(111.793, 68.865), 3));
    /// assert_eq!(c.eval(1.0), Point::new(150.0, 240.0));
    /// ```
    pub fn eval(&self, t: f64) -> Point {
        if t == 0.0 {
            return self.p0;
        }
        if t == 1.0 {
            return self.p3;
        }
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let t2 = t * t;
        let a = mt2 * mt;
        let b = mt2 * t * 3.0;
        let c = mt * t2 * 3.0;
        let d = t * t2;
        let [p0, p1, p2, p3] = self.points();
        Point::new(
            a * p0.x + b * p1.x + c * p2.x + d * p3.x,
            a * p0.y + b * p1.y + c * p2.y + d * p3.y,
        )
    }

    /// The point at parameter `t`, by repeated linear interpolation.
    pub fn de_casteljau(&self, t: f64) -> Point {
        let mut points: ArrayVec<Point, 4> = self.points().into_iter().collect();
        while points.len() > 1 {
            for i in 0..points.len() - 1 {
                let (a, b) = (points[i], points[i + 1]);
                points[i] = Point::new((1.0 - t) * a.x + t * b.x, (1.0 - t) * a.y + t * b.y);
            }
            points.pop();
        }
        points[0]
    }

    /// Control points of the first, second, and third derivatives.
    pub fn deriv_points(&self) -> ([Point; 3], [Point; 2], [Point; 1]) {
        fn level<const N: usize>(p: &[Point], c: f64) -> [Point; N] {
            core::array::from_fn(|j| {
                Point::new(c * (p[j + 1].x - p[j].x), c * (p[j + 1].y - p[j].y))
            })
        }
        let d1: [Point; 3] = level(&self.points(), 3.0);
        let d2: [Point; 2] = level(&d1, 2.0);
        let d3: [Point; 1] = level(&d2, 1.0);
        (d1, d2, d3)
    }

    /// The tangent at `t`. Not normalized.
    pub fn derivative(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let (p, _, _) = self.deriv_points();
        let a = mt * mt;
        let b = mt * t * 2.0;
        let c = t * t;
        Point::new(
            a * p[0].x + b * p[1].x + c * p[2].x,
            a * p[0].y + b * p[1].y + c * p[2].y,
        )
    }

    /// The unit normal at `t`: the tangent turned a quarter turn.
    pub fn normal(&self, t: f64) -> Point {
        let d = self.derivative(t);
        let q = (d.x * d.x + d.y * d.y).sqrt();
        Point::new(-d.y / q, d.x / q)
    }

    /// Parameters in `[0, 1]` where the x and the y coordinate have an
    /// extremum or an inflection, per axis and unsorted.
    pub fn extrema(&self) -> (ArrayVec<f64, 4>, ArrayVec<f64, 4>) {
        let (d1, d2, _) = self.deriv_points();
        let roots = |coord: fn(&Point) -> f64| {
            let first: ArrayVec<f64, 3> = d1.iter().map(coord).collect();
            let second: ArrayVec<f64, 2> = d2.iter().map(coord).collect();
            droots(&first)
                .into_iter()
                .chain(droots(&second))
                .filter(|t| (0.0..=1.0).contains(t))
                .collect::<ArrayVec<f64, 4>>()
        };
        (roots(|p| p.x), roots(|p| p.y))
    }

    /// The smallest rectangle holding the curve.
    pub fn bounding_box(&self) -> Rect {
        let (xs, ys) = self.extrema();
        let mut bbox = Rect::new(
            f64::INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::NEG_INFINITY,
        );
        for &t in xs.iter().chain(&[0.0, 1.0]) {
            let p = self.eval(t);
            bbox.x0 = bbox.x0.min(p.x);
            bbox.x1 = bbox.x1.max(p.x);
        }
        for &t in ys.iter().chain(&[0.0, 1.0]) {
            let p = self.eval(t);
            bbox.y0 = bbox.y0.min(p.y);
            bbox.y1 = bbox.y1.max(p.y);
        }
        bbox
    }

    /// Do the bounding boxes of two curves overlap?
    pub fn overlaps(&self, other: &Self) -> bool {
        self.bounding_box().overlaps(&other.bounding_box())
    }

    /// The de Casteljau construction at `t`: the four control points, then
    /// the three, two, and one interpolated points of each level.
    pub fn hull(&self, t: f64) -> [Point; 10] {
        let [p0, p1, p2, p3] = self.points();
        let q4 = p0.lerp(p1, t);
        let q5 = p1.lerp(p2, t);
        let q6 = p2.lerp(p3, t);
        let q7 = q4.lerp(q5, t);
        let q8 = q5.lerp(q6, t);
        let q9 = q7.lerp(q8, t);
        [p0, p1, p2, p3, q4, q5, q6, q7, q8, q9]
    }

    /// Split the curve in two at `t`.
    pub fn split(&self, t: f64) -> (Self, Self) {
        let q = self.hull(t);
        (
            Self::new(q[0], q[4], q[7], q[9]),
            Self::new(q[9], q[8], q[6], q[3]),
        )
    }

    /// The part of the curve between `t1` and `t2`.
    ///
    /// # Examples
    ///
    /// ```
    /// use kerfline::{CubicBez, Point};
    ///
    /// let c = CubicBez::new((90.0, 110.0), (25.0, 40.0), (230.0, 40.0), (150.0, 240.0));
    /// let s = c.section(0.2, 0.3);
    /// assert!(s.p0.precision_eq(&Point::new(78.96, 77.44), 3));
    /// assert!(s.p3.precision_eq(&Point::new(89.415, 69.41), 3));
    /// ```
    pub fn section(&self, t1: f64, t2: f64) -> Self {
        CurveRange::new(*self).section(t1, t2).curve
    }

    /// The same curve running in the other direction.
    #[inline]
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.p3, self.p2, self.p1, self.p0)
    }

    /// Is this curve safe to scale?
    ///
    /// Both control points must lie on the same side of the chord, and the
    /// end normals must be less than 60° apart.
    pub fn is_simple(&self) -> bool {
        let a1 = self.p0.angle_between(self.p3, self.p1);
        let a2 = self.p0.angle_between(self.p3, self.p2);
        if (a1 > 0.0 && a2 < 0.0) || (a1 < 0.0 && a2 > 0.0) {
            return false;
        }
        let n1 = self.normal(0.0);
        let n2 = self.normal(1.0);
        n1.dot(n2).acos().abs() < PI / 3.0
    }

    /// Does the start control point lie clockwise of the chord?
    pub fn is_clockwise(&self) -> bool {
        self.p0.angle_between(self.p3, self.p1) > 0.0
    }

    /// This curve with control points that coincide with their end point
    /// moved along the curve, which keeps the end normals defined.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut curve = *self;
        if curve.p0 == curve.p1 {
            curve.p1 = curve.eval(0.1);
        }
        if curve.p3 == curve.p2 {
            curve.p2 = curve.eval(0.99);
        }
        curve
    }

    /// Decompose the curve into simple sub-curves.
    ///
    /// The curve is first split at every extremum, then each piece is grown
    /// in small parameter steps for as long as it stays simple.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotReducible`] if some part of the curve is not
    /// simple even over a single parameter step.
    pub fn reduce(&self) -> Result<Vec<CurveRange>> {
        let (xs, ys) = self.extrema();
        let mut splits: Vec<f64> = Vec::with_capacity(10);
        for t in xs.into_iter().chain(ys).chain([0.0, 1.0]) {
            if !splits.contains(&t) {
                splits.push(t);
            }
        }
        splits.sort_by(|a, b| a.partial_cmp(b).unwrap_or(core::cmp::Ordering::Equal));

        let whole = CurveRange::new(*self);
        let pass1 = splits.windows(2).map(|w| {
            let mut piece = whole.section(w[0], w[1]);
            piece.t1 = w[0];
            piece.t2 = w[1];
            piece
        });

        let mut pass2 = Vec::new();
        for p1 in pass1 {
            let mut t1 = 0.0;
            let mut t2 = 0.0;
            while t2 <= 1.0 {
                t2 = t1 + REDUCE_STEP;
                while t2 <= 1.0 + REDUCE_STEP {
                    if !p1.section(t1, t2).curve.is_simple() {
                        t2 -= REDUCE_STEP;
                        if (t1 - t2).abs() < REDUCE_STEP {
                            return Err(Error::NotReducible);
                        }
                        let mut piece = p1.section(t1, t2);
                        piece.t1 = map_range(t1, 0.0, 1.0, p1.t1, p1.t2);
                        piece.t2 = map_range(t2, 0.0, 1.0, p1.t1, p1.t2);
                        pass2.push(piece);
                        t1 = t2;
                        break;
                    }
                    t2 += REDUCE_STEP;
                }
            }
            if t1 < 1.0 {
                let mut piece = p1.section(t1, 1.0);
                piece.t1 = map_range(t1, 0.0, 1.0, p1.t1, p1.t2);
                piece.t2 = p1.t2;
                pass2.push(piece);
            }
        }
        Ok(pass2)
    }

    /// The point at `t`, moved `d` along the normal there.
    pub fn offset_point(&self, t: f64, d: f64) -> Point {
        let curve = self.normalized();
        let c = curve.eval(t);
        let n = curve.normal(t);
        Point::new(c.x + n.x * d, c.y + n.y * d)
    }

    /// An approximation of the curve offset by `d` along its normals, as a
    /// chain of cubic curves.
    ///
    /// If one of the reduced pieces cannot be scaled, the chain built so far
    /// is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotReducible`] if the curve cannot be reduced.
    pub fn offset(&self, d: f64) -> Result<Vec<Self>> {
        let curve = self.normalized();
        let reduced = curve.reduce()?;
        let mut curves = Vec::with_capacity(reduced.len());
        for piece in &reduced {
            match piece.curve.scale(d) {
                Ok(scaled) => curves.push(scaled),
                Err(err) => {
                    warn!(curve = ?piece.curve, %err, "offset stopped early");
                    // only read by the log line
                    let _ = &err;
                    break;
                }
            }
        }
        Ok(curves)
    }

    /// The curve moved `d` along its normals, keeping the tangent
    /// directions at both ends.
    ///
    /// Only meaningful for simple curves, see [`CubicBez::reduce`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateCurve`] if the end normals are parallel, so
    /// no scaling origin exists.
    pub fn scale(&self, d: f64) -> Result<Self> {
        let o = self.scaling_origin()?;
        let points = self.points();
        let mut np = [Point::ORIGIN; 4];
        np[0] = self.p0 + self.normal(0.0) * d;
        np[3] = self.p3 + self.normal(1.0) * d;
        // Controls sit where the offset tangent crosses the line from the
        // origin through the old control point.
        for (t, end, ctrl) in [(0.0, 0, 1), (1.0, 3, 2)] {
            let p = np[end];
            let tangent = p + self.derivative(t);
            np[ctrl] = lli(p, tangent, o, points[ctrl])
                .unwrap_or(points[ctrl] + (p - points[end]));
        }
        Ok(Self::new(np[0], np[1], np[2], np[3]))
    }

    /// The curve moved along its normals by a distance that varies with the
    /// parameter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateCurve`] if the end normals are parallel.
    pub fn scale_by(&self, distance: impl Fn(f64) -> f64) -> Result<Self> {
        let o = self.scaling_origin()?;
        let clockwise = self.is_clockwise();
        let points = self.points();
        let mut np = [Point::ORIGIN; 4];
        np[0] = self.p0 + self.normal(0.0) * distance(0.0);
        np[3] = self.p3 + self.normal(1.0) * distance(1.0);
        for (t, ctrl) in [(0.0, 1), (1.0, 2)] {
            let p = points[ctrl];
            let mut rc = distance((t + 1.0) / 3.0);
            if !clockwise {
                rc = -rc;
            }
            np[ctrl] = p + (p - o).normalize() * rc;
        }
        Ok(Self::new(np[0], np[1], np[2], np[3]))
    }

    /// Where the normals at both ends cross.
    fn scaling_origin(&self) -> Result<Point> {
        let v0 = self.offset_point(0.0, 10.0);
        let v1 = self.offset_point(1.0, 10.0);
        lli(v0, self.eval(0.0), v1, self.eval(1.0)).ok_or(Error::DegenerateCurve)
    }

    /// Parameters in `[0, 1]` where the curve crosses the infinite line
    /// through `p1` and `p2`.
    ///
    /// The curve is aligned so the line becomes the x axis and the resulting
    /// cubic is solved with Cardano's method.
    pub fn roots(&self, p1: Point, p2: Point) -> ArrayVec<f64, 3> {
        let aligned = align(&self.points(), p1, p2);
        let pa = aligned[0].y;
        let pb = aligned[1].y;
        let pc = aligned[2].y;
        let pd = aligned[3].y;
        let d = -pa + 3.0 * pb - 3.0 * pc + pd;
        let mut a = 3.0 * pa - 6.0 * pb + 3.0 * pc;
        let mut b = -3.0 * pa + 3.0 * pb;
        let mut c = pa;

        let in_range = |ts: &[f64]| -> ArrayVec<f64, 3> {
            ts.iter().copied().filter(|t| (0.0..=1.0).contains(t)).collect()
        };

        if approx(d, 0.0) {
            // not a cubic
            if approx(a, 0.0) {
                if approx(b, 0.0) {
                    return ArrayVec::new();
                }
                return in_range(&[-c / b]);
            }
            let q = (b * b - 4.0 * a * c).sqrt();
            let a2 = 2.0 * a;
            return in_range(&[(q - b) / a2, (-b - q) / a2]);
        }

        a /= d;
        b /= d;
        c /= d;

        let p = (3.0 * b - a * a) / 3.0;
        let p3 = p / 3.0;
        let q = (2.0 * a * a * a - 9.0 * a * b + 27.0 * c) / 27.0;
        let q2 = q / 2.0;
        let discriminant = q2 * q2 + p3 * p3 * p3;

        if discriminant < 0.0 {
            let mp3 = -p / 3.0;
            let r = (mp3 * mp3 * mp3).sqrt();
            let cosphi = (-q / (2.0 * r)).clamp(-1.0, 1.0);
            let phi = cosphi.acos();
            let tau = 2.0 * PI;
            let t1 = 2.0 * crt(r);
            in_range(&[
                t1 * (phi / 3.0).cos() - a / 3.0,
                t1 * ((phi + tau) / 3.0).cos() - a / 3.0,
                t1 * ((phi + 2.0 * tau) / 3.0).cos() - a / 3.0,
            ])
        } else if discriminant == 0.0 {
            let u1 = -crt(q2);
            in_range(&[2.0 * u1 - a / 3.0, -u1 - a / 3.0])
        } else {
            let sd = discriminant.sqrt();
            let u1 = crt(-q2 + sd);
            let v1 = crt(q2 + sd);
            in_range(&[u1 - v1 - a / 3.0])
        }
    }

    /// Parameters where the curve crosses the line segment.
    pub fn intersect_line(&self, line: &Line) -> ArrayVec<f64, 3> {
        let bbox = line.bounding_box();
        self.roots(line.p0, line.p1)
            .into_iter()
            .filter(|&t| {
                let p = self.eval(t);
                between(p.x, bbox.x0, bbox.x1) && between(p.y, bbox.y0, bbox.y1)
            })
            .collect()
    }

    /// Parameters where the curve crosses the infinite extension of the line.
    #[inline]
    pub fn intersect_projected_line(&self, line: &Line) -> ArrayVec<f64, 3> {
        self.roots(line.p0, line.p1)
    }

    /// Parameter pairs `(t on self, t on other)` where two curves cross,
    /// rounded to 5 decimals.
    ///
    /// A curve that cannot be reduced has no reported intersections.
    pub fn intersect_curve(&self, other: &Self, threshold: f64) -> Vec<(f64, f64)> {
        match (self.reduce(), other.reduce()) {
            (Ok(r1), Ok(r2)) => curve_intersects(&r1, &r2, threshold),
            _ => {
                debug!(?self, ?other, "skipping intersection of unreducible curve");
                Vec::new()
            }
        }
    }

    /// The first self-intersection of the curve, as a pair of parameters.
    pub fn intersects_self(&self, threshold: f64) -> Option<(f64, f64)> {
        let reduced = self.reduce().ok()?;
        // simple curves cannot cross their direct neighbour
        (0..reduced.len().saturating_sub(2)).find_map(|i| {
            curve_intersects(&reduced[i..=i], &reduced[i + 2..], threshold)
                .first()
                .copied()
        })
    }

    /// The point on the curve closest to `point`.
    pub fn project(&self, point: Point) -> Projection {
        CurveRange::new(*self).project(point)
    }
}

impl CurveRange {
    /// The whole of `curve`.
    pub fn new(curve: CubicBez) -> Self {
        Self::with_range(curve, 0.0, 1.0)
    }

    fn with_range(curve: CubicBez, t1: f64, t2: f64) -> Self {
        Self {
            curve,
            t1,
            t2,
            lut: OnceCell::new(),
        }
    }

    /// Split at `t`, mapping the ancestor range onto both halves.
    pub fn split(&self, t: f64) -> (Self, Self) {
        let (left, right) = self.curve.split(t);
        let mid = map_range(t, 0.0, 1.0, self.t1, self.t2);
        (
            Self::with_range(left, map_range(0.0, 0.0, 1.0, self.t1, self.t2), mid),
            Self::with_range(right, mid, map_range(1.0, 0.0, 1.0, self.t1, self.t2)),
        )
    }

    /// The portion between the local parameters `t1` and `t2`.
    pub fn section(&self, t1: f64, t2: f64) -> Self {
        if t1 == 0.0 {
            return self.split(t2).0;
        }
        if t2 == 1.0 {
            return self.split(t1).1;
        }
        let (_, right) = self.split(t1);
        right.split(map_range(t2, t1, 1.0, 0.0, 1.0)).0
    }

    /// Evenly spaced samples of the curve, both ends included.
    pub fn lut(&self) -> &[Point] {
        self.lut.get_or_init(|| {
            let last = (LUT_STEPS - 1) as f64;
            (0..LUT_STEPS)
                .map(|i| self.curve.eval(i as f64 / last))
                .collect()
        })
    }

    /// The point on the curve closest to `point`.
    ///
    /// The nearest lookup table sample is refined by a fine pass over the
    /// interval around it.
    pub fn project(&self, point: Point) -> Projection {
        let lut = self.lut();
        let l = (lut.len() - 1) as f64;
        let (idx, mut mdist) = lut
            .iter()
            .map(|p| point.distance(*p))
            .enumerate()
            .fold((0, f64::INFINITY), |best, (i, d)| if d < best.1 { (i, d) } else { best });
        if idx == 0 || idx == lut.len() - 1 {
            return Projection {
                point: lut[idx],
                t: idx as f64 / l,
                distance: mdist,
            };
        }

        let t1 = (idx as f64 - 1.0) / l;
        let t2 = (idx as f64 + 1.0) / l;
        let step = 0.1 / l;
        mdist += 1.0;
        let mut ft = t1;
        let mut t = t1;
        while t < t2 + step {
            let d = point.distance(self.curve.eval(t));
            if d < mdist {
                mdist = d;
                ft = t;
            }
            t += step;
        }
        Projection {
            point: self.curve.eval(ft),
            t: ft,
            distance: mdist,
        }
    }
}

/// Translate and rotate `points` so the line from `p1` to `p2` is the x axis.
fn align(points: &[Point; 4], p1: Point, p2: Point) -> [Point; 4] {
    let tx = p1.x;
    let ty = p1.y;
    let a = -(p2.y - ty).atan2(p2.x - tx);
    let (sin, cos) = (a.sin(), a.cos());
    points.map(|v| {
        Point::new(
            (v.x - tx) * cos - (v.y - ty) * sin,
            (v.x - tx) * sin + (v.y - ty) * cos,
        )
    })
}

/// Intersection of the infinite lines through `p1`, `p2` and `p3`, `p4`.
fn lli(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<Point> {
    let (x1, y1, x2, y2) = (p1.x, p1.y, p2.x, p2.y);
    let (x3, y3, x4, y4) = (p3.x, p3.y, p4.x, p4.y);
    let nx = (x1 * y2 - y1 * x2) * (x3 - x4) - (x1 - x2) * (x3 * y4 - y3 * x4);
    let ny = (x1 * y2 - y1 * x2) * (y3 - y4) - (y1 - y2) * (x3 * y4 - y3 * x4);
    let d = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
    if d == 0.0 {
        return None;
    }
    Some(Point::new(nx / d, ny / d))
}

fn curve_intersects(c1: &[CurveRange], c2: &[CurveRange], threshold: f64) -> Vec<(f64, f64)> {
    let mut intersections = Vec::new();
    for l in c1 {
        for r in c2 {
            if l.curve.overlaps(&r.curve) {
                intersections.extend(pair_iteration(l, r, threshold, 0));
            }
        }
    }
    intersections
}

fn pair_iteration(c1: &CurveRange, c2: &CurveRange, threshold: f64, depth: usize) -> Vec<(f64, f64)> {
    let b1 = c1.curve.bounding_box();
    let b2 = c2.curve.bounding_box();
    let converged = b1.width() + b1.height() < threshold && b2.width() + b2.height() < threshold;
    if converged || depth >= MAX_PAIR_DEPTH {
        if !converged {
            debug!(depth, "curve intersection search hit its depth limit");
        }
        let r = 100_000.0;
        return vec![(
            (r * (c1.t1 + c1.t2) / 2.0).round() / r,
            (r * (c2.t1 + c2.t2) / 2.0).round() / r,
        )];
    }

    let (l1, r1) = c1.split(0.5);
    let (l2, r2) = c2.split(0.5);
    let mut results: Vec<(f64, f64)> = Vec::new();
    for (a, b) in [(&l1, &l2), (&l1, &r2), (&r1, &r2), (&r1, &l2)] {
        if !a.curve.overlaps(&b.curve) {
            continue;
        }
        for pair in pair_iteration(a, b, threshold, depth + 1) {
            let seen = results
                .iter()
                .any(|(l, r)| precision_eq(*l, pair.0, 5) && precision_eq(*r, pair.1, 5));
            if !seen {
                results.push(pair);
            }
        }
    }
    results
}
