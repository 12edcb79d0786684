// Copyright 2026 the Kerfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Operations over pairs of segments of any kind.

use core::cmp::Ordering;

use smallvec::{smallvec, SmallVec};

use crate::common::{precision_cmp, precision_eq};
use crate::log::debug;
use crate::{line_intersection, CubicBez, KernelOptions, Line, Point, Rect, Segment};

/// Digits at which a split point is considered to sit on a segment end.
const SPLIT_PRECISION: i32 = 7;

/// A short run of segments, as produced by [`SegmentOps::split`] and
/// [`SegmentOps::join`].
pub type Segments = SmallVec<[Segment; 3]>;

/// Bounding boxes, intersection, splitting, offsetting and joining of
/// segments.
///
/// Every pairing of [`Segment`] variants is handled; curve work is delegated
/// to [`CubicBez`]. Comparisons use the precision of the [`KernelOptions`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SegmentOps {
    options: KernelOptions,
}

impl SegmentOps {
    /// Operators using `options`.
    #[inline]
    pub fn new(options: KernelOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    #[inline]
    pub fn options(&self) -> &KernelOptions {
        &self.options
    }

    /// Decimal digits used for comparisons.
    #[inline]
    pub fn precision(&self) -> i32 {
        self.options.precision
    }

    /// The smallest rectangle holding the segment.
    #[inline]
    pub fn bounding_box(&self, seg: &Segment) -> Rect {
        seg.bounding_box()
    }

    /// The segment traversed in the opposite direction.
    #[inline]
    pub fn reverse(&self, seg: &Segment) -> Segment {
        seg.reversed()
    }

    /// Map every defining point of the segment through `f`.
    #[inline]
    pub fn transform_points(&self, seg: &Segment, f: impl FnMut(Point) -> Point) -> Segment {
        seg.transform_points(f)
    }

    /// The points where two segments cross.
    ///
    /// Moves never intersect anything. Points found on a curve are tagged
    /// with their parameter on that curve (the left one for two curves).
    /// Two lines intersect only where the crossing lies within both
    /// segments, and parallel lines not at all.
    pub fn intersect(&self, s1: &Segment, s2: &Segment) -> Vec<Point> {
        match (s1, s2) {
            (Segment::Move(_), _) | (_, Segment::Move(_)) => Vec::new(),
            (Segment::Line(l1), Segment::Line(l2)) => {
                let n = self.precision();
                match line_intersection(l1, l2, n) {
                    Ok(p)
                        if in_box(&l1.bounding_box(), p, n)
                            && in_box(&l2.bounding_box(), p, n) =>
                    {
                        vec![p]
                    }
                    _ => Vec::new(),
                }
            }
            (Segment::Curve(c), Segment::Line(l)) | (Segment::Line(l), Segment::Curve(c)) => {
                tagged(c, c.intersect_line(l))
            }
            (Segment::Curve(c1), Segment::Curve(c2)) => c1
                .intersect_curve(c2, self.options.curve_intersection_threshold)
                .into_iter()
                .map(|(t, _)| c1.eval(t).with_t(t))
                .collect(),
        }
    }

    /// Split a segment at `point`.
    ///
    /// A point on either end of the segment leaves it whole. On a curve the
    /// split parameter comes from the point's tag when it has a positive
    /// one, and from projecting the point onto the curve otherwise.
    pub fn split(&self, seg: &Segment, point: Point) -> Segments {
        if point.precision_eq(&seg.start(), SPLIT_PRECISION)
            || point.precision_eq(&seg.end(), SPLIT_PRECISION)
        {
            return smallvec![*seg];
        }
        let at = untagged(point);
        match seg {
            Segment::Move(l) => smallvec![Segment::move_to(l.p0, at), Segment::move_to(at, l.p1)],
            Segment::Line(l) => smallvec![Segment::line(l.p0, at), Segment::line(at, l.p1)],
            Segment::Curve(c) => {
                let t = match point.t() {
                    Some(t) if t > 0.0 => t,
                    _ => c.project(point).t,
                };
                if precision_eq(t, 0.0, SPLIT_PRECISION) || precision_eq(t, 1.0, SPLIT_PRECISION) {
                    return smallvec![*seg];
                }
                let (left, right) = c.split(t);
                smallvec![Segment::Curve(left), Segment::Curve(right)]
            }
        }
    }

    /// Offset a segment by `distance`.
    ///
    /// A segment whose ends coincide at the working precision vanishes.
    /// Lines and Moves shift by `-distance` so that they land on the same
    /// side as offset curves. A curve that cannot be offset vanishes as
    /// well.
    pub fn offset(&self, seg: &Segment, distance: f64) -> Vec<Segment> {
        if seg.start().precision_eq(&seg.end(), self.precision()) {
            return Vec::new();
        }
        let mut ret = match seg {
            Segment::Move(l) => vec![Segment::Move(l.parallel(-distance))],
            Segment::Line(l) => vec![Segment::Line(l.parallel(-distance))],
            Segment::Curve(c) => match c.offset(distance) {
                Ok(curves) => curves.into_iter().map(Segment::Curve).collect(),
                Err(err) => {
                    debug!(%err, ?c, "dropping curve that cannot be offset");
                    // only read by the log line
                    let _ = &err;
                    Vec::new()
                }
            },
        };
        if ret.len() > 1 && ret[0].is_move() {
            ret[0] = Segment::move_to(Point::ORIGIN, ret[1].end());
        }
        ret
    }

    /// Join two disjoint segments into a continuous run.
    ///
    /// Segments that already touch are kept, with the second one starting
    /// exactly where the first ends. Lines and curves are extended or cut
    /// back to their intersection; when there is none, a connecting line is
    /// drawn between them.
    pub fn join(&self, s1: &Segment, s2: &Segment) -> Segments {
        if s1.end().precision_eq(&s2.start(), self.precision()) {
            return smallvec![*s1, s2.with_start(s1.end())];
        }
        match (s1, s2) {
            (Segment::Line(l1), Segment::Line(l2)) => self.join_lines(l1, l2),
            (Segment::Line(l), Segment::Curve(c)) => self.join_line_and_curve(l, c),
            (Segment::Curve(c), Segment::Line(l)) => self.join_curve_and_line(c, l),
            (Segment::Curve(c1), Segment::Curve(c2)) => self.join_curves(c1, c2),
            _ => connected(s1, s2),
        }
    }

    fn join_lines(&self, l1: &Line, l2: &Line) -> Segments {
        match line_intersection(l1, l2, self.precision()) {
            Ok(p) => smallvec![Segment::line(l1.p0, p), Segment::line(p, l2.p1)],
            Err(_) if l1.p1.precision_eq(&l2.p0, self.precision()) => {
                smallvec![Segment::line(l1.p0, l2.p1)]
            }
            Err(_) => smallvec![Segment::Line(*l1), Segment::Line(*l2)],
        }
    }

    fn join_line_and_curve(&self, l: &Line, c: &CubicBez) -> Segments {
        let Some(bp) = closest(tagged(c, c.intersect_projected_line(l)), l.p1) else {
            return connected(&Segment::Line(*l), &Segment::Curve(*c));
        };
        let pieces = self.split(&Segment::Curve(*c), bp);
        let tail = pieces.get(1).copied().unwrap_or(pieces[0]);
        smallvec![Segment::line(l.p0, untagged(bp)), tail]
    }

    fn join_curve_and_line(&self, c: &CubicBez, l: &Line) -> Segments {
        let Some(bp) = closest(tagged(c, c.intersect_projected_line(l)), c.p3) else {
            return connected(&Segment::Curve(*c), &Segment::Line(*l));
        };
        let pieces = self.split(&Segment::Curve(*c), bp);
        smallvec![pieces[0], Segment::line(untagged(bp), l.p1)]
    }

    fn join_curves(&self, c1: &CubicBez, c2: &CubicBez) -> Segments {
        let pairs = c1.intersect_curve(c2, self.options.curve_intersection_threshold);
        if let Some(&(t1, t2)) = pairs.first() {
            let head = self.split(&Segment::Curve(*c1), c1.eval(t1).with_t(t1));
            let tail = self.split(&Segment::Curve(*c2), c2.eval(t2).with_t(t2));
            return smallvec![head[0], tail[tail.len() - 1]];
        }
        let mid = c1.p3.midpoint(c2.p0);
        smallvec![
            Segment::Curve(*c1).with_end(mid),
            Segment::Curve(*c2).with_start(mid)
        ]
    }
}

/// `[s1, connector, s2]`, the connector running from the end of `s1` to the
/// start of `s2`.
fn connected(s1: &Segment, s2: &Segment) -> Segments {
    smallvec![*s1, Segment::line(s1.end(), s2.start()), *s2]
}

fn tagged(c: &CubicBez, ts: impl IntoIterator<Item = f64>) -> Vec<Point> {
    ts.into_iter().map(|t| c.eval(t).with_t(t)).collect()
}

fn untagged(p: Point) -> Point {
    Point::new(p.x, p.y)
}

/// The first of `points` closest to `to`.
fn closest(points: Vec<Point>, to: Point) -> Option<Point> {
    points
        .into_iter()
        .fold(None, |best: Option<(Point, f64)>, p| {
            let d = to.distance(p);
            match best {
                Some((_, bd)) if bd <= d => best,
                _ => Some((p, d)),
            }
        })
        .map(|(p, _)| p)
}

/// Is `p` inside `r` or on its boundary at `precision`?
pub(crate) fn in_box(r: &Rect, p: Point, precision: i32) -> bool {
    precision_cmp(p.x, r.x0, precision) != Ordering::Less
        && precision_cmp(p.x, r.x1, precision) != Ordering::Greater
        && precision_cmp(p.y, r.y0, precision) != Ordering::Less
        && precision_cmp(p.y, r.y1, precision) != Ordering::Greater
}
