// Copyright 2026 the Kerfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A cursor-based path builder.

use core::f64::consts::SQRT_2;

use crate::{CubicBez, Line, Path, Point, Result, Segment};

/// Fraction of the radius at which the control points of a quarter circle
/// approximation sit.
const QUARTER_CIRCLE_CTRL: f64 = 4.0 * (SQRT_2 - 1.0) / 3.0;

/// Builds a [`Path`] by drawing from a cursor.
///
/// Every drawing command starts at the current position, the end of the
/// last segment (or the origin). Relative `rel_*` commands take offsets from
/// the current position.
///
/// # Examples
///
/// ```
/// use kerfline::Draw;
///
/// let mut d = Draw::new();
/// d.move_to((1.0, 1.0));
/// d.rect(2.0, 3.0);
/// assert_eq!(
///     d.path().svg(0),
///     "M 1 1 L 3 1 L 3 4 L 1 4 L 1 1"
/// );
/// ```
#[derive(Clone, Debug, Default)]
pub struct Draw {
    path: Path,
}

impl Draw {
    /// Start drawing an empty path.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// The path drawn so far.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Finish drawing.
    #[inline]
    pub fn into_path(self) -> Path {
        self.path
    }

    /// The end of the last segment, or the origin.
    #[inline]
    pub fn current_position(&self) -> Point {
        self.path.cursor()
    }

    /// Append a segment so that it continues from the cursor.
    ///
    /// On an empty path, a drawing segment is preceded by a Move from the
    /// origin to its start. A segment that does not start exactly at the
    /// cursor has its start rebound to the cursor.
    pub fn add_segment(&mut self, seg: Segment) {
        if self.path.segments().is_empty() && !seg.is_move() {
            self.path.push(Segment::move_to(Point::ORIGIN, seg.start()));
        }
        let cur = self.current_position();
        let seg = if cur == seg.start() {
            seg
        } else {
            seg.with_start(cur)
        };
        self.path.push(seg);
    }

    /// Append every segment with [`Draw::add_segment`].
    pub fn add_segments(&mut self, segs: impl IntoIterator<Item = Segment>) {
        for seg in segs {
            self.add_segment(seg);
        }
    }

    /// Parse path data text and append its segments.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MalformedPathText`] when the text does not
    /// parse; nothing is appended in that case.
    pub fn svg_path(&mut self, text: &str) -> Result<()> {
        let parsed = Path::from_svg(text)?;
        self.add_segments(parsed);
        Ok(())
    }

    fn to_absolute(&self, delta: impl Into<Point>) -> Point {
        self.current_position() + delta.into()
    }

    /// Move the cursor to `p` without cutting.
    pub fn move_to(&mut self, p: impl Into<Point>) {
        let seg = Segment::move_to(self.current_position(), p);
        self.path.push(seg);
    }

    /// Move the cursor by `delta`.
    pub fn rel_move_to(&mut self, delta: impl Into<Point>) {
        let p = self.to_absolute(delta);
        self.move_to(p);
    }

    /// Draw a line to `p`.
    pub fn line_to(&mut self, p: impl Into<Point>) {
        let seg = Segment::line(self.current_position(), p);
        self.path.push(seg);
    }

    /// Draw a line by `delta`.
    pub fn rel_line_to(&mut self, delta: impl Into<Point>) {
        let p = self.to_absolute(delta);
        self.line_to(p);
    }

    /// Draw a horizontal line to the absolute `x`.
    pub fn h_line_to(&mut self, x: f64) {
        let y = self.current_position().y;
        self.line_to((x, y));
    }

    /// Draw a horizontal line of signed length `dx`.
    pub fn rel_h_line_to(&mut self, dx: f64) {
        self.rel_line_to((dx, 0.0));
    }

    /// Draw a vertical line to the absolute `y`.
    pub fn v_line_to(&mut self, y: f64) {
        let x = self.current_position().x;
        self.line_to((x, y));
    }

    /// Draw a vertical line of signed length `dy`.
    pub fn rel_v_line_to(&mut self, dy: f64) {
        self.rel_line_to((0.0, dy));
    }

    /// Draw a line of `length` at `degrees` from the positive x axis.
    pub fn line_by_angle(&mut self, length: f64, degrees: f64) {
        let line = Line::from_angle(self.current_position(), length, degrees);
        self.path.push(Segment::Line(line));
    }

    /// Draw a cubic Bézier curve to `p`.
    pub fn curve_to(&mut self, p1: impl Into<Point>, p2: impl Into<Point>, p: impl Into<Point>) {
        let c = CubicBez::new(self.current_position(), p1.into(), p2.into(), p.into());
        self.path.push(Segment::Curve(c));
    }

    /// Draw a cubic Bézier curve with every point relative to the cursor.
    pub fn rel_curve_to(
        &mut self,
        d1: impl Into<Point>,
        d2: impl Into<Point>,
        d: impl Into<Point>,
    ) {
        let p1 = self.to_absolute(d1);
        let p2 = self.to_absolute(d2);
        let p = self.to_absolute(d);
        self.curve_to(p1, p2, p);
    }

    /// Draw a cubic Bézier curve whose first control point mirrors the end
    /// control point of the previous curve about the cursor.
    ///
    /// When the previous segment is not a curve the first control point is
    /// the cursor itself.
    pub fn smooth_curve_to(&mut self, p2: impl Into<Point>, p: impl Into<Point>) {
        let cur = self.current_position();
        let p1 = match self.path.last() {
            Some(Segment::Curve(c)) => cur + (cur - c.p2),
            _ => cur,
        };
        self.curve_to(p1, p2, p);
    }

    /// Relative form of [`Draw::smooth_curve_to`].
    pub fn rel_smooth_curve_to(&mut self, d2: impl Into<Point>, d: impl Into<Point>) {
        let p2 = self.to_absolute(d2);
        let p = self.to_absolute(d);
        self.smooth_curve_to(p2, p);
    }

    /// Draw a quadratic Bézier curve, stored as the equivalent cubic.
    pub fn q_curve_to(&mut self, ctrl: impl Into<Point>, p: impl Into<Point>) {
        let ctrl = ctrl.into();
        let p = p.into();
        let cur = self.current_position();
        let p1 = cur + (ctrl - cur) * (2.0 / 3.0);
        let p2 = p + (ctrl - p) * (2.0 / 3.0);
        self.curve_to(p1, p2, p);
    }

    /// Relative form of [`Draw::q_curve_to`].
    pub fn rel_q_curve_to(&mut self, dctrl: impl Into<Point>, d: impl Into<Point>) {
        let ctrl = self.to_absolute(dctrl);
        let p = self.to_absolute(d);
        self.q_curve_to(ctrl, p);
    }

    /// Draw two lines meeting at `corner`, ending at `to`, with the corner
    /// rounded by a quarter circle approximation of `radius`.
    pub fn rounded_corner_to(
        &mut self,
        to: impl Into<Point>,
        corner: impl Into<Point>,
        radius: f64,
    ) {
        let to = to.into();
        let corner = corner.into();
        let start = self.current_position();

        let incoming = Line::new(start, corner);
        let l1_end = incoming.point_at_distance(incoming.length() - radius);
        let outgoing = Line::new(corner, to);
        let l2_start = outgoing.point_at_distance(radius);

        let ctrl_in = Line::new(l1_end, corner);
        let p1 = ctrl_in.point_at_distance(ctrl_in.length() * QUARTER_CIRCLE_CTRL);
        let ctrl_out = Line::new(l2_start, corner);
        let p2 = ctrl_out.point_at_distance(ctrl_out.length() * QUARTER_CIRCLE_CTRL);

        self.line_to(l1_end);
        self.curve_to(p1, p2, l2_start);
        self.line_to(to);
    }

    /// Relative form of [`Draw::rounded_corner_to`].
    pub fn rel_rounded_corner_to(
        &mut self,
        dto: impl Into<Point>,
        dcorner: impl Into<Point>,
        radius: f64,
    ) {
        let to = self.to_absolute(dto);
        let corner = self.to_absolute(dcorner);
        self.rounded_corner_to(to, corner, radius);
    }

    /// Draw a circle of radius `r` as four curves.
    ///
    /// The cursor is the top left of the circle's bounding box. The first
    /// curve starts at `(r, 0)` from the cursor.
    pub fn circle(&mut self, r: f64) {
        let c = QUARTER_CIRCLE_CTRL * r;
        self.rel_move_to((r, 0.0));
        self.rel_curve_to((c, 0.0), (r, r - c), (r, r));
        self.rel_curve_to((0.0, c), (-r + c, r), (-r, r));
        self.rel_curve_to((-c, 0.0), (-r, -r + c), (-r, -r));
        self.rel_curve_to((0.0, -c), (r - c, -r), (r, -r));
    }

    /// Draw a `width` by `height` rectangle, ending where it started.
    pub fn rect(&mut self, width: f64, height: f64) {
        self.rel_line_to((width, 0.0));
        self.rel_line_to((0.0, height));
        self.rel_line_to((-width, 0.0));
        self.rel_line_to((0.0, -height));
    }
}

impl From<Draw> for Path {
    fn from(d: Draw) -> Self {
        d.into_path()
    }
}
