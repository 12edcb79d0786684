// Copyright 2026 the Kerfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paths: ordered sequences of segments.

use core::fmt;
use core::ops::Deref;

use crate::{Draw, Point, Segment};

/// Decimal places used when a path is displayed without an explicit
/// precision.
pub const DEFAULT_SVG_PRECISION: usize = 3;

/// An ordered sequence of [`Segment`]s.
///
/// A path is a series of disjoint sub-paths, each beginning with a
/// [`Segment::Move`]. Paths built with [`Path::from_segments`] always start
/// with a Move whose start is the origin; paths built segment by segment
/// (with [`Path::push`] or through a [`Draw`]) keep exactly what was added.
///
/// The path dereferences to its segment slice.
///
/// # Examples
///
/// ```
/// use kerfline::{Path, Segment};
///
/// let path = Path::from_segments([Segment::line((1.0, 1.0), (4.0, 5.0))]);
/// assert_eq!(path.len(), 2);
/// assert_eq!(path.svg(1), "M 1.0 1.0 L 4.0 5.0");
/// ```
#[derive(Clone, Default, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path(Vec<Segment>);

impl Path {
    /// Create a new, empty path.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a path, inserting a head Move from the origin when the first
    /// segment is not a Move.
    ///
    /// The start of the head Move is always the origin.
    pub fn from_segments(segments: impl IntoIterator<Item = Segment>) -> Self {
        let mut iter = segments.into_iter().peekable();
        let mut segs = Vec::with_capacity(iter.size_hint().0 + 1);
        if let Some(first) = iter.peek() {
            if !first.is_move() {
                segs.push(Segment::move_to(Point::ORIGIN, first.start()));
            }
        }
        segs.extend(iter);
        fix_head_move(&mut segs);
        Self(segs)
    }

    /// Build a path without inserting a head Move.
    ///
    /// A head Move, if present, still has its start forced to the origin.
    pub fn from_segments_without_move(segments: impl IntoIterator<Item = Segment>) -> Self {
        let mut segs: Vec<Segment> = segments.into_iter().collect();
        fix_head_move(&mut segs);
        Self(segs)
    }

    /// The segments of the path.
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// Take the segments out of the path.
    #[inline]
    pub fn into_segments(self) -> Vec<Segment> {
        self.0
    }

    /// Append a segment as is.
    #[inline]
    pub fn push(&mut self, seg: Segment) {
        self.0.push(seg);
    }

    /// Where the next segment would start: the end of the last segment, or
    /// the origin for a path with no segments.
    #[inline]
    pub fn cursor(&self) -> Point {
        self.0.last().map_or(Point::ORIGIN, Segment::end)
    }

    /// Does the path lack any drawing segment?
    ///
    /// A path holding only Moves is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Segment::is_move)
    }

    /// Split the path into its sub-paths.
    ///
    /// Every sub-path starts with its Move, rebound to start at the origin.
    /// Fragments that contain nothing but Moves are dropped.
    pub fn split_on_move(&self) -> Vec<Self> {
        let mut paths = Vec::new();
        let mut draw = Draw::new();
        for (i, seg) in self.0.iter().enumerate() {
            if i > 0 && seg.is_move() {
                let done = core::mem::take(&mut draw).into_path();
                if !done.is_empty() {
                    paths.push(done);
                }
            }
            draw.add_segment(*seg);
        }
        let last = draw.into_path();
        if !last.is_empty() {
            paths.push(last);
        }
        paths
    }

    /// Write the path data text with `precision` decimal places.
    ///
    /// # Errors
    ///
    /// Returns any error of the underlying writer.
    pub fn write_svg(&self, w: &mut impl fmt::Write, precision: usize) -> fmt::Result {
        for (i, seg) in self.0.iter().enumerate() {
            if i > 0 {
                w.write_char(' ')?;
            }
            seg.write_svg(w, precision)?;
        }
        Ok(())
    }

    /// The path data text with `precision` decimal places.
    pub fn svg(&self, precision: usize) -> String {
        let mut s = String::new();
        // writing to a String cannot fail
        let _ = self.write_svg(&mut s, precision);
        s
    }
}

impl Deref for Path {
    type Target = [Segment];

    #[inline]
    fn deref(&self) -> &[Segment] {
        &self.0
    }
}

impl FromIterator<Segment> for Path {
    fn from_iter<T: IntoIterator<Item = Segment>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Segment> for Path {
    fn extend<I: IntoIterator<Item = Segment>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Segment;
    type IntoIter = core::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Path {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Formats as path data text. The precision of the formatter selects the
/// number of decimal places, three by default.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_svg(f, f.precision().unwrap_or(DEFAULT_SVG_PRECISION))
    }
}

/// Strip leading and trailing Moves.
pub fn trim_moves(segs: &[Segment]) -> &[Segment] {
    let start = segs.iter().position(|s| !s.is_move()).unwrap_or(segs.len());
    trim_tail_moves(&segs[start..])
}

/// Strip trailing Moves.
pub fn trim_tail_moves(segs: &[Segment]) -> &[Segment] {
    let end = segs.iter().rposition(|s| !s.is_move()).map_or(0, |i| i + 1);
    &segs[..end]
}

/// Force the start of a head Move to the origin.
pub fn fix_head_move(segs: &mut [Segment]) {
    if let Some(first @ Segment::Move(_)) = segs.first_mut() {
        *first = first.with_start(Point::ORIGIN);
    }
}

/// The start and end of a segment list.
///
/// The start is the END of the first segment, so a list that opens with a
/// Move starts where that Move lands.
pub fn start_and_end(segs: &[Segment]) -> Option<(Point, Point)> {
    Some((segs.first()?.end(), segs.last()?.end()))
}

#[cfg(test)]
mod tests {
    use super::{start_and_end, trim_moves, trim_tail_moves, Path};
    use crate::{Point, Segment};

    fn mv(x: f64, y: f64, x1: f64, y1: f64) -> Segment {
        Segment::move_to((x, y), (x1, y1))
    }

    fn ln(x: f64, y: f64, x1: f64, y1: f64) -> Segment {
        Segment::line((x, y), (x1, y1))
    }

    #[test]
    fn head_move_is_inserted_and_fixed() {
        let p = Path::from_segments([ln(2.0, 3.0, 4.0, 5.0)]);
        assert_eq!(p[0], mv(0.0, 0.0, 2.0, 3.0));
        assert_eq!(p.len(), 2);

        let p = Path::from_segments([mv(9.0, 3.0, 1.0, 1.0), ln(1.0, 1.0, 4.0, 5.0)]);
        assert_eq!(p[0], mv(0.0, 0.0, 1.0, 1.0));

        let p = Path::from_segments_without_move([ln(2.0, 3.0, 4.0, 5.0)]);
        assert_eq!(p.len(), 1);
        assert!(Path::from_segments([]).segments().is_empty());
    }

    #[test]
    fn trimming_moves() {
        let segs = [
            mv(0.0, 0.0, 1.0, 1.0),
            ln(1.0, 1.0, 2.0, 2.0),
            mv(2.0, 2.0, 3.0, 3.0),
            ln(3.0, 3.0, 4.0, 4.0),
            mv(4.0, 4.0, 5.0, 5.0),
            mv(5.0, 5.0, 6.0, 6.0),
        ];
        assert_eq!(trim_moves(&segs), &segs[1..4]);
        assert_eq!(trim_tail_moves(&segs), &segs[..4]);
        assert!(trim_moves(&segs[4..]).is_empty());
        assert_eq!(
            start_and_end(&segs[..4]),
            Some((Point::new(1.0, 1.0), Point::new(4.0, 4.0)))
        );
        assert_eq!(start_and_end(&[]), None);
    }

    #[test]
    fn cursor_and_emptiness() {
        let mut p = Path::new();
        assert_eq!(p.cursor(), Point::ORIGIN);
        assert!(p.is_empty());
        p.push(mv(0.0, 0.0, 3.0, 4.0));
        assert!(p.is_empty());
        assert_eq!(p.cursor(), Point::new(3.0, 4.0));
        p.push(ln(3.0, 4.0, 5.0, 6.0));
        assert!(!p.is_empty());
        assert_eq!(p.cursor(), Point::new(5.0, 6.0));
    }

    #[test]
    fn split_on_move_drops_move_only_fragments() {
        let p: Path = [
            mv(0.0, 0.0, 1.0, 1.0),
            ln(1.0, 1.0, 2.0, 2.0),
            mv(2.0, 2.0, 3.0, 3.0),
            mv(3.0, 3.0, 5.0, 5.0),
            ln(5.0, 5.0, 6.0, 6.0),
            mv(6.0, 6.0, 7.0, 7.0),
        ]
        .into_iter()
        .collect();
        let subs = p.split_on_move();
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].svg(0), "M 1 1 L 2 2");
        assert_eq!(subs[1].svg(0), "M 5 5 L 6 6");
        // each sub-path is rebased at the origin
        assert_eq!(subs[1][0].start(), Point::ORIGIN);
    }

    #[test]
    fn display_uses_formatter_precision() {
        let p = Path::from_segments([Segment::curve(
            (0.0, 0.0),
            (1.0, 2.0),
            (3.0, 4.0),
            (5.0, 6.0),
        )]);
        assert_eq!(
            p.to_string(),
            "M 0.000 0.000 C 1.000 2.000 3.000 4.000 5.000 6.000"
        );
        assert_eq!(format!("{p:.1}"), "M 0.0 0.0 C 1.0 2.0 3.0 4.0 5.0 6.0");
    }
}
