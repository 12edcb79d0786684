// Copyright 2026 the Kerfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path-level geometric queries.

use crate::path::trim_moves;
use crate::{Line, Path, Point, Rect, Segment, SegmentOps};

impl Path {
    /// The bounding box of the path.
    ///
    /// The first segment always contributes, even when it is a Move; later
    /// Moves are ignored. A path with no segments has an all-zero box.
    pub fn bounding_box(&self) -> Rect {
        let Some((first, rest)) = self.split_first() else {
            return Rect::default();
        };
        rest.iter()
            .filter(|s| !s.is_move())
            .fold(first.bounding_box(), |r, s| r.union(s.bounding_box()))
    }

    /// The bounding box including leading and trailing whitespace.
    ///
    /// The top left reaches back to the origin and to the start of the first
    /// segment, the bottom right out to the end of the last segment.
    pub fn bounding_box_with_whitespace(&self) -> Rect {
        let (Some(first), Some(last)) = (self.first(), self.last()) else {
            return Rect::default();
        };
        let bbox = self.bounding_box();
        let tl = bbox.top_left();
        let start = first.start();
        let br = bbox.bottom_right();
        let end = last.end();
        Rect::new(
            tl.x.min(start.x).min(0.0),
            tl.y.min(start.y).min(0.0),
            br.x.max(end.x),
            br.y.max(end.y),
        )
    }

    /// The bounding box of the path without its leading and trailing Moves.
    pub fn bounding_box_trim_whitespace(&self) -> Rect {
        Self::from_segments_without_move(trim_moves(self).iter().copied()).bounding_box()
    }
}

impl SegmentOps {
    /// Cut `seg` wherever `knife` crosses it.
    ///
    /// The segment is split at the first crossing and each piece is cut
    /// again, until no piece can be split any further.
    ///
    /// # Examples
    ///
    /// ```
    /// use kerfline::{Segment, SegmentOps};
    ///
    /// let ops = SegmentOps::default();
    /// let seg = Segment::line((0.0, 0.0), (10.0, 0.0));
    /// let knife = Segment::line((4.0, -1.0), (4.0, 1.0));
    /// let pieces = ops.knife_cut(&seg, &knife);
    /// assert_eq!(pieces.len(), 2);
    /// assert_eq!(pieces[0].end().x, 4.0);
    /// ```
    pub fn knife_cut(&self, seg: &Segment, knife: &Segment) -> Vec<Segment> {
        let mut out = Vec::new();
        self.knife_cut_into(seg, knife, &mut out);
        out
    }

    fn knife_cut_into(&self, seg: &Segment, knife: &Segment, out: &mut Vec<Segment>) {
        let Some(&at) = self.intersect(knife, seg).first() else {
            out.push(*seg);
            return;
        };
        let pieces = self.split(seg, at);
        if pieces.len() == 1 {
            out.push(*seg);
            return;
        }
        for piece in &pieces {
            self.knife_cut_into(piece, knife, out);
        }
    }

    /// Where the path crosses the horizontal line at `y`, ordered by x.
    ///
    /// The line spans the whitespace-inclusive bounding box of the path.
    /// Points with equal x keep their path order.
    pub fn horizontal_intercepts(&self, path: &Path, y: f64) -> Vec<Point> {
        let bbox = path.bounding_box_with_whitespace();
        let line = Segment::Line(Line::new((bbox.x0, y), (bbox.x1, y)));
        let mut points: Vec<Point> = path
            .iter()
            .flat_map(|seg| self.intersect(&line, seg))
            .collect();
        points.sort_by(|a, b| a.x.total_cmp(&b.x));
        points
    }
}
