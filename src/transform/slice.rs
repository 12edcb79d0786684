// Copyright 2026 the Kerfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::cmp::Ordering;

use crate::common::precision_cmp;
use crate::{Cleanup, Line, Path, PathTransform, Result, Segment, SegmentOps};

/// Cut a path along a horizontal line and keep the part above it.
///
/// Above means towards smaller y: the segments kept are those with every
/// point at or above `y`. Segments crossing the line are cut at it first.
/// Segments lying on the line are dropped.
///
/// # Examples
///
/// ```
/// use kerfline::{Path, PathTransform, SegmentOps, Slice};
///
/// let path = Path::from_svg("M 0 0 L 0 10 L 10 10 L 10 0").unwrap();
/// let top = Slice::new(SegmentOps::default(), 4.0).transform(&path).unwrap();
/// assert_eq!(top.svg(0), "M 0 0 L 0 4 M 10 4 L 10 0");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Slice {
    /// Operators used to cut segments.
    pub ops: SegmentOps,
    /// Height of the cut line.
    pub y: f64,
}

/// Which side of the cut line a segment lies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Above,
    Below,
}

impl Slice {
    /// Cut at height `y`.
    #[inline]
    pub fn new(ops: SegmentOps, y: f64) -> Self {
        Self { ops, y }
    }

    fn side(&self, seg: &Segment) -> Side {
        let n = self.ops.precision();
        let ys: &[f64] = &match seg {
            Segment::Curve(c) => c.points().map(|p| p.y),
            _ => {
                let (s, e) = (seg.start().y, seg.end().y);
                [s, e, s, e]
            }
        };
        let cmp = |y: f64| precision_cmp(y, self.y, n);
        if ys.iter().all(|&y| cmp(y) != Ordering::Less) {
            // on or below the line
            Side::Below
        } else if ys.iter().all(|&y| cmp(y) != Ordering::Greater) {
            Side::Above
        } else if cmp(seg.bounding_box().y0) != Ordering::Less {
            Side::Below
        } else {
            Side::Above
        }
    }
}

impl PathTransform for Slice {
    fn transform(&self, path: &Path) -> Result<Path> {
        let bbox = path.bounding_box_with_whitespace();
        let knife = Segment::Line(Line::new((bbox.x0, self.y), (bbox.x1, self.y)));
        let kept: Vec<Segment> = path
            .iter()
            .flat_map(|seg| self.ops.knife_cut(seg, &knife))
            .filter(|seg| self.side(seg) == Side::Above)
            .collect();
        Cleanup::new(self.ops.precision()).transform(&Path::from_segments_without_move(kept))
    }
}
