// Copyright 2026 the Kerfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::options::DEFAULT_PRECISION;
use crate::path::fix_head_move;
use crate::{Path, PathTransform, Point, Result, Segment};

/// Repair the continuity of a path.
///
/// The result starts with a Move from the origin. A segment that does not
/// start where the previous one ended is snapped onto it when the two
/// points agree at `precision`, and is reached through a new Move
/// otherwise. Segments ending at a NaN point are dropped, and runs of Moves
/// are merged into one.
///
/// # Examples
///
/// ```
/// use kerfline::{Cleanup, Path, PathTransform, Segment};
///
/// let path = Path::from_segments_without_move([
///     Segment::line((0.0, 0.0), (1.0, 0.0)),
///     Segment::line((3.0, 0.0), (4.0, 0.0)),
/// ]);
/// let clean = Cleanup::default().transform(&path).unwrap();
/// assert_eq!(clean.svg(0), "M 0 0 L 1 0 M 3 0 L 4 0");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cleanup {
    /// Digits at which a gap is closed by snapping.
    pub precision: i32,
}

impl Cleanup {
    /// Cleanup at `precision` digits.
    #[inline]
    pub fn new(precision: i32) -> Self {
        Self { precision }
    }
}

impl Default for Cleanup {
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION)
    }
}

impl PathTransform for Cleanup {
    fn transform(&self, path: &Path) -> Result<Path> {
        let mut segs = Vec::with_capacity(path.len() + 1);
        let mut prev_end = Point::ORIGIN;
        for (i, mut seg) in path.iter().copied().enumerate() {
            if i == 0 {
                if !seg.is_move() {
                    segs.push(Segment::move_to(Point::ORIGIN, seg.start()));
                }
            } else if seg.start() != prev_end {
                if seg.start().precision_eq(&prev_end, self.precision) {
                    seg = seg.with_start(prev_end);
                } else {
                    segs.push(Segment::move_to(prev_end, seg.start()));
                }
            }
            if !seg.end().is_nan() {
                segs.push(seg);
                prev_end = seg.end();
            }
        }
        fix_head_move(&mut segs);
        Ok(Path::from_segments(merge_moves(segs)))
    }
}

/// Collapse every run of consecutive Moves into a single Move.
pub(super) fn merge_moves(segs: impl IntoIterator<Item = Segment>) -> Vec<Segment> {
    let mut out: Vec<Segment> = Vec::new();
    for seg in segs {
        match out.last_mut() {
            Some(prev) if prev.is_move() && seg.is_move() => {
                *prev = Segment::move_to(prev.start(), seg.end());
            }
            _ => out.push(seg),
        }
    }
    out
}
