// Copyright 2026 the Kerfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::common::precision_eq;
use crate::options::DEFAULT_PRECISION;
use crate::path::{start_and_end, trim_tail_moves};
use crate::transform::reversed;
use crate::{Dedup, Path, PathTransform, Point, Result, Segment};

/// Chain the sub-paths of a path end to end.
///
/// Starting from the first sub-path, the sub-path whose start or end lies
/// on the current end point is appended next, reversed when it is its end
/// that matches. When no sub-path touches the current end, the next one in
/// the original order is taken. The result is finished with [`Dedup`].
///
/// # Examples
///
/// ```
/// use kerfline::{Path, PathTransform, Reorder};
///
/// let path = Path::from_svg("M 0 0 L 5 0 M 0 5 L 5 5 M 5 0 L 5 5").unwrap();
/// let out = Reorder::new(3).transform(&path).unwrap();
/// assert_eq!(out.svg(0), "M 0 0 L 5 0 L 5 5 L 0 5 M 0 0");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reorder {
    /// Digits at which two end points touch.
    pub precision: i32,
}

impl Reorder {
    /// Reorder at `precision` digits.
    #[inline]
    pub fn new(precision: i32) -> Self {
        Self { precision }
    }

    /// Take the sub-path that continues best from `end` out of `candidates`.
    fn take_next(self, end: Point, candidates: &mut Vec<Path>) -> Path {
        let distances: Vec<(f64, f64)> = candidates
            .iter()
            .map(|c| {
                let (s, e) = start_and_end(c).unwrap_or((Point::ORIGIN, Point::ORIGIN));
                (end.distance(s), end.distance(e))
            })
            .collect();
        let s_idx = first_min(distances.iter().map(|d| d.0));
        let e_idx = first_min(distances.iter().map(|d| d.1));
        let (mut i, mut distance, mut reverse) = (s_idx, distances[s_idx].0, false);
        if distances[e_idx].1 < distance {
            (i, distance, reverse) = (e_idx, distances[e_idx].1, true);
        }
        if !precision_eq(distance, 0.0, self.precision) {
            (i, reverse) = (0, false);
        }
        let next = candidates.remove(i);
        if reverse {
            reversed(&next)
        } else {
            next
        }
    }
}

impl Default for Reorder {
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION)
    }
}

impl PathTransform for Reorder {
    fn transform(&self, path: &Path) -> Result<Path> {
        let mut candidates = path.split_on_move();
        if candidates.len() <= 1 {
            return Ok(path.clone());
        }
        let mut rest = candidates.split_off(1);
        let mut chained: Vec<Segment> = candidates.remove(0).into_segments();
        while !rest.is_empty() {
            let end = trim_tail_moves(&chained).last().map_or(Point::ORIGIN, Segment::end);
            let next = self.take_next(end, &mut rest);
            chained = Path::from_segments(chained.into_iter().chain(next)).into_segments();
        }
        Dedup::new(self.precision).transform(&Path::from_segments(chained))
    }
}

/// Index of the first smallest value.
fn first_min(values: impl Iterator<Item = f64>) -> usize {
    let mut best = (0, f64::INFINITY);
    for (i, v) in values.enumerate() {
        if i == 0 || v < best.1 {
            best = (i, v);
        }
    }
    best.0
}

#[cfg(test)]
mod tests {
    use super::{first_min, Reorder};
    use crate::{Path, PathTransform};

    #[test]
    fn square_edges_chain_up() {
        let p = Path::from_svg("M 0 0 L 5 0 M 5 0 L 5 5 M 0 5 L 5 5 M 0 0 L 0 5").unwrap();
        let out = Reorder::new(3).transform(&p).unwrap();
        assert_eq!(
            out.svg(3),
            "M 0.000 0.000 L 5.000 0.000 L 5.000 5.000 L 0.000 5.000 L 0.000 0.000"
        );
    }

    #[test]
    fn far_sub_paths_keep_their_order() {
        let p = Path::from_svg("M 0 0 L 1 0 M 10 10 L 11 10 M 20 0 L 21 0").unwrap();
        let out = Reorder::default().transform(&p).unwrap();
        assert_eq!(out.svg(0), "M 0 0 L 1 0 M 10 10 L 11 10 M 20 0 L 21 0");
    }

    #[test]
    fn offset_finger_joint_edges() {
        let p = Path::from_svg(
            "M 0.000 -0.050 L 0.250 -0.050 M 0.300 0.000 L 0.300 0.500 M 0.250 0.450 L 1.000 0.450 \
             M 0.950 0.500 L 0.950 0.000 M 1.000 -0.050 L 1.250 -0.050 M 1.250 -0.050 L 1.500 -0.050 \
             M 1.550 0.000 L 1.550 0.500 M 1.500 0.450 L 2.250 0.450 M 2.200 0.500 L 2.200 0.000 \
             M 2.250 -0.050 L 2.500 -0.050 M 2.500 -0.050 L 2.750 -0.050 M 2.800 0.000 L 2.800 0.500 \
             M 2.750 0.450 L 3.500 0.450 M 3.450 0.500 L 3.450 0.000 M 3.500 -0.050 L 3.750 -0.050 \
             M 3.750 -0.050 L 4.000 -0.050 M 4.050 0.000 L 4.050 0.500 M 4.000 0.450 L 4.750 0.450 \
             M 4.700 0.500 L 4.700 0.000 M 4.750 -0.050 L 5.000 -0.050 M 5.050 0.000 L 5.050 5.000 \
             M 5.000 5.050 L 0.000 5.050 M -0.050 5.000 L -0.050 0.000",
        )
        .unwrap();
        let out = Reorder::new(3).transform(&p).unwrap();
        assert_eq!(
            out.svg(3),
            "M 0.000 -0.050 L 0.250 -0.050 M 0.300 0.000 L 0.300 0.500 M 0.250 0.450 L 1.000 0.450 \
             M 0.950 0.500 L 0.950 0.000 M 1.000 -0.050 L 1.250 -0.050 L 1.500 -0.050 \
             M 1.550 0.000 L 1.550 0.500 M 1.500 0.450 L 2.250 0.450 M 2.200 0.500 L 2.200 0.000 \
             M 2.250 -0.050 L 2.500 -0.050 L 2.750 -0.050 M 2.800 0.000 L 2.800 0.500 \
             M 2.750 0.450 L 3.500 0.450 M 3.450 0.500 L 3.450 0.000 M 3.500 -0.050 L 3.750 -0.050 \
             L 4.000 -0.050 M 4.050 0.000 L 4.050 0.500 M 4.000 0.450 L 4.750 0.450 \
             M 4.700 0.500 L 4.700 0.000 M 4.750 -0.050 L 5.000 -0.050 M 5.050 0.000 L 5.050 5.000 \
             M 5.000 5.050 L 0.000 5.050 M -0.050 5.000 L -0.050 0.000"
        );
    }

    #[test]
    fn single_sub_path_is_unchanged() {
        let p = Path::from_svg("M 3 3 L 1 0").unwrap();
        assert_eq!(Reorder::default().transform(&p).unwrap(), p);
    }

    #[test]
    fn first_min_prefers_earliest() {
        assert_eq!(first_min([3.0, 1.0, 1.0, 2.0].into_iter()), 1);
        assert_eq!(first_min([f64::NAN, 1.0].into_iter()), 0);
    }
}
