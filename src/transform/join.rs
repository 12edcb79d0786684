// Copyright 2026 the Kerfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::path::trim_moves;
use crate::transform::reversed;
use crate::{Dedup, Path, PathTransform, Reorder, Result, Segment, SegmentOps};

/// Join the disjoint pieces of a path into one continuous run.
///
/// The path is first deduplicated and reordered. Pieces are then merged one
/// by one: whichever ends of the two pieces lie closest together are
/// brought face to face (reversing pieces as needed) and the abutting
/// segments are joined with [`SegmentOps::join`].
///
/// With `close` set, the last segment is finally joined back to the first.
/// The closed outline may then start at a different vertex than the input.
///
/// # Examples
///
/// ```
/// use kerfline::{Join, Path, PathTransform, SegmentOps};
///
/// let path = Path::from_svg("M5,5 L50,5 M75,30 L75, 80").unwrap();
/// let joined = Join::new(SegmentOps::default()).transform(&path).unwrap();
/// assert_eq!(joined.svg(0), "M 5 5 L 75 5 L 75 80");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Join {
    /// Operators used to join segments.
    pub ops: SegmentOps,
    /// Join the end of the result back to its start.
    pub close: bool,
}

impl Join {
    /// An open join.
    #[inline]
    pub fn new(ops: SegmentOps) -> Self {
        Self { ops, close: false }
    }

    /// A join that also closes the result.
    #[inline]
    pub fn closed(ops: SegmentOps) -> Self {
        Self { ops, close: true }
    }

    /// Merge `p2` into `p1`, segment by segment.
    fn join_pieces(&self, mut p1: Vec<Segment>, mut p2: Vec<Segment>) -> Vec<Segment> {
        let n = self.ops.precision();
        loop {
            p1 = trim_moves(&p1).to_vec();
            p2 = trim_moves(&p2).to_vec();
            let (Some(&p2_first), Some(&p2_last)) = (p2.first(), p2.last()) else {
                return p1;
            };
            let (Some(&p1_first), Some(&p1_last)) = (p1.first(), p1.last()) else {
                p1.push(p2.remove(0));
                continue;
            };
            let (p1s, p1e) = (p1_first.start(), p1_last.end());
            let (p2s, p2e) = (p2_first.start(), p2_last.end());
            let ss = p1s.distance(p2s);
            let se = p1s.distance(p2e);
            let es = p1e.distance(p2s);
            let ee = p1e.distance(p2e);
            let min = [se, es, ee].into_iter().fold(ss, |m, d| if d < m { d } else { m });
            if min != es {
                if min == ee {
                    p2 = reversed(&p2).into_segments();
                    continue;
                }
                if min == ss {
                    p1 = reversed(&p1).into_segments();
                    continue;
                }
                if min == se {
                    p1 = reversed(&p1).into_segments();
                    p2 = reversed(&p2).into_segments();
                    continue;
                }
            }
            p1.pop();
            p2.remove(0);
            if p1e.precision_eq(&p2s, n) {
                p1.extend([p1_last, p2_first.with_start(p1e)]);
            } else {
                p1.extend(self.ops.join(&p1_last, &p2_first));
            }
        }
    }
}

impl PathTransform for Join {
    fn transform(&self, path: &Path) -> Result<Path> {
        let precision = self.ops.precision();
        let p = Dedup::new(precision).transform(path)?;
        let p = Reorder::new(precision).transform(&p)?;
        let mut segs = self.join_pieces(Vec::new(), p.into_segments());
        if self.close && segs.len() >= 2 {
            let last = segs.len() - 1;
            let closed = self.ops.join(&segs[last], &segs[0]);
            if let Some((&first, head)) = closed.split_last() {
                if !head.is_empty() {
                    segs[0] = first;
                    segs.truncate(last);
                    segs.extend_from_slice(head);
                }
            }
        }
        Ok(Path::from_segments(segs))
    }
}

#[cfg(test)]
mod tests {
    use super::Join;
    use crate::path::trim_moves;
    use crate::{Path, PathTransform, SegmentOps};

    fn join(text: &str, close: bool) -> String {
        let p = Path::from_svg(text).unwrap();
        let join = Join {
            ops: SegmentOps::default(),
            close,
        };
        join.transform(&p).unwrap().svg(3)
    }

    #[test]
    fn square_from_loose_edges() {
        assert_eq!(
            join("M 0 0 L 5 0 M 5 0 L 5 5 M 0 5 L 5 5 M 0 0 L 0 5", false),
            "M 0.000 0.000 L 5.000 0.000 L 5.000 5.000 L 0.000 5.000 L 0.000 0.000"
        );
    }

    #[test]
    fn crossing_lines_are_trimmed() {
        assert_eq!(
            join("M 5 3 L 2 3 M 3 1 L 3 4", false),
            "M 5.000 3.000 L 3.000 3.000 L 3.000 1.000"
        );
    }

    #[test]
    fn lines_are_extended_to_meet() {
        assert_eq!(
            join("M5,5 L50,5 M75,30 L75, 80", false),
            "M 5.000 5.000 L 75.000 5.000 L 75.000 80.000"
        );
        assert_eq!(
            join("M.5,0 L3.5, 0 M0,0, L0,4", false),
            "M 3.500 0.000 L 0.000 0.000 L 0.000 4.000"
        );
    }

    #[test]
    fn closing_a_square() {
        assert_eq!(
            join("M10,0 L50,0 M60,10 L60,50 M50,60 L10,60 M0,50 L0,10", true),
            "M 0.000 0.000 L 60.000 0.000 L 60.000 60.000 L 0.000 60.000 L 0.000 0.000"
        );
    }

    #[test]
    fn finger_joint_with_stray_moves() {
        assert_eq!(
            join(
                "M 0.820 -0.450 M 0.820 0.000 L 1.170 0.000 L 4.180 0.000 \
                 M 4.180 -0.450 M 4.180 -0.450 M 0.000 0.000 L 0.000 5.000",
                false
            ),
            "M 4.180 0.000 L 1.170 0.000 L 0.000 0.000 L 0.000 5.000"
        );
    }

    #[test]
    fn finger_joint_with_double_move() {
        assert_eq!(
            join(
                "M 4.180 0.000  L 1.170 0.000 L 0.000 0.000 L 0.000 5.000 \
                 M 0.000 5.000 M 5.000 0.000 L 5.000 5.000",
                false
            ),
            "M 0.000 5.000 L 0.000 0.000 L 1.170 0.000 L 5.000 0.000 L 5.000 5.000"
        );
    }

    #[test]
    fn finger_joint_between_sides() {
        assert_eq!(
            join(
                "M 0.820 0.000 L 1.170 0.000 L 1.170 -0.450 L 2.150 -0.450 L 2.150 0.000 \
                 L 2.500 0.000 L 2.850 0.000 L 2.850 -0.450 L 3.830 -0.450 L 3.830 0.000 \
                 L 4.180 0.000 M 0.000 0.000 L 0.000 5.000 M 5.000 0.000 L 5.000 5.000",
                false
            ),
            "M 0.000 5.000 L 0.000 0.000 L 1.170 0.000 L 1.170 -0.450 L 2.150 -0.450 \
             L 2.150 0.000 L 2.500 0.000 L 2.850 0.000 L 2.850 -0.450 L 3.830 -0.450 \
             L 3.830 0.000 L 5.000 0.000 L 5.000 5.000"
        );
    }

    #[test]
    fn line_meets_curve() {
        assert_eq!(
            join(
                "M 0.000 0.066 C 2.673 0.994 2.854 0.953 3.055 1.084 M 2.800 1.066 L 2.800 1.366",
                false
            ),
            "M 0.000 0.066 C 1.846 0.707 2.504 0.886 2.800 0.978 L 2.800 1.366"
        );
    }

    #[test]
    fn closed_outline_of_curves_and_lines() {
        assert_eq!(
            join(
                "M 0.000 0.011 C 0.004 0.011 0.626 -0.092 0.905 0.333 \
                 C 1.179 0.751 1.084 0.900 1.252 1.126 C 1.437 1.375 1.789 1.230 1.522 0.706 \
                 C 1.256 0.183 1.822 0.074 1.822 0.074 C 1.822 0.074 1.766 0.895 2.303 0.839 \
                 C 2.562 0.812 3.364 0.812 3.559 1.021 C 3.559 1.021 3.025 1.002 3.101 1.741 \
                 C 3.131 2.031 3.505 2.412 3.902 2.240 C 4.393 2.028 4.707 1.990 5.027 2.245 \
                 M 4.500 2.011 L 4.500 3.011 M 4.500 2.761 L 4.000 2.761 L 3.850 2.761 \
                 L 3.850 3.011 L 3.450 3.011 L 3.450 2.761 L 3.300 2.761 L 3.150 2.761 \
                 L 3.150 3.011 L 2.750 3.011 L 2.750 2.761 L 2.600 2.761 L 2.450 2.761 \
                 L 2.450 3.011 L 2.050 3.011 L 2.050 2.761 L 1.900 2.761 L 1.750 2.761 \
                 L 1.750 3.011 L 1.350 3.011 L 1.350 2.761 L 1.200 2.761 L 1.050 2.761 \
                 L 1.050 3.011 L 0.650 3.011 L 0.650 2.761 L 0.500 2.761 L 0.000 2.761 \
                 M 0.250 3.011 L 0.250 2.561 L 0.250 2.411 L 0.000 2.411 L 0.000 2.011 \
                 L 0.250 2.011 L 0.250 1.861 L 0.250 1.711 L 0.000 1.711 L 0.000 1.311 \
                 L 0.250 1.311 L 0.250 1.161 L 0.250 1.011 L 0.000 1.011 L 0.000 0.611 \
                 L 0.250 0.611 L 0.250 0.461 L 0.250 0.011 \
                 M 0.750 2.261 C 0.750 2.261 0.750 2.261 0.750 2.261 \
                 C 0.750 2.261 0.750 2.261 0.750 2.261 C 0.750 2.261 0.750 2.261 0.750 2.261 \
                 C 0.750 2.261 0.750 2.261 0.750 2.261 \
                 M 3.750 2.261 C 3.750 2.261 3.750 2.261 3.750 2.261 \
                 C 3.750 2.261 3.750 2.261 3.750 2.261 C 3.750 2.261 3.750 2.261 3.750 2.261 \
                 C 3.750 2.261 3.750 2.261 3.750 2.261",
                true
            ),
            "M 4.500 2.069 C 4.327 2.078 4.135 2.140 3.902 2.240 \
             C 3.505 2.412 3.131 2.031 3.101 1.741 C 3.025 1.002 3.559 1.021 3.559 1.021 \
             C 3.364 0.812 2.562 0.812 2.303 0.839 C 1.766 0.895 1.822 0.074 1.822 0.074 \
             C 1.822 0.074 1.256 0.183 1.522 0.706 C 1.789 1.230 1.437 1.375 1.252 1.126 \
             C 1.084 0.900 1.179 0.751 0.905 0.333 C 0.740 0.082 0.456 0.015 0.250 0.003 \
             L 0.250 0.461 L 0.250 0.611 L 0.000 0.611 L 0.000 1.011 L 0.250 1.011 \
             L 0.250 1.161 L 0.250 1.311 L 0.000 1.311 L 0.000 1.711 L 0.250 1.711 \
             L 0.250 1.861 L 0.250 2.011 L 0.000 2.011 L 0.000 2.411 L 0.250 2.411 \
             L 0.250 2.561 L 0.250 2.761 L 0.500 2.761 L 0.650 2.761 L 0.650 3.011 \
             L 1.050 3.011 L 1.050 2.761 L 1.200 2.761 L 1.350 2.761 L 1.350 3.011 \
             L 1.750 3.011 L 1.750 2.761 L 1.900 2.761 L 2.050 2.761 L 2.050 3.011 \
             L 2.450 3.011 L 2.450 2.761 L 2.600 2.761 L 2.750 2.761 L 2.750 3.011 \
             L 3.150 3.011 L 3.150 2.761 L 3.300 2.761 L 3.450 2.761 L 3.450 3.011 \
             L 3.850 3.011 L 3.850 2.761 L 4.000 2.761 L 4.500 2.761 L 4.500 2.069"
        );
    }

    /// The corners of a closed outline, starting from its first vertex.
    fn corners(path: &Path) -> Vec<String> {
        trim_moves(path)
            .iter()
            .map(|s| {
                let p = s.start();
                format!("{:.3} {:.3}", p.x, p.y)
            })
            .collect()
    }

    #[test]
    fn closing_offset_finger_joint_edges() {
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
        let out = Join::closed(SegmentOps::default()).transform(&p).unwrap();
        let expected = Path::from_svg(
            "M 0.950 -0.050 L 0.950 0.450 L 0.300 0.450 L 0.300 -0.050 L -0.050 -0.050 \
             L -0.050 5.050 L 5.050 5.050 L 5.050 -0.050 L 4.700 -0.050 L 4.700 0.450 \
             L 4.050 0.450 L 4.050 -0.050 L 3.750 -0.050 L 3.450 -0.050 L 3.450 0.450 \
             L 2.800 0.450 L 2.800 -0.050 L 2.500 -0.050 L 2.200 -0.050 L 2.200 0.450 \
             L 1.550 0.450 L 1.550 -0.050 L 1.250 -0.050 L 0.950 -0.050",
        )
        .unwrap();

        let segs = trim_moves(&out);
        assert!(
            segs[0].start().precision_eq(&segs[segs.len() - 1].end(), 3),
            "{out}"
        );
        // the same outline, possibly starting at another corner
        let ours = corners(&out);
        let mut theirs = corners(&expected);
        assert_eq!(ours.len(), theirs.len(), "{out}");
        let start = theirs.iter().position(|c| *c == ours[0]);
        assert!(start.is_some(), "{out}");
        theirs.rotate_left(start.unwrap_or(0));
        assert_eq!(ours, theirs, "{out}");
    }

    #[test]
    fn nothing_to_join() {
        assert_eq!(join("", false), "");
        assert_eq!(join("M 1 1", true), "");
    }
}
