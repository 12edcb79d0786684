// Copyright 2026 the Kerfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::log::debug;
use crate::options::DEFAULT_PRECISION;
use crate::{Cleanup, Path, PathTransform, Result, Segment};

/// Remove redundant segments from a path.
///
/// A Move that leaves the cursor where it is goes away, consecutive Moves
/// collapse into one, and a segment immediately followed by its own reverse
/// cancels out together with it. Removal is repeated until nothing changes
/// and the result is run through [`Cleanup`].
///
/// # Examples
///
/// ```
/// use kerfline::{Dedup, Path, PathTransform};
///
/// let path = Path::from_svg("M 15 17 L 34 80 L 15 17").unwrap();
/// let out = Dedup::new(2).transform(&path).unwrap();
/// assert_eq!(out.svg(0), "M 15 17");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dedup {
    /// Digits at which two points are the same.
    pub precision: i32,
}

impl Dedup {
    /// Dedup at `precision` digits.
    #[inline]
    pub fn new(precision: i32) -> Self {
        Self { precision }
    }

    fn pass(self, path: &Path) -> Path {
        if path.len() < 2 {
            return path.clone();
        }
        let n = self.precision;
        let mut out: Vec<Segment> = Vec::with_capacity(path.len());
        out.push(path[0]);
        for &cur in &path[1..] {
            let Some(prev) = out.last_mut() else {
                out.push(cur);
                continue;
            };
            if cur.is_move() {
                if prev.is_move() {
                    *prev = Segment::move_to(prev.start(), cur.end());
                } else if !prev.end().precision_eq(&cur.end(), n) {
                    out.push(cur);
                }
            } else if cur.precision_eq(&prev.reversed(), n) {
                out.pop();
            } else {
                out.push(cur);
            }
        }
        Path::from_segments(out)
    }
}

impl Default for Dedup {
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION)
    }
}

impl PathTransform for Dedup {
    fn transform(&self, path: &Path) -> Result<Path> {
        let cleanup = Cleanup::new(self.precision);
        let mut current = path.clone();
        // every pass that changes anything removes, merges or snaps segments
        for _ in 0..path.len() + 2 {
            let next = cleanup.transform(&self.pass(&current))?;
            if next == current {
                return Ok(current);
            }
            current = next;
        }
        debug!(segments = path.len(), "dedup stopped before reaching a fixed point");
        Ok(current)
    }
}
