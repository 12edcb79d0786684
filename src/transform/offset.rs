// Copyright 2026 the Kerfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::log::debug;
use crate::path::trim_moves;
use crate::transform::reversed;
use crate::{Draw, Join, Path, PathTransform, Point, Rebuild, Result, Segment, SegmentOps};

/// How the bounding box of an offset path must compare to the original.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeShouldBe {
    /// Narrower and shorter than the original, as when cutting a hole.
    Smaller,
    /// Wider and taller than the original, as when cutting around a part.
    Larger,
}

/// Offset every segment of a path by a fixed distance.
///
/// Sub-paths are offset independently. The offset pieces of a sub-path are
/// joined back together with [`Join`], closing the result when the sub-path
/// was closed.
///
/// Which side the offset lands on depends on the direction the path is
/// drawn in. With `size_should_be` set, a result of the wrong size is
/// discarded and the reversed path is offset instead.
///
/// # Examples
///
/// ```
/// use kerfline::{Offset, Path, PathTransform, SegmentOps, SizeShouldBe};
///
/// let square = Path::from_svg("M0,0 L5,0 L5,5 L0,5 L0,0").unwrap();
/// let out = Offset::new(SegmentOps::default(), 1.0)
///     .with_size(SizeShouldBe::Larger)
///     .transform(&square)
///     .unwrap();
/// assert_eq!(out.svg(0), "M -1 -1 L -1 6 L 6 6 L 6 -1 L -1 -1");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Offset {
    /// Operators used to offset and join segments.
    pub ops: SegmentOps,
    /// Signed offset distance.
    pub distance: f64,
    /// Required size of the result, if any.
    pub size_should_be: Option<SizeShouldBe>,
}

impl Offset {
    /// Offset by `distance`, landing on whichever side the path direction
    /// gives.
    #[inline]
    pub fn new(ops: SegmentOps, distance: f64) -> Self {
        Self {
            ops,
            distance,
            size_should_be: None,
        }
    }

    /// Require the result to be of the given size.
    #[inline]
    #[must_use]
    pub fn with_size(mut self, size: SizeShouldBe) -> Self {
        self.size_should_be = Some(size);
        self
    }

    fn offset_sub_path(&self, path: &Path) -> Result<Path> {
        let trimmed = trim_moves(path);
        let (Some(first), Some(last)) = (trimmed.first(), trimmed.last()) else {
            return Ok(path.clone());
        };
        let mut segments = Vec::with_capacity(path.len() * 2);
        for seg in path.iter().filter(|s| !s.is_move()) {
            let pieces = self.ops.offset(seg, self.distance);
            if let Some(head) = pieces.first() {
                segments.push(Segment::move_to(Point::ORIGIN, head.start()));
                segments.extend(pieces);
            }
        }
        let join = Join {
            ops: self.ops,
            close: first.start() == last.end(),
        };
        let rebuilt = Rebuild.transform(&Path::from_segments(segments))?;
        let offset = join.transform(&rebuilt)?;

        let Some(want) = self.size_should_be else {
            return Ok(offset);
        };
        let old = path.bounding_box_trim_whitespace();
        let new = offset.bounding_box_trim_whitespace();
        let (ox, oy, nx, ny) = (old.width(), old.height(), new.width(), new.height());
        let wrong_size = match want {
            SizeShouldBe::Smaller => ox <= nx || oy <= ny,
            SizeShouldBe::Larger => ox >= nx || oy >= ny,
        };
        if !wrong_size {
            return Ok(offset);
        }
        debug!(?want, "offset landed on the wrong side, offsetting the reversed path");
        let once = Self {
            size_should_be: None,
            ..*self
        };
        once.transform(&reversed(path))
    }
}

impl PathTransform for Offset {
    fn transform(&self, path: &Path) -> Result<Path> {
        if self.distance == 0.0 {
            return Ok(path.clone());
        }
        let subs = path.split_on_move();
        if subs.len() <= 1 {
            return self.offset_sub_path(path);
        }
        let mut draw = Draw::new();
        for sub in &subs {
            draw.add_segments(self.offset_sub_path(sub)?);
        }
        Ok(draw.into_path())
    }
}
