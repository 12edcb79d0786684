// Copyright 2026 the Kerfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{Draw, Path, PathTransform, Result, Segment};

/// Traverse a path in the opposite direction.
///
/// Segments are reversed and visited last to first, then redrawn so that
/// each one starts at the end of the one before it. A path that started
/// with a Move from the origin therefore ends with a Move back to it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reverse;

impl PathTransform for Reverse {
    fn transform(&self, path: &Path) -> Result<Path> {
        Ok(reversed(path))
    }
}

pub(crate) fn reversed(segs: &[Segment]) -> Path {
    let mut draw = Draw::new();
    draw.add_segments(segs.iter().rev().map(Segment::reversed));
    draw.into_path()
}
