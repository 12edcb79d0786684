// Copyright 2026 the Kerfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{Path, PathTransform, Result};

/// Digits written when a path is rebuilt from its text.
const REBUILD_PRECISION: usize = 7;

/// Rebuild a path from its own text form.
///
/// Every segment is re-derived from the end of the one before it, which
/// heals starts that drifted away from the previous end. Coordinates are
/// kept to seven decimal places.
///
/// # Examples
///
/// ```
/// use kerfline::{Path, PathTransform, Rebuild, Segment};
///
/// let path: Path = [
///     Segment::move_to((0.0, 0.0), (1.0, 1.0)),
///     Segment::line((1.5, 1.0), (2.0, 2.0)),
/// ]
/// .into_iter()
/// .collect();
/// let rebuilt = Rebuild.transform(&path).unwrap();
/// assert_eq!(rebuilt[1], Segment::line((1.0, 1.0), (2.0, 2.0)));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rebuild;

impl PathTransform for Rebuild {
    fn transform(&self, path: &Path) -> Result<Path> {
        Path::from_svg(&path.svg(REBUILD_PRECISION))
    }
}

#[cfg(test)]
mod tests {
    use super::Rebuild;
    use crate::{Path, PathTransform, Point};

    #[test]
    fn rebuild_keeps_seven_digits() {
        let p = Path::from_svg("M 0.123456789 1 L 2 3.000000049").unwrap();
        let r = Rebuild.transform(&p).unwrap();
        assert_eq!(r.cursor(), Point::new(2.0, 3.0));
        assert_eq!(r[0].end(), Point::new(0.1234568, 1.0));
    }
}
