// Copyright 2026 the Kerfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Whole-path transforms.
//!
//! Every transform is a value implementing [`PathTransform`]. Transforms
//! never modify their input; they build and return a new [`Path`].

mod affine;
mod cleanup;
mod dedup;
mod join;
mod offset;
mod rebuild;
mod reorder;
mod reverse;
mod slice;

pub use affine::*;
pub use cleanup::Cleanup;
pub use dedup::Dedup;
pub use join::Join;
pub use offset::{Offset, SizeShouldBe};
pub use rebuild::Rebuild;
pub use reorder::Reorder;
pub use reverse::Reverse;
pub use slice::Slice;

pub(crate) use reverse::reversed;

use crate::{Path, Result};

/// A function from one path to another.
///
/// Closures taking a `&Path` and returning a `Result<Path>` are transforms
/// too.
///
/// # Examples
///
/// ```
/// use kerfline::{Path, PathTransform, Shift};
///
/// let path = Path::from_svg("M 0 0 L 2 2").unwrap();
/// let moved = Shift::new(1.0, 0.0).transform(&path).unwrap();
/// assert_eq!(moved.svg(0), "M 1 0 L 3 2");
/// ```
pub trait PathTransform {
    /// Apply the transform to `path`.
    ///
    /// # Errors
    ///
    /// Fails when an anchor the transform depends on cannot be resolved, or
    /// when an intermediate path cannot be rebuilt.
    fn transform(&self, path: &Path) -> Result<Path>;
}

impl<F> PathTransform for F
where
    F: Fn(&Path) -> Result<Path>,
{
    fn transform(&self, path: &Path) -> Result<Path> {
        self(path)
    }
}

/// Apply `transforms` in order, each to the output of the previous one.
///
/// # Errors
///
/// Stops at, and returns, the first error.
///
/// # Examples
///
/// ```
/// use kerfline::{multi_transform, Path, Reverse, Shift};
///
/// let path = Path::from_svg("M 0 0 L 2 0").unwrap();
/// let out = multi_transform(&path, &[&Shift::new(0.0, 1.0), &Reverse]).unwrap();
/// assert_eq!(out.svg(0), "M 2 1 L 0 1 M 0 0");
/// ```
pub fn multi_transform(path: &Path, transforms: &[&dyn PathTransform]) -> Result<Path> {
    transforms
        .iter()
        .try_fold(path.clone(), |p, t| t.transform(&p))
}

#[cfg(test)]
mod tests {
    use super::{multi_transform, PathTransform};
    use crate::{Error, Path, Result};

    #[test]
    fn closures_are_transforms() {
        let fail = |_: &Path| -> Result<Path> { Err(Error::DegenerateInput("nope".into())) };
        let keep = |p: &Path| -> Result<Path> { Ok(p.clone()) };
        let p = Path::from_svg("M 1 1 L 2 2").unwrap();
        assert_eq!(keep.transform(&p).unwrap(), p);
        assert!(multi_transform(&p, &[&keep, &fail, &keep]).is_err());
        assert_eq!(multi_transform(&p, &[]).unwrap(), p);
    }
}
