// Copyright 2026 the Kerfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Longest path-text fragment kept in a [`Error::MalformedPathText`].
const MAX_FRAGMENT_CHARS: usize = 24;

/// Everything that can go wrong inside the geometry kernel.
///
/// All variants are recoverable: the kernel never aborts the process and
/// leaves fallback decisions to the caller.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The input cannot be processed at all: a NaN coordinate, a zero-area
    /// packing item, an empty path asked for a point it does not have.
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    /// Two lines asked to intersect are parallel.
    #[error("lines are parallel and do not intersect")]
    ParallelLines,

    /// The pivot of a curve offset cannot be found because the offset
    /// normals are parallel. Reducing the curve first avoids this.
    #[error("cannot scale this curve, reduce it first")]
    DegenerateCurve,

    /// No simple sub-curve could be found while reducing a curve.
    #[error("curve cannot be reduced to simple sub-curves")]
    NotReducible,

    /// Path text could not be parsed.
    #[error("malformed path text near `{fragment}`: {reason}")]
    MalformedPathText {
        /// The offending part of the input.
        fragment: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A named anchor or anchor subfield does not exist.
    #[error("unknown anchor `{0}`")]
    UnknownAnchor(String),

    /// A measurement unit name that is not recognized.
    #[error("unknown units `{0}`")]
    UnknownUnits(String),

    /// The sink a document was written to reported an error.
    #[error("failed to write document: {0}")]
    Format(#[from] core::fmt::Error),
}

impl Error {
    /// Is this a geometric construction that has no solution?
    ///
    /// Callers usually recover from these with a simpler fallback, such as a
    /// connecting line instead of an intersection.
    pub fn is_unsolvable_geometry(&self) -> bool {
        matches!(self, Self::ParallelLines | Self::DegenerateCurve)
    }

    pub(crate) fn malformed(fragment: &str, reason: impl Into<String>) -> Self {
        let fragment = if fragment.chars().count() > MAX_FRAGMENT_CHARS {
            let head: String = fragment.chars().take(MAX_FRAGMENT_CHARS - 3).collect();
            format!("{head}...")
        } else {
            fragment.to_string()
        };
        Self::MalformedPathText {
            fragment,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn long_fragments_are_elided() {
        let err = Error::malformed("M 1 2 L 3 4 C 5 6 7 8 9 10 X 11 12", "unknown command");
        match err {
            Error::MalformedPathText { fragment, .. } => {
                assert_eq!(fragment.chars().count(), 24);
                assert!(fragment.ends_with("..."));
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(Error::ParallelLines.is_unsolvable_geometry());
        assert!(!Error::NotReducible.is_unsolvable_geometry());
    }
}
