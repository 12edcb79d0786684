// Copyright 2026 the Kerfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named points of a path.

use core::fmt;
use core::str::FromStr;

use crate::path::trim_moves;
use crate::{Error, Path, Point, Result};

/// A named point (or measure) of a path, or a literal point.
///
/// The box anchors refer to the bounding box of the path with its leading
/// and trailing Moves trimmed.
///
/// Anchors parse from their `$NAME` form or from a literal `"x,y"`.
///
/// # Examples
///
/// ```
/// use kerfline::{Anchor, Path, Point};
///
/// let path = Path::from_svg("M 2 2 l 1 1 M 4 4").unwrap();
/// let anchor: Anchor = "$BOTTOM_RIGHT".parse().unwrap();
/// assert_eq!(anchor.point(&path).unwrap(), Point::new(3.0, 3.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Anchor {
    /// `$TOP_LEFT`
    TopLeft,
    /// `$TOP_RIGHT`
    TopRight,
    /// `$TOP_MIDDLE`
    TopMiddle,
    /// `$BOTTOM_LEFT`
    BottomLeft,
    /// `$BOTTOM_RIGHT`
    BottomRight,
    /// `$BOTTOM_MIDDLE`
    BottomMiddle,
    /// `$MIDDLE_LEFT`
    MiddleLeft,
    /// `$MIDDLE_RIGHT`
    MiddleRight,
    /// `$MIDDLE_MIDDLE`
    MiddleMiddle,
    /// `$START_POINT`: where the first drawing segment starts.
    StartPoint,
    /// `$END_POINT`: where the last drawing segment ends.
    EndPoint,
    /// `$START_POSITION`: the start of the first segment, Moves included.
    StartPosition,
    /// `$END_POSITION`: the end of the last segment, Moves included.
    EndPosition,
    /// `$CURSOR`: the path cursor.
    Cursor,
    /// `$ORIGIN`
    Origin,
    /// `$WIDTH`: width of the trimmed bounding box.
    Width,
    /// `$HEIGHT`: height of the trimmed bounding box.
    Height,
    /// A literal point.
    At(Point),
}

/// One coordinate of a point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// The x coordinate.
    X,
    /// The y coordinate.
    Y,
}

/// What an anchor resolves to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnchorValue {
    /// A point.
    Point(Point),
    /// A single number: a measure or one coordinate of a point.
    Scalar(f64),
}

const NAMES: [(&str, Anchor); 17] = [
    ("$TOP_LEFT", Anchor::TopLeft),
    ("$TOP_RIGHT", Anchor::TopRight),
    ("$TOP_MIDDLE", Anchor::TopMiddle),
    ("$BOTTOM_LEFT", Anchor::BottomLeft),
    ("$BOTTOM_RIGHT", Anchor::BottomRight),
    ("$BOTTOM_MIDDLE", Anchor::BottomMiddle),
    ("$MIDDLE_LEFT", Anchor::MiddleLeft),
    ("$MIDDLE_RIGHT", Anchor::MiddleRight),
    ("$MIDDLE_MIDDLE", Anchor::MiddleMiddle),
    ("$START_POINT", Anchor::StartPoint),
    ("$END_POINT", Anchor::EndPoint),
    ("$START_POSITION", Anchor::StartPosition),
    ("$END_POSITION", Anchor::EndPosition),
    ("$CURSOR", Anchor::Cursor),
    ("$ORIGIN", Anchor::Origin),
    ("$WIDTH", Anchor::Width),
    ("$HEIGHT", Anchor::Height),
];

impl Anchor {
    /// The `$NAME` of a named anchor.
    pub fn name(&self) -> Option<&'static str> {
        NAMES.iter().find(|(_, a)| a == self).map(|(n, _)| *n)
    }

    /// Resolve the anchor against `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateInput`] for the start and end anchors of a
    /// path that does not have the requested segment.
    pub fn resolve(&self, path: &Path) -> Result<AnchorValue> {
        let bbox = path.bounding_box_trim_whitespace();
        let (tl, br, mid) = (bbox.top_left(), bbox.bottom_right(), bbox.center());
        let p = match self {
            Self::Width => return Ok(AnchorValue::Scalar(bbox.width())),
            Self::Height => return Ok(AnchorValue::Scalar(bbox.height())),
            Self::Origin => Point::ORIGIN,
            Self::Cursor => path.cursor(),
            Self::At(p) => *p,
            Self::StartPosition => path.first().ok_or_else(|| self.missing())?.start(),
            Self::EndPosition => path.last().ok_or_else(|| self.missing())?.end(),
            Self::StartPoint => trim_moves(path).first().ok_or_else(|| self.missing())?.start(),
            Self::EndPoint => trim_moves(path).last().ok_or_else(|| self.missing())?.end(),
            Self::TopLeft => tl,
            Self::TopRight => Point::new(br.x, tl.y),
            Self::TopMiddle => Point::new(mid.x, tl.y),
            Self::BottomLeft => Point::new(tl.x, br.y),
            Self::BottomRight => br,
            Self::BottomMiddle => Point::new(mid.x, br.y),
            Self::MiddleLeft => Point::new(tl.x, mid.y),
            Self::MiddleRight => Point::new(br.x, mid.y),
            Self::MiddleMiddle => mid,
        };
        Ok(AnchorValue::Point(p))
    }

    /// Resolve an anchor that names a point.
    ///
    /// # Errors
    ///
    /// Fails like [`Anchor::resolve`], and with [`Error::DegenerateInput`]
    /// for `$WIDTH` and `$HEIGHT`, which are not points.
    pub fn point(&self, path: &Path) -> Result<Point> {
        match self.resolve(path)? {
            AnchorValue::Point(p) => Ok(p),
            AnchorValue::Scalar(_) => Err(Error::DegenerateInput(format!("{self} is not a point"))),
        }
    }

    fn missing(&self) -> Error {
        Error::DegenerateInput(format!("no {self} on an empty path"))
    }
}

/// Resolve anchor text against `path`.
///
/// The text is a literal `"x,y"`, or an anchor name optionally followed by
/// `.X` or `.Y` to select one coordinate of the point it names.
///
/// # Errors
///
/// Returns [`Error::UnknownAnchor`] for unknown names or subfields, and the
/// errors of [`Anchor::resolve`].
///
/// # Examples
///
/// ```
/// use kerfline::{resolve_anchor, AnchorValue, Path};
///
/// let path = Path::from_svg("M 2 2 L 6 4").unwrap();
/// assert_eq!(resolve_anchor("$WIDTH", &path).unwrap(), AnchorValue::Scalar(4.0));
/// assert_eq!(resolve_anchor("$MIDDLE_MIDDLE.Y", &path).unwrap(), AnchorValue::Scalar(3.0));
/// ```
pub fn resolve_anchor(text: &str, path: &Path) -> Result<AnchorValue> {
    if let Some(p) = parse_point(text) {
        return Ok(AnchorValue::Point(p));
    }
    let (name, axis) = match text.split_once('.') {
        Some((name, "X")) => (name, Some(Axis::X)),
        Some((name, "Y")) => (name, Some(Axis::Y)),
        Some(_) => return Err(Error::UnknownAnchor(text.to_string())),
        None => (text, None),
    };
    let value = name.parse::<Anchor>()?.resolve(path)?;
    match (value, axis) {
        (v, None) => Ok(v),
        (AnchorValue::Point(p), Some(Axis::X)) => Ok(AnchorValue::Scalar(p.x)),
        (AnchorValue::Point(p), Some(Axis::Y)) => Ok(AnchorValue::Scalar(p.y)),
        (AnchorValue::Scalar(_), Some(_)) => Err(Error::UnknownAnchor(text.to_string())),
    }
}

fn parse_point(text: &str) -> Option<Point> {
    let (x, y) = text.split_once(',')?;
    Some(Point::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
}

impl FromStr for Anchor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if let Some(p) = parse_point(s) {
            return Ok(Self::At(p));
        }
        NAMES
            .iter()
            .find(|(n, _)| *n == s)
            .map(|(_, a)| *a)
            .ok_or_else(|| Error::UnknownAnchor(s.to_string()))
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.name(), self) {
            (Some(name), _) => f.write_str(name),
            (None, Self::At(p)) => write!(f, "{:.3},{:.3}", p.x, p.y),
            (None, _) => Ok(()),
        }
    }
}

impl From<Point> for Anchor {
    fn from(p: Point) -> Self {
        Self::At(p)
    }
}
