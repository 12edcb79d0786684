// Copyright 2026 the Kerfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Guillotine rectangle packing.
//!
//! Items are placed into a binary tree of bins. A free leaf that is larger
//! than the item is cut in two along the axis that leaves the larger
//! remainder, and the item goes into the first piece. Bins are never merged
//! again, so a tree only grows while a sheet is being filled.

use crate::{Error, Rect, Result, Size};

/// Where an item landed in a [`Container`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    /// Left edge of the placed item.
    pub x: f64,
    /// Top edge of the placed item.
    pub y: f64,
    /// Width of the area the item covers, after any rotation.
    pub width: f64,
    /// Height of the area the item covers, after any rotation.
    pub height: f64,
    /// The item was turned a quarter turn to fit.
    pub rotated: bool,
}

impl Placement {
    /// The area the item covers.
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

#[derive(Clone, Debug, PartialEq)]
enum BinState {
    Empty,
    Occupied { rotated: bool },
    Split(Box<[Bin; 2]>),
}

/// A node of the packing tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Bin {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    state: BinState,
}

impl Bin {
    fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            state: BinState::Empty,
        }
    }

    /// The area this bin covers.
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// The size of this bin.
    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Does this bin hold an item?
    #[inline]
    pub fn is_occupied(&self) -> bool {
        matches!(self.state, BinState::Occupied { .. })
    }

    /// The two halves of a bin that has been cut.
    pub fn children(&self) -> Option<&[Self; 2]> {
        match &self.state {
            BinState::Split(children) => Some(children),
            _ => None,
        }
    }

    /// Was this bin cut along a horizontal line, so that the first child is
    /// on top of the second?
    pub fn is_horizontal_split(&self) -> bool {
        self.children().is_some_and(|[a, b]| a.x == b.x)
    }

    fn insert(&mut self, item: Size) -> Option<Placement> {
        match &mut self.state {
            BinState::Split(children) => {
                let [first, second] = &mut **children;
                return first.insert(item).or_else(|| second.insert(item));
            }
            BinState::Occupied { .. } => return None,
            BinState::Empty => {}
        }

        let (size, rotated) = if self.size().fits(item) {
            (item, false)
        } else if self.size().fits(item.rotated()) {
            (item.rotated(), true)
        } else {
            return None;
        };

        if size == self.size() {
            self.state = BinState::Occupied { rotated };
            return Some(Placement {
                x: self.x,
                y: self.y,
                width: self.width,
                height: self.height,
                rotated,
            });
        }

        let (x, y) = (self.x, self.y);
        let mut children = if self.width - size.width > self.height - size.height {
            // vertical cut
            Box::new([
                Self::new(x, y, size.width, self.height),
                Self::new(x + size.width, y, self.width - size.width, self.height),
            ])
        } else {
            Box::new([
                Self::new(x, y, self.width, size.height),
                Self::new(x, y + size.height, self.width, self.height - size.height),
            ])
        };
        let placed = children[0].insert(item);
        self.state = BinState::Split(children);
        placed
    }

    fn collect_empty<'a>(&'a self, out: &mut Vec<&'a Self>) {
        match &self.state {
            BinState::Empty => out.push(self),
            BinState::Occupied { .. } => {}
            BinState::Split(children) => {
                for child in children.iter() {
                    child.collect_empty(out);
                }
            }
        }
    }
}

/// A fixed-size area that items are packed into.
///
/// # Examples
///
/// ```
/// use kerfline::{Container, Size};
///
/// let mut sheet = Container::new(0.0, 0.0, 10.0, 4.0);
/// let a = sheet.insert(Size::new(4.0, 4.0)).unwrap().unwrap();
/// let b = sheet.insert(Size::new(8.0, 2.0)).unwrap();
/// assert_eq!((a.x, a.y), (0.0, 0.0));
/// assert!(b.is_none());
/// assert_eq!(sheet.empty_area(), 24.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Container {
    root: Bin,
}

impl Container {
    /// An empty container.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            root: Bin::new(x, y, width, height),
        }
    }

    /// A container taken up entirely by a single item.
    ///
    /// Nothing more can be inserted into it.
    pub fn single(x: f64, y: f64, width: f64, height: f64) -> Self {
        let mut root = Bin::new(x, y, width, height);
        root.state = BinState::Occupied { rotated: false };
        Self { root }
    }

    /// The root of the packing tree.
    #[inline]
    pub fn root(&self) -> &Bin {
        &self.root
    }

    /// The extent of the container.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.root.rect()
    }

    /// Place an item, rotating it a quarter turn if that is the only way it
    /// fits.
    ///
    /// Returns `None` when there is no room left for it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateInput`] for items with a zero, negative,
    /// or NaN dimension.
    pub fn insert(&mut self, item: Size) -> Result<Option<Placement>> {
        if item.is_degenerate() {
            return Err(Error::DegenerateInput(format!("cannot pack an item of size {item}")));
        }
        Ok(self.root.insert(item))
    }

    /// Place an item with `padding` kept free on all four sides.
    ///
    /// The placement returned covers the item itself, without the padding.
    ///
    /// # Errors
    ///
    /// Fails like [`Container::insert`].
    pub fn insert_with_padding(&mut self, item: Size, padding: f64) -> Result<Option<Placement>> {
        if item.is_degenerate() {
            return Err(Error::DegenerateInput(format!("cannot pack an item of size {item}")));
        }
        let Some(placed) = self.root.insert(item.padded(padding)) else {
            return Ok(None);
        };
        let covered = if placed.rotated { item.rotated() } else { item };
        Ok(Some(Placement {
            x: placed.x + padding,
            y: placed.y + padding,
            width: covered.width,
            height: covered.height,
            rotated: placed.rotated,
        }))
    }

    /// Every free leaf of the packing tree.
    pub fn empty_bins(&self) -> Vec<&Bin> {
        let mut out = Vec::new();
        self.root.collect_empty(&mut out);
        out
    }

    /// Total area still free.
    pub fn empty_area(&self) -> f64 {
        self.empty_bins().iter().map(|b| b.size().area()).sum()
    }

    /// Has nothing been placed yet?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.state == BinState::Empty
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::{Container, Placement};
    use crate::{Error, Rect, Size};

    #[test]
    fn exact_fit() {
        let mut c = Container::new(0.0, 0.0, 5.0, 3.0);
        let p = c.insert(Size::new(5.0, 3.0)).unwrap().unwrap();
        assert_eq!(
            p,
            Placement {
                x: 0.0,
                y: 0.0,
                width: 5.0,
                height: 3.0,
                rotated: false
            }
        );
        assert!(!c.is_empty());
        assert!(c.empty_bins().is_empty());
        assert_eq!(c.insert(Size::new(1.0, 1.0)).unwrap(), None);
    }

    #[test]
    fn rotates_when_needed() {
        let mut c = Container::new(0.0, 0.0, 10.0, 4.0);
        let p = c.insert(Size::new(3.0, 8.0)).unwrap().unwrap();
        assert!(p.rotated);
        assert_eq!((p.width, p.height), (8.0, 3.0));
        assert_eq!(c.empty_area(), 40.0 - 24.0);
    }

    #[test]
    fn splits_along_the_larger_remainder() {
        let mut c = Container::new(0.0, 0.0, 10.0, 4.0);
        c.insert(Size::new(2.0, 2.0)).unwrap().unwrap();
        assert!(!c.root().is_horizontal_split());
        let [left, right] = c.root().children().unwrap();
        assert_eq!(left.size(), Size::new(2.0, 4.0));
        assert_eq!(right.rect(), Rect::new(2.0, 0.0, 10.0, 4.0));
        assert!(left.children().unwrap()[0].is_occupied());

        let mut tall = Container::new(0.0, 0.0, 4.0, 10.0);
        tall.insert(Size::new(2.0, 2.0)).unwrap().unwrap();
        assert!(tall.root().is_horizontal_split());
    }

    #[test]
    fn fills_remaining_space() {
        let mut c = Container::new(1.0, 1.0, 10.0, 4.0);
        let a = c.insert(Size::new(4.0, 4.0)).unwrap().unwrap();
        let b = c.insert(Size::new(6.0, 4.0)).unwrap().unwrap();
        assert_eq!((a.x, a.y), (1.0, 1.0));
        assert_eq!((b.x, b.y), (5.0, 1.0));
        assert_eq!(c.empty_area(), 0.0);
    }

    #[test]
    fn padding_is_kept_free() {
        let mut c = Container::new(0.0, 0.0, 10.0, 10.0);
        let p = c.insert_with_padding(Size::new(2.0, 3.0), 0.5).unwrap().unwrap();
        assert_eq!(
            p,
            Placement {
                x: 0.5,
                y: 0.5,
                width: 2.0,
                height: 3.0,
                rotated: false
            }
        );
        let q = c.insert_with_padding(Size::new(2.0, 3.0), 0.5).unwrap().unwrap();
        assert!(q.x >= p.x + p.width + 1.0 || q.y >= p.y + p.height + 1.0);
        assert_eq!(c.insert_with_padding(Size::new(9.5, 9.5), 0.5).unwrap(), None);
    }

    #[test]
    fn single_object_container_is_full() {
        let mut c = Container::single(0.0, 0.0, 4.0, 4.0);
        assert!(!c.is_empty());
        assert_eq!(c.empty_area(), 0.0);
        assert_eq!(c.insert(Size::new(1.0, 1.0)).unwrap(), None);
    }

    #[test]
    fn degenerate_items() {
        let mut c = Container::new(0.0, 0.0, 4.0, 4.0);
        for item in [Size::new(0.0, 1.0), Size::new(1.0, -1.0), Size::new(f64::NAN, 1.0)] {
            assert!(matches!(c.insert(item), Err(Error::DegenerateInput(_))));
            assert!(matches!(c.insert_with_padding(item, 0.1), Err(Error::DegenerateInput(_))));
        }
        assert!(c.is_empty());
    }

    #[test]
    fn random_packing_never_overlaps() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let mut c = Container::new(0.0, 0.0, 100.0, 60.0);
            let bounds = c.bounds();
            let mut placed: Vec<Placement> = Vec::new();
            for _ in 0..40 {
                let item = Size::new(
                    f64::from(rng.random_range(1..40)),
                    f64::from(rng.random_range(1..40)),
                );
                let Some(p) = c.insert(item).unwrap() else {
                    continue;
                };
                let r = p.rect();
                assert!(bounds.contains(r.top_left()) && bounds.contains(r.bottom_right()));
                assert_eq!(p.width * p.height, item.area());
                for other in &placed {
                    assert!(!r.overlaps(&other.rect()), "{p:?} overlaps {other:?}");
                }
                placed.push(p);
            }
            let used: f64 = placed.iter().map(|p| p.width * p.height).sum();
            assert!(c.empty_area() + used <= bounds.size().area() + 1e-9);
        }
    }
}
