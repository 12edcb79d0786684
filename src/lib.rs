// Copyright 2026 the Kerfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 2D vector paths for cutting machines.
//!
//! Kerfline is the geometry kernel behind CNC and laser cut files. Outlines
//! are built as [`Path`]s of [`Segment`]s (moves, lines and cubic Bézier
//! curves), cleaned up and stitched together with [`PathTransform`]s,
//! offset by a tool width, and finally laid out on sheets of material with
//! a guillotine bin packer.
//!
//! All coordinates live in y-down space, as in SVG. Geometric comparisons
//! round to a number of decimal digits set in [`KernelOptions`].
//!
//! # Examples
//!
//! Stitching loose edges into an outline and growing it by a tool radius:
//!
//! ```
//! use kerfline::{Join, Offset, Path, PathTransform, SegmentOps, SizeShouldBe};
//!
//! let ops = SegmentOps::default();
//! let edges = Path::from_svg("M 0 0 L 5 0 M 5 0 L 5 5 M 0 5 L 5 5 M 0 0 L 0 5").unwrap();
//! let outline = Join::new(ops).transform(&edges).unwrap();
//! assert_eq!(outline.svg(0), "M 0 0 L 5 0 L 5 5 L 0 5 L 0 0");
//!
//! let cut = Offset::new(ops, 0.5)
//!     .with_size(SizeShouldBe::Larger)
//!     .transform(&outline)
//!     .unwrap();
//! let bbox = cut.bounding_box_trim_whitespace();
//! assert_eq!((bbox.width(), bbox.height()), (6.0, 6.0));
//! ```
//!
//! Laying parts out on sheets:
//!
//! ```
//! use kerfline::{Anchor, Path, PlanSet, RenderedPart, SvgDocument, Units};
//!
//! let mut plans = PlanSet::new(&SvgDocument::new(12.0, 12.0, Units::Inches));
//! for i in 0..3 {
//!     let square = Path::from_svg("M 0 0 L 7 0 L 7 7 L 0 7 L 0 0").unwrap();
//!     let part = RenderedPart::new(format!("side{i}"), &square)
//!         .unwrap()
//!         .with_label(format!("{i}"), Anchor::MiddleMiddle);
//!     assert!(plans.add(part).unwrap());
//! }
//! assert_eq!(plans.sheets().len(), 3);
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize` and `Deserialize` for the value types.
//! - `tracing`: log fallbacks and guards through [`tracing`]. Without it the
//!   crate logs nothing.
//!
//! [`tracing`]: https://docs.rs/tracing

#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::doc_markdown, rustdoc::broken_intra_doc_links)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(unused_qualifications)]
#![allow(
    clippy::unreadable_literal,
    clippy::many_single_char_names,
    clippy::excessive_precision
)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod anchor;
mod binpack;
pub mod common;
mod cubicbez;
mod draw;
mod error;
mod layout;
mod line;
mod log;
mod ops;
mod options;
mod path;
mod point;
mod query;
mod rect;
mod segment;
mod size;
mod svg;
mod transform;

pub use crate::anchor::*;
pub use crate::binpack::*;
pub use crate::cubicbez::*;
pub use crate::draw::*;
pub use crate::error::*;
pub use crate::layout::*;
pub use crate::line::*;
pub use crate::ops::*;
pub use crate::options::*;
pub use crate::path::*;
pub use crate::point::*;
pub use crate::rect::*;
pub use crate::segment::*;
pub use crate::size::*;
pub use crate::transform::*;
