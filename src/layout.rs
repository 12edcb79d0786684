// Copyright 2026 the Kerfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Laying finished parts out on sheets and writing them as SVG documents.

use core::fmt;
use core::str::FromStr;

use crate::log::warn;
use crate::{
    Anchor, Container, Error, Path, PathTransform, Placement, Result, Size, TrimWhitespace,
};

const MM_PER_INCH: f64 = 25.4;

/// Measurement units of a sheet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Units {
    /// Inches, written `in`.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "in"))]
    Inches,
    /// Millimeters, written `mm`.
    #[cfg_attr(feature = "serde", serde(rename = "mm"))]
    Millimeters,
}

impl Units {
    /// The full name of the units.
    pub fn name(self) -> &'static str {
        match self {
            Self::Inches => "inches",
            Self::Millimeters => "millimeters",
        }
    }

    /// The abbreviation used in SVG lengths.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::Inches => "in",
            Self::Millimeters => "mm",
        }
    }

    /// Convert a length in inches to these units.
    #[inline]
    pub fn from_inch(self, inches: f64) -> f64 {
        match self {
            Self::Inches => inches,
            Self::Millimeters => inches * MM_PER_INCH,
        }
    }

    /// Convert a length in millimeters to these units.
    #[inline]
    pub fn from_mm(self, mm: f64) -> f64 {
        match self {
            Self::Inches => mm / MM_PER_INCH,
            Self::Millimeters => mm,
        }
    }
}

impl FromStr for Units {
    type Err = Error;

    /// Parse units by name or abbreviation, ignoring case.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "in" | "inch" | "inches" => Ok(Self::Inches),
            "mm" | "millimeter" | "millimeters" => Ok(Self::Millimeters),
            _ => Err(Error::UnknownUnits(s.to_string())),
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Text written next to a part.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    /// The text.
    pub text: String,
    /// Where the text goes, resolved against the part's path.
    pub position: Anchor,
}

/// A finished part, ready to be placed on a sheet.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedPart {
    /// Identifier written as the id of the part's `<path>`.
    pub id: String,
    /// The outline, with its top-left corner at the origin.
    pub path: Path,
    /// The area the part needs on a sheet.
    pub size: Size,
    /// Optional label.
    pub label: Option<Label>,
}

impl RenderedPart {
    /// Prepare `path` for layout.
    ///
    /// The path is moved so its top-left corner sits at the origin and its
    /// size is measured from its bounding box.
    ///
    /// # Errors
    ///
    /// Returns errors of the [`TrimWhitespace`] transform.
    pub fn new(id: impl Into<String>, path: &Path) -> Result<Self> {
        let path = TrimWhitespace.transform(path)?;
        let size = path.bounding_box_trim_whitespace().size();
        Ok(Self {
            id: id.into(),
            path,
            size,
            label: None,
        })
    }

    /// Add a label at `position`.
    #[must_use]
    pub fn with_label(mut self, text: impl Into<String>, position: Anchor) -> Self {
        self.label = Some(Label {
            text: text.into(),
            position,
        });
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
struct PlacedPart {
    part: RenderedPart,
    x: f64,
    y: f64,
    rotated: bool,
}

/// A single sheet of material and the parts laid out on it.
///
/// # Examples
///
/// ```
/// use kerfline::{Path, RenderedPart, SvgDocument, Units};
///
/// let mut sheet = SvgDocument::new(20.0, 12.0, Units::Inches);
/// let square = Path::from_svg("M 5 5 L 7 5 L 7 7 L 5 7 L 5 5").unwrap();
/// assert!(sheet.add(RenderedPart::new("square", &square).unwrap()).unwrap());
/// let svg = sheet.to_svg().unwrap();
/// assert!(svg.contains(r#"<g transform="translate(0.100 0.100)">"#));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SvgDocument {
    size: Size,
    units: Units,
    padding: f64,
    render_size: bool,
    precision: usize,
    cut_style: String,
    label_style: String,
    layout: Container,
    placed: Vec<PlacedPart>,
}

impl SvgDocument {
    /// An empty sheet of the given size.
    ///
    /// Padding defaults to a tenth of an inch, the cut line is 0.3 mm wide
    /// and labels are set in 3 mm type.
    pub fn new(width: f64, height: f64, units: Units) -> Self {
        Self {
            size: Size::new(width, height),
            units,
            padding: units.from_inch(0.1),
            render_size: true,
            precision: 3,
            cut_style: format!("fill:none;stroke:black;stroke-width:{:.3}", units.from_mm(0.3)),
            label_style: format!("font: {:.3}pt serif; fill: blue", units.from_mm(3.0)),
            layout: Container::new(0.0, 0.0, width, height),
            placed: Vec::new(),
        }
    }

    /// Keep `padding` free around every part.
    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Write the physical width and height into the `<svg>` element, or
    /// leave them out so the drawing scales to its viewer.
    #[must_use]
    pub fn with_render_size(mut self, render_size: bool) -> Self {
        self.render_size = render_size;
        self
    }

    /// Write path data with `precision` decimal places.
    #[must_use]
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Style part outlines with `style`.
    #[must_use]
    pub fn with_cut_style(mut self, style: impl Into<String>) -> Self {
        self.cut_style = style.into();
        self
    }

    /// Style labels with `style`.
    #[must_use]
    pub fn with_label_style(mut self, style: impl Into<String>) -> Self {
        self.label_style = style.into();
        self
    }

    /// An empty sheet with the same size and settings as this one.
    #[must_use]
    pub fn blank(&self) -> Self {
        Self {
            size: self.size,
            units: self.units,
            padding: self.padding,
            render_size: self.render_size,
            precision: self.precision,
            cut_style: self.cut_style.clone(),
            label_style: self.label_style.clone(),
            layout: Container::new(0.0, 0.0, self.size.width, self.size.height),
            placed: Vec::new(),
        }
    }

    /// The sheet size.
    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    /// The units of the sheet size and of every part on it.
    #[inline]
    pub fn units(&self) -> Units {
        self.units
    }

    /// Free space kept around every part.
    #[inline]
    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// Style of part outlines.
    pub fn cut_style(&self) -> &str {
        &self.cut_style
    }

    /// Style of labels.
    pub fn label_style(&self) -> &str {
        &self.label_style
    }

    /// Number of parts on the sheet.
    #[inline]
    pub fn len(&self) -> usize {
        self.placed.len()
    }

    /// Is the sheet still blank?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    /// The parts on the sheet, in the order they were added.
    pub fn parts(&self) -> impl Iterator<Item = &RenderedPart> {
        self.placed.iter().map(|p| &p.part)
    }

    /// Area of the sheet not yet taken up by parts and their padding.
    pub fn free_area(&self) -> f64 {
        self.layout.empty_area()
    }

    fn place(&mut self, part: &RenderedPart) -> Result<Option<Placement>> {
        let size = part.size;
        if size.is_degenerate() {
            return Err(Error::DegenerateInput(format!(
                "part `{}` has size {size}",
                part.id
            )));
        }
        if let Some(p) = self.layout.insert_with_padding(size, self.padding)? {
            return Ok(Some(p));
        }
        if !self.layout.is_empty() {
            return Ok(None);
        }
        warn!(id = %part.id, "part does not fit the sheet, giving it a sheet of its own");
        let bounds = self.layout.bounds();
        self.layout = Container::single(bounds.x0, bounds.y0, bounds.width(), bounds.height());
        Ok(Some(Placement {
            x: bounds.x0,
            y: bounds.y0,
            width: size.width,
            height: size.height,
            rotated: false,
        }))
    }

    /// Lay a part out on the sheet.
    ///
    /// Returns `false` when there is no room left for it. A part too large
    /// for a blank sheet is still accepted and takes the whole sheet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateInput`] when the part has a zero,
    /// negative, or NaN dimension.
    pub fn add(&mut self, part: RenderedPart) -> Result<bool> {
        let Some(at) = self.place(&part)? else {
            return Ok(false);
        };
        self.push(part, at);
        Ok(true)
    }

    fn push(&mut self, part: RenderedPart, at: Placement) {
        self.placed.push(PlacedPart {
            part,
            x: at.x,
            y: at.y,
            rotated: at.rotated,
        });
    }

    /// Write the sheet as an SVG document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] when the writer fails, and the errors of
    /// [`Anchor::point`] for label positions that cannot be resolved.
    pub fn write_svg<W: fmt::Write>(&self, w: &mut W) -> Result<()> {
        writeln!(w, r#"<?xml version="1.0"?>"#)?;
        w.write_str("<svg ")?;
        if self.render_size {
            let abv = self.units.abbreviation();
            write!(
                w,
                r#"width="{:.3}{abv}" height="{:.3}{abv}" "#,
                self.size.width, self.size.height
            )?;
        }
        writeln!(
            w,
            r#"viewBox="0.000 0.000 {:.3} {:.3}" xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink">"#,
            self.size.width, self.size.height
        )?;
        for placed in &self.placed {
            self.write_part(w, placed)?;
        }
        writeln!(w, "</svg>")?;
        Ok(())
    }

    /// The sheet as an SVG document.
    ///
    /// # Errors
    ///
    /// Fails like [`SvgDocument::write_svg`].
    pub fn to_svg(&self) -> Result<String> {
        let mut s = String::new();
        self.write_svg(&mut s)?;
        Ok(s)
    }

    fn write_part<W: fmt::Write>(&self, w: &mut W, placed: &PlacedPart) -> Result<()> {
        let part = &placed.part;
        let (mut tx, ty) = (placed.x, placed.y);
        w.write_str(r#"<g transform=""#)?;
        if placed.rotated {
            // turned about its top-right corner, which is then the top-left
            tx += part.size.height;
            write!(w, "rotate(90 {tx:.3} {ty:.3}) ")?;
        }
        writeln!(w, r#"translate({tx:.3} {ty:.3})">"#)?;

        w.write_str(r#"<path id=""#)?;
        write_escaped(w, &part.id)?;
        w.write_str(r#"" d=""#)?;
        part.path.write_svg(w, self.precision)?;
        writeln!(w, r#"" style="{}" />"#, self.cut_style)?;

        if let Some(label) = part.label.as_ref().filter(|l| !l.text.is_empty()) {
            let at = label.position.point(&part.path)?;
            write!(
                w,
                r#"<text x="{:.3}" y="{:.3}" style="{}">"#,
                at.x, at.y, self.label_style
            )?;
            write_escaped(w, &label.text)?;
            writeln!(w, "</text>")?;
        }
        writeln!(w, "</g>")?;
        Ok(())
    }
}

fn write_escaped(w: &mut impl fmt::Write, text: &str) -> fmt::Result {
    for c in text.chars() {
        match c {
            '&' => w.write_str("&amp;")?,
            '<' => w.write_str("&lt;")?,
            '>' => w.write_str("&gt;")?,
            '"' => w.write_str("&quot;")?,
            c => w.write_char(c)?,
        }
    }
    Ok(())
}

/// A growing set of sheets.
///
/// Each part goes onto the first sheet with room for it. When none has
/// room, a new sheet like the template is started.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanSet {
    template: SvgDocument,
    sheets: Vec<SvgDocument>,
}

impl PlanSet {
    /// A plan set whose sheets look like `template`.
    ///
    /// Parts already on the template are not carried over.
    pub fn new(template: &SvgDocument) -> Self {
        Self {
            template: template.blank(),
            sheets: Vec::new(),
        }
    }

    /// Add a part to the first sheet with room for it.
    ///
    /// Returns `false` if not even a new sheet would take the part.
    ///
    /// # Errors
    ///
    /// Fails like [`SvgDocument::add`].
    pub fn add(&mut self, part: RenderedPart) -> Result<bool> {
        for sheet in &mut self.sheets {
            if let Some(at) = sheet.place(&part)? {
                sheet.push(part, at);
                return Ok(true);
            }
        }
        let mut sheet = self.template.blank();
        if !sheet.add(part)? {
            return Ok(false);
        }
        self.sheets.push(sheet);
        Ok(true)
    }

    /// The sheets so far.
    #[inline]
    pub fn sheets(&self) -> &[SvgDocument] {
        &self.sheets
    }

    /// Every sheet as an SVG document.
    ///
    /// # Errors
    ///
    /// Fails like [`SvgDocument::write_svg`].
    pub fn to_svgs(&self) -> Result<Vec<String>> {
        self.sheets.iter().map(SvgDocument::to_svg).collect()
    }
}
