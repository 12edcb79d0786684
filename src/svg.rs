// Copyright 2026 the Kerfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parsing of SVG path data text.

use core::str::FromStr;

use crate::error::Error;
use crate::log::warn;
use crate::{Draw, Path, Point, Result};

impl Path {
    /// Parse path data text.
    ///
    /// Accepts the `M L C S Q H V Z` commands and their relative lower-case
    /// forms. Numbers may be separated by whitespace or commas, may be glued
    /// to their command, and may carry a sign and an exponent. Extra
    /// coordinate groups repeat the previous command, with a Move repeating
    /// as a Line. `Z` is accepted and ignored: a closed outline must end
    /// with an explicit segment back to its start.
    ///
    /// The result holds the parsed segments as drawn, without an inserted
    /// head Move.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedPathText`] for an unknown command or a
    /// command with missing or invalid numbers.
    ///
    /// # Examples
    ///
    /// ```
    /// use kerfline::Path;
    ///
    /// let p = Path::from_svg("M.5,0 L3.5, 0 M0,0, L0,4").unwrap();
    /// assert_eq!(p.svg(1), "M 0.5 0.0 L 3.5 0.0 M 0.0 0.0 L 0.0 4.0");
    /// ```
    pub fn from_svg(data: &str) -> Result<Self> {
        let mut lexer = SvgLexer::new(data);
        let mut draw = Draw::new();
        let mut last_cmd = 0;
        while let Some(c) = lexer.get_cmd(last_cmd)? {
            let start = lexer.cmd_start;
            let wrong = |reason: &str| Error::malformed(&data[start..], reason);
            match c {
                b'M' | b'm' => {
                    let p = lexer.get_maybe_relative(c, draw.current_position())?;
                    draw.move_to(p);
                    // subsequent pairs are implicit lines
                    last_cmd = c - (b'M' - b'L');
                }
                b'L' | b'l' => {
                    let p = lexer.get_maybe_relative(c, draw.current_position())?;
                    draw.line_to(p);
                    last_cmd = c;
                }
                b'H' | b'h' => {
                    let x = lexer.get_number()?;
                    lexer.opt_comma();
                    if c == b'h' {
                        draw.rel_h_line_to(x);
                    } else {
                        draw.h_line_to(x);
                    }
                    last_cmd = c;
                }
                b'V' | b'v' => {
                    let y = lexer.get_number()?;
                    lexer.opt_comma();
                    if c == b'v' {
                        draw.rel_v_line_to(y);
                    } else {
                        draw.v_line_to(y);
                    }
                    last_cmd = c;
                }
                b'C' | b'c' => {
                    let cur = draw.current_position();
                    let p1 = lexer.get_maybe_relative(c, cur)?;
                    let p2 = lexer.get_maybe_relative(c, cur)?;
                    let p3 = lexer.get_maybe_relative(c, cur)?;
                    draw.curve_to(p1, p2, p3);
                    last_cmd = c;
                }
                b'S' | b's' => {
                    let cur = draw.current_position();
                    let p2 = lexer.get_maybe_relative(c, cur)?;
                    let p3 = lexer.get_maybe_relative(c, cur)?;
                    draw.smooth_curve_to(p2, p3);
                    last_cmd = c;
                }
                b'Q' | b'q' => {
                    let cur = draw.current_position();
                    let p1 = lexer.get_maybe_relative(c, cur)?;
                    let p2 = lexer.get_maybe_relative(c, cur)?;
                    draw.q_curve_to(p1, p2);
                    last_cmd = c;
                }
                b'Z' | b'z' => {
                    warn!("skipping close path command in path text");
                    last_cmd = 0;
                }
                _ => return Err(wrong("unknown command")),
            }
        }
        Ok(draw.into_path())
    }
}

impl FromStr for Path {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_svg(s)
    }
}

struct SvgLexer<'a> {
    data: &'a str,
    ix: usize,
    cmd_start: usize,
}

impl<'a> SvgLexer<'a> {
    fn new(data: &'a str) -> Self {
        SvgLexer {
            data,
            ix: 0,
            cmd_start: 0,
        }
    }

    fn skip_ws(&mut self) {
        while let Some(&c) = self.data.as_bytes().get(self.ix) {
            if !(c == b' ' || c == 9 || c == 10 || c == 12 || c == 13) {
                break;
            }
            self.ix += 1;
        }
    }

    /// The next command, or `last_cmd` again when a number follows it.
    fn get_cmd(&mut self, last_cmd: u8) -> Result<Option<u8>> {
        self.skip_ws();
        self.cmd_start = self.ix;
        let Some(c) = self.get_byte() else {
            return Ok(None);
        };
        if c.is_ascii_alphabetic() {
            return Ok(Some(c));
        }
        self.unget();
        if last_cmd != 0 && (c == b'-' || c == b'+' || c == b'.' || c.is_ascii_digit()) {
            // plausible number start
            return Ok(Some(last_cmd));
        }
        Err(Error::malformed(&self.data[self.ix..], "expected a command"))
    }

    fn get_byte(&mut self) -> Option<u8> {
        self.data.as_bytes().get(self.ix).map(|&c| {
            self.ix += 1;
            c
        })
    }

    fn peek_byte(&self) -> Option<u8> {
        self.data.as_bytes().get(self.ix).copied()
    }

    fn unget(&mut self) {
        self.ix -= 1;
    }

    fn get_number(&mut self) -> Result<f64> {
        self.skip_ws();
        let start = self.ix;
        if matches!(self.peek_byte(), Some(b'-' | b'+')) {
            self.ix += 1;
        }
        let mut digit_count = 0;
        let mut seen_period = false;
        while let Some(c) = self.get_byte() {
            if c.is_ascii_digit() {
                digit_count += 1;
            } else if c == b'.' && !seen_period {
                seen_period = true;
            } else {
                self.unget();
                break;
            }
        }
        if digit_count > 0 && matches!(self.peek_byte(), Some(b'e' | b'E')) {
            let mark = self.ix;
            self.ix += 1;
            if matches!(self.peek_byte(), Some(b'-' | b'+')) {
                self.ix += 1;
            }
            let exp_start = self.ix;
            while self.peek_byte().is_some_and(|c| c.is_ascii_digit()) {
                self.ix += 1;
            }
            if self.ix == exp_start {
                self.ix = mark;
            }
        }
        if digit_count == 0 {
            return Err(self.missing_number(start));
        }
        self.data[start..self.ix]
            .parse()
            .map_err(|_| Error::malformed(&self.data[self.cmd_start..], "invalid number"))
    }

    fn missing_number(&self, at: usize) -> Error {
        let reason = if at >= self.data.len() {
            "not enough numbers"
        } else {
            "expected a number"
        };
        Error::malformed(&self.data[self.cmd_start..], reason)
    }

    fn get_number_pair(&mut self) -> Result<Point> {
        let x = self.get_number()?;
        self.opt_comma();
        let y = self.get_number()?;
        self.opt_comma();
        Ok(Point::new(x, y))
    }

    fn get_maybe_relative(&mut self, cmd: u8, cursor: Point) -> Result<Point> {
        let pt = self.get_number_pair()?;
        if cmd.is_ascii_lowercase() {
            Ok(pt + cursor)
        } else {
            Ok(pt)
        }
    }

    fn opt_comma(&mut self) {
        self.skip_ws();
        if let Some(c) = self.get_byte() {
            if c != b',' {
                self.unget();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::{Error, Path, Point, Segment};

    #[test]
    fn relative_and_absolute_commands() {
        let p = Path::from_svg(
            "m 6.1222251,228.86139 c 3.2732061,-2.13129 5.8707069,-4.49412 10.6737049,-3.83158 \
             C 4.802998,0.66254 7.471412,20.84919 7.896028,31.75029",
        )
        .unwrap();
        assert_eq!(
            p.svg(3),
            "M 6.122 228.861 C 9.395 226.730 11.993 224.367 16.796 225.030 \
             C 4.803 0.663 7.471 20.849 7.896 31.750"
        );
    }

    #[test]
    fn whitespace_and_glued_numbers() {
        let p = Path::from_svg("  m 6,228 L 10  20").unwrap();
        assert_eq!(p.svg(3), "M 6.000 228.000 L 10.000 20.000");
        let p = Path::from_svg("L3.5,0").unwrap();
        assert_eq!(p.svg(3), "L 3.500 0.000");
        let p = Path::from_svg("M1-2L-3.5e1,+4E-1").unwrap();
        assert_eq!(p.svg(1), "M 1.0 -2.0 L -35.0 0.4");
    }

    #[test]
    fn implicit_repetition() {
        let p = Path::from_svg("M 1 1 2 2 3 3 l 1 0 0 1").unwrap();
        assert_eq!(p.svg(0), "M 1 1 L 2 2 L 3 3 L 4 3 L 4 4");
        let p = Path::from_svg("m 1 1 2 2").unwrap();
        assert_eq!(p.svg(0), "M 1 1 L 3 3");
    }

    #[test]
    fn axis_lines_and_quadratics() {
        let p = Path::from_svg("M 1 1 H 5 v 3 h -2 V 0").unwrap();
        assert_eq!(p.svg(0), "M 1 1 L 5 1 L 5 4 L 3 4 L 3 0");
        let p = Path::from_svg("M 0 3 Q 3 6 6 3 t").unwrap_err();
        assert!(matches!(p, Error::MalformedPathText { .. }));
        let p = Path::from_svg("M 0 3 q 3 3 6 0").unwrap();
        match p[1] {
            Segment::Curve(c) => {
                assert!(c.p1.precision_eq(&Point::new(2.0, 5.0), 9));
                assert!(c.p3.precision_eq(&Point::new(6.0, 3.0), 9));
            }
            _ => panic!("expected a curve"),
        }
    }

    #[test]
    fn smooth_curves() {
        let p = Path::from_svg("M 0 0 C 0 10 10 10 10 0 S 20 -10 20 0").unwrap();
        assert_eq!(
            p.svg(0),
            "M 0 0 C 0 10 10 10 10 0 C 10 -10 20 -10 20 0"
        );
    }

    #[test]
    fn close_path_is_skipped() {
        let p = Path::from_svg("M 0 0 L 1 0 L 1 1 Z").unwrap();
        assert_eq!(p.len(), 3);
        assert!(Path::from_svg("M 0 0 Z 3 4").is_err());
    }

    #[test]
    fn malformed_text() {
        match Path::from_svg("M 0 0 X 1 2") {
            Err(Error::MalformedPathText { fragment, reason }) => {
                assert_eq!(fragment, "X 1 2");
                assert_eq!(reason, "unknown command");
            }
            other => panic!("unexpected {other:?}"),
        }
        match Path::from_svg("M 0 0 L 1") {
            Err(Error::MalformedPathText { fragment, reason }) => {
                assert_eq!(fragment, "L 1");
                assert_eq!(reason, "not enough numbers");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(Path::from_svg("M 0 0 C 1 1 2").is_err());
        assert!(Path::from_svg("# 1 1").is_err());
    }

    fn defining_points(seg: &Segment) -> Vec<Point> {
        match seg {
            Segment::Move(l) | Segment::Line(l) => vec![l.p0, l.p1],
            Segment::Curve(c) => c.points().to_vec(),
        }
    }

    fn random_path(rng: &mut StdRng) -> Path {
        let mut segs = Vec::new();
        let mut cursor = Point::ORIGIN;
        for i in 0..rng.random_range(1..10) {
            let kind = if i == 0 { 0 } else { rng.random_range(0..3) };
            let mut pt = || {
                Point::new(rng.random_range(-500.0..500.0), rng.random_range(-500.0..500.0))
            };
            let seg = match kind {
                0 => Segment::move_to(cursor, pt()),
                1 => Segment::line(cursor, pt()),
                _ => Segment::curve(cursor, pt(), pt(), pt()),
            };
            cursor = seg.end();
            segs.push(seg);
        }
        segs.into_iter().collect()
    }

    #[test]
    fn text_round_trip_keeps_points() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..300 {
            let path = random_path(&mut rng);
            let text = path.svg(3);
            let parsed = Path::from_svg(&text).unwrap();
            assert_eq!(parsed.len(), path.len(), "{text}");
            for (a, b) in path.iter().zip(parsed.iter()) {
                assert_eq!(
                    core::mem::discriminant(a),
                    core::mem::discriminant(b),
                    "{text}"
                );
                for (p, q) in defining_points(a).into_iter().zip(defining_points(b)) {
                    assert!((p.x - q.x).abs() <= 1e-3, "{p:?} {q:?} in {text}");
                    assert!((p.y - q.y).abs() <= 1e-3, "{p:?} {q:?} in {text}");
                }
            }
        }
    }

    #[test]
    fn from_str() {
        let p: Path = "M 1 2 L 3 4".parse().unwrap();
        assert_eq!(p.cursor(), Point::new(3.0, 4.0));
        assert!(Path::from_svg("").unwrap().segments().is_empty());
    }
}
