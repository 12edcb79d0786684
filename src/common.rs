// Copyright 2026 the Kerfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Common mathematical operations

use core::cmp::Ordering;

use arrayvec::ArrayVec;

/// Tolerance used by the curve root finder.
pub const ROOT_EPSILON: f64 = 0.000_001;

/// Round `v` to `digits` decimal places, half away from zero.
///
/// A negative `digits` leaves the value untouched.
///
/// # Examples
///
/// ```
/// use kerfline::common::round_to_digits;
///
/// assert_eq!(round_to_digits(1.2346, 3), 1.235);
/// assert_eq!(round_to_digits(-1.2346, 3), -1.235);
/// assert_eq!(round_to_digits(2.5, 0), 3.0);
/// ```
#[inline]
pub fn round_to_digits(v: f64, digits: i32) -> f64 {
    if digits < 0 {
        return v;
    }
    let scale = 10f64.powi(digits);
    let r = (v * scale).round() / scale;
    // -0.0 and 0.0 quantize to the same value.
    if r == 0.0 {
        0.0
    } else {
        r
    }
}

/// Are `a` and `b` equal once rounded to `digits` decimal places?
///
/// A negative `digits` asks for exact equality.
#[inline]
pub fn precision_eq(a: f64, b: f64, digits: i32) -> bool {
    if digits < 0 {
        return a == b;
    }
    round_to_digits(a, digits) == round_to_digits(b, digits)
}

/// Compare two floats at the given precision.
///
/// Quantized-equal values compare as [`Ordering::Equal`]; otherwise the raw
/// values are compared.
#[inline]
pub fn precision_cmp(a: f64, b: f64, digits: i32) -> Ordering {
    if precision_eq(a, b, digits) {
        Ordering::Equal
    } else if a < b {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Is `|a - b|` within `epsilon`?
#[inline]
pub fn approximately(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() <= epsilon
}

/// [`approximately`] with the root finder's tolerance.
#[inline]
pub fn approx(a: f64, b: f64) -> bool {
    approximately(a, b, ROOT_EPSILON)
}

/// Is `v` between `a` and `b` (in either order), or approximately equal to
/// one of them?
#[inline]
pub fn between(v: f64, a: f64, b: f64) -> bool {
    if approx(v, a) || approx(v, b) {
        return true;
    }
    (v >= a && v <= b) || (v <= a && v >= b)
}

/// Real cube root, defined for negative inputs.
#[inline]
pub fn crt(v: f64) -> f64 {
    if v < 0.0 {
        -(-v).powf(1.0 / 3.0)
    } else {
        v.powf(1.0 / 3.0)
    }
}

/// Linearly remap `v` from the domain `[ds, de]` onto `[ts, te]`.
#[inline]
pub fn map_range(v: f64, ds: f64, de: f64, ts: f64, te: f64) -> f64 {
    let d1 = de - ds;
    let d2 = te - ts;
    let v2 = v - ds;
    let r = v2 / d1;
    ts + d2 * r
}

/// Roots of a derivative polynomial given in Bernstein form.
///
/// Three coefficients describe a quadratic, two a linear function. Roots are
/// not clipped to `[0, 1]`; a degenerate quadratic falls back to its linear
/// root. The square root of a negative discriminant yields NaN roots, which
/// range filters downstream reject.
pub fn droots(p: &[f64]) -> ArrayVec<f64, 2> {
    let mut result = ArrayVec::new();
    match *p {
        [a, b, c] => {
            let d = a - 2.0 * b + c;
            if d != 0.0 {
                let m1 = -(b * b - a * c).sqrt();
                let m2 = -a + b;
                result.push(-(m1 + m2) / d);
                result.push(-(-m1 + m2) / d);
            } else if b != c {
                result.push((2.0 * b - c) / (2.0 * (b - c)));
            }
        }
        [a, b] => {
            if a != b {
                result.push(a / (a - b));
            }
        }
        _ => {}
    }
    result
}

#[cfg(test)]
mod tests {
    use core::cmp::Ordering;

    use super::{between, crt, droots, map_range, precision_cmp, precision_eq, round_to_digits};

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_to_digits(0.5, 0), 1.0);
        assert_eq!(round_to_digits(-0.5, 0), -1.0);
        assert_eq!(round_to_digits(1.23449, 3), 1.234);
        assert_eq!(round_to_digits(7.0, -1), 7.0);
        assert!(round_to_digits(-0.0001, 3).is_sign_positive());
    }

    #[test]
    fn precision_equality() {
        assert!(precision_eq(1.0001, 1.0004, 3));
        assert!(!precision_eq(1.0001, 1.0006, 3));
        assert!(precision_eq(-0.0001, 0.0001, 3));
        assert!(!precision_eq(1.0001, 1.0004, -1));
        assert_eq!(precision_cmp(1.0, 1.0004, 3), Ordering::Equal);
        assert_eq!(precision_cmp(1.0, 1.01, 3), Ordering::Less);
        assert_eq!(precision_cmp(2.0, 1.01, 3), Ordering::Greater);
    }

    #[test]
    fn between_either_order() {
        assert!(between(5.0, 1.0, 10.0));
        assert!(between(5.0, 10.0, 1.0));
        assert!(between(1.0000001, 0.0, 1.0));
        assert!(!between(11.0, 1.0, 10.0));
    }

    #[test]
    fn cube_roots() {
        assert!((crt(27.0) - 3.0).abs() < 1e-12);
        assert!((crt(-8.0) + 2.0).abs() < 1e-12);
    }

    #[test]
    fn derivative_roots() {
        // a - 2b + c == 0 falls back to the linear root
        let r = droots(&[2.0, 1.0, 0.0]);
        assert_eq!(r.len(), 1);
        assert!((r[0] - 1.0).abs() < 1e-12);
        let r = droots(&[3.0, -1.0]);
        assert_eq!(r.len(), 1);
        assert!((r[0] - 0.75).abs() < 1e-12);
        assert!(droots(&[1.0, 1.0]).is_empty());
    }

    #[test]
    fn remap() {
        assert!((map_range(0.5, 0.0, 1.0, 0.2, 0.4) - 0.3).abs() < 1e-12);
        assert_eq!(map_range(0.75, 0.5, 1.0, 0.0, 1.0), 0.5);
    }
}
