// Copyright 2026 the Kerfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kernel configuration.

/// Number of decimal digits two coordinates must share to be considered
/// equal, unless configured otherwise.
pub const DEFAULT_PRECISION: i32 = 3;

/// Combined bounding box width and height under which the curve/curve
/// intersection search stops bisecting.
pub const DEFAULT_CURVE_INTERSECTION_THRESHOLD: f64 = 0.5;

/// Tunable values shared by the segment operators and path transforms.
///
/// # Examples
///
/// ```
/// use kerfline::KernelOptions;
///
/// let options = KernelOptions::new().with_precision(4);
/// assert_eq!(options.precision, 4);
/// assert_eq!(options.curve_intersection_threshold, 0.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KernelOptions {
    /// Decimal digits used for every quantized comparison.
    pub precision: i32,
    /// Convergence threshold of the curve/curve intersection bisection.
    pub curve_intersection_threshold: f64,
}

impl KernelOptions {
    /// Options with the default precision and threshold.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of decimal digits used for comparisons.
    #[must_use]
    pub fn with_precision(mut self, precision: i32) -> Self {
        self.precision = precision;
        self
    }

    /// Set the curve/curve intersection convergence threshold.
    #[must_use]
    pub fn with_curve_intersection_threshold(mut self, threshold: f64) -> Self {
        self.curve_intersection_threshold = threshold;
        self
    }
}

impl Default for KernelOptions {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            curve_intersection_threshold: DEFAULT_CURVE_INTERSECTION_THRESHOLD,
        }
    }
}
