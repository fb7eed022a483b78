// Copyright 2026 the Keyplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Breakpoint tables for device-dependent constants.

use alloc::vec::Vec;
use core::fmt;

/// A step function from a measurement (usually a width in points) to a value.
///
/// `values[0]` applies below the first breakpoint; `values[i + 1]` applies from
/// `breakpoints[i]` (inclusive) up to the next breakpoint.
///
/// ```
/// use keyplane_layout::ThresholdTable;
///
/// let top = ThresholdTable::new(&[12.0, 10.0, 8.0], &[350.0, 400.0]).unwrap();
/// assert_eq!(top.lookup(320.0), 12.0);
/// assert_eq!(top.lookup(350.0), 10.0);
/// assert_eq!(top.lookup(414.0), 8.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ThresholdTable {
    values: Vec<f64>,
    breakpoints: Vec<f64>,
}

/// Errors from [`ThresholdTable::new`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ThresholdError {
    /// `values.len()` must be exactly `breakpoints.len() + 1`.
    LengthMismatch {
        /// Number of values supplied.
        values: usize,
        /// Number of breakpoints supplied.
        breakpoints: usize,
    },
    /// Breakpoints must be strictly increasing.
    Unordered {
        /// Index of the first breakpoint not greater than its predecessor.
        index: usize,
    },
}

impl fmt::Display for ThresholdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch {
                values,
                breakpoints,
            } => write!(
                f,
                "expected {} values for {breakpoints} breakpoints, got {values}",
                breakpoints + 1
            ),
            Self::Unordered { index } => {
                write!(f, "breakpoint {index} is not greater than the one before it")
            }
        }
    }
}

impl core::error::Error for ThresholdError {}

impl ThresholdTable {
    /// Builds a table, checking lengths and breakpoint order.
    pub fn new(values: &[f64], breakpoints: &[f64]) -> Result<Self, ThresholdError> {
        if values.len() != breakpoints.len() + 1 {
            return Err(ThresholdError::LengthMismatch {
                values: values.len(),
                breakpoints: breakpoints.len(),
            });
        }
        if let Some(index) = breakpoints
            .windows(2)
            .position(|pair| pair[1] <= pair[0])
        {
            return Err(ThresholdError::Unordered { index: index + 1 });
        }
        Ok(Self {
            values: values.to_vec(),
            breakpoints: breakpoints.to_vec(),
        })
    }

    /// A table with a single value and no breakpoints.
    pub fn constant(value: f64) -> Self {
        Self {
            values: alloc::vec![value],
            breakpoints: Vec::new(),
        }
    }

    /// Index of the bracket `measurement` falls into.
    pub fn bracket(&self, measurement: f64) -> usize {
        self.breakpoints
            .iter()
            .rposition(|&b| measurement >= b)
            .map_or(0, |i| i + 1)
    }

    /// Value for `measurement`.
    pub fn lookup(&self, measurement: f64) -> f64 {
        self.values[self.bracket(measurement)]
    }

    /// Values in bracket order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Breakpoints in increasing order.
    pub fn breakpoints(&self) -> &[f64] {
        &self.breakpoints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_every_breakpoint_uses_first_value() {
        let t = ThresholdTable::new(&[3.0, 4.0], &[400.0]).unwrap();
        assert_eq!(t.lookup(0.0), 3.0);
        assert_eq!(t.lookup(399.9), 3.0);
        assert_eq!(t.lookup(400.0), 4.0);
        assert_eq!(t.bracket(1000.0), 1);
    }

    #[test]
    fn constant_ignores_measurement() {
        let t = ThresholdTable::constant(6.0);
        assert_eq!(t.lookup(-10.0), 6.0);
        assert_eq!(t.lookup(10_000.0), 6.0);
    }

    #[test]
    fn rejects_bad_shapes() {
        assert_eq!(
            ThresholdTable::new(&[1.0, 2.0], &[1.0, 2.0]),
            Err(ThresholdError::LengthMismatch {
                values: 2,
                breakpoints: 2
            })
        );
        assert_eq!(
            ThresholdTable::new(&[1.0, 2.0, 3.0], &[500.0, 400.0]),
            Err(ThresholdError::Unordered { index: 1 })
        );
    }
}
