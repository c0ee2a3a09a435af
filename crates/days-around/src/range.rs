//! Inclusive integer ranges.
//!
//! The day window walks offsets `-before..=after`; [`ClosedRange`] is that walk
//! as a value that can be validated, measured, and iterated more than once.

use crate::error::{LayoutError, Result};
use std::ops::RangeInclusive;

/// An inclusive interval `[lo, hi]` of integers with `lo <= hi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClosedRange {
    lo: i64,
    hi: i64,
}

impl ClosedRange {
    /// Build the range `[lo, hi]`.
    ///
    /// # Errors
    /// Returns `LayoutError::InvalidArgument` if `lo > hi`.
    pub fn from_to(lo: i64, hi: i64) -> Result<Self> {
        if lo > hi {
            return Err(LayoutError::InvalidArgument(format!(
                "range lower bound {} exceeds upper bound {}",
                lo, hi
            )));
        }
        Ok(Self { lo, hi })
    }

    /// `[-before, after]` for counts already known to be non-negative.
    pub(crate) fn around_zero(before: i64, after: i64) -> Self {
        debug_assert!(before >= 0 && after >= 0);
        Self {
            lo: -before,
            hi: after,
        }
    }

    pub fn lo(&self) -> i64 {
        self.lo
    }

    pub fn hi(&self) -> i64 {
        self.hi
    }

    /// Number of integers in the range. Never zero.
    ///
    /// `u128` because `[i64::MIN, i64::MAX]` holds 2^64 values.
    pub fn len(&self) -> u128 {
        u128::from(self.hi.abs_diff(self.lo)) + 1
    }

    /// Always `false`; present for symmetry with [`ClosedRange::len`].
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, value: i64) -> bool {
        self.lo <= value && value <= self.hi
    }

    /// Ascending iterator over `lo..=hi`.
    pub fn iter(&self) -> RangeInclusive<i64> {
        self.lo..=self.hi
    }

    /// The range materialised in ascending order.
    pub fn to_vec(&self) -> Vec<i64> {
        self.iter().collect()
    }
}

impl IntoIterator for ClosedRange {
    type Item = i64;
    type IntoIter = RangeInclusive<i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &ClosedRange {
    type Item = i64;
    type IntoIter = RangeInclusive<i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
