//! Range primitive - an (min, max) pair on the microsecond time axis.
//!
//! Used for the data, view and selection extents of a [`Timeline`].
//! Bounds are not validated: `min > max` is a caller precondition
//! violation and is passed through untouched. The only "special" range
//! is [`Range::EMPTY`], which has inverted infinite-ish bounds so that
//! any real range intersected or merged with it behaves sensibly.
//!
//! [`Timeline`]: crate::core::timeline::Timeline

use serde::{Deserialize, Serialize};

/// Interval of microsecond timestamps.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Range {
    min: f64,
    max: f64,
}

impl Default for Range {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Range {
    /// Empty range: min above every value, max below every value.
    pub const EMPTY: Self = Self {
        min: f64::MAX,
        max: -f64::MAX,
    };

    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Replace both bounds
    pub fn set(&mut self, min: f64, max: f64) {
        self.min = min;
        self.max = max;
    }

    pub fn set_min(&mut self, min: f64) {
        self.min = min;
    }

    pub fn set_max(&mut self, max: f64) {
        self.max = max;
    }

    /// Translate both bounds by a signed offset (width preserved)
    pub fn shift(&mut self, delta: f64) {
        self.min += delta;
        self.max += delta;
    }

    /// `max - min`. Negative for inverted ranges, zero for degenerate ones.
    pub fn length(&self) -> f64 {
        self.max - self.min
    }

    /// True when no value can lie inside (min strictly greater than max).
    /// A zero-width range is NOT empty - it contains exactly one point.
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Reset to [`Range::EMPTY`]
    pub fn clear(&mut self) {
        *self = Self::EMPTY;
    }

    /// Inclusive on both ends
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Overlap of two ranges, or [`Range::EMPTY`] if they don't touch.
    pub fn intersection(&self, other: &Range) -> Range {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        if min > max { Self::EMPTY } else { Self::new(min, max) }
    }

    /// Pin `value` into `[min, max]`. Empty ranges return the value unchanged.
    pub fn clamp(&self, value: f64) -> f64 {
        if self.is_empty() {
            return value;
        }
        value.max(self.min).min(self.max)
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            write!(f, "[empty]")
        } else {
            write!(f, "[{}, {}]", self.min, self.max)
        }
    }
}
