//! Clamped numeric metric.

use serde::{Serialize, Serializer};

/// A numeric value confined to `[min, max]`.
///
/// Every mutation clamps, so the value can never leave its declared range
/// regardless of how many deltas are applied. Serializes as the bare value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounded {
    value: f64,
    min: f64,
    max: f64,
}

impl Bounded {
    /// Create a bounded value, clamping the initial value into range.
    ///
    /// If `min > max` the bounds are swapped.
    pub fn range(value: f64, min: f64, max: f64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            value: clamp(value, min, max),
            min,
            max,
        }
    }

    /// A percentage in `[0, 100]`.
    pub fn percent(value: f64) -> Self {
        Self::range(value, 0.0, 100.0)
    }

    /// A non-negative quantity with no practical upper bound.
    pub fn non_negative(value: f64) -> Self {
        Self::range(value, 0.0, f64::MAX)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Add `delta` and clamp. Returns the new value.
    pub fn nudge(&mut self, delta: f64) -> f64 {
        self.value = clamp(self.value + delta, self.min, self.max);
        self.value
    }

    /// Replace the value, clamping into range.
    pub fn set(&mut self, value: f64) {
        self.value = clamp(value, self.min, self.max);
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

fn clamp(v: f64, min: f64, max: f64) -> f64 {
    if v.is_nan() {
        return min;
    }
    v.max(min).min(max)
}

impl Serialize for Bounded {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value)
    }
}
