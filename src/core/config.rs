//! Capacity and false positive target shared by every filter variant.

use crate::builder::validation::{validate_capacity, validate_fp_rate};
use crate::error::Result;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The two numbers a filter is built from.
///
/// Composed into each filter rather than inherited; geometry (slice count and
/// slice width) is always derived from these values, never stored next to them.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FilterConfig {
    capacity: usize,
    false_positive_rate: f64,
}

impl FilterConfig {
    /// Validate and build a configuration.
    ///
    /// # Errors
    ///
    /// - `InvalidCapacity` if `capacity == 0`
    /// - `FalsePositiveRateOutOfBounds` if `false_positive_rate` is not in (0, 1)
    ///
    /// # Examples
    ///
    /// ```
    /// use slicebloom::core::FilterConfig;
    ///
    /// let config = FilterConfig::new(1_000, 0.01).unwrap();
    /// assert_eq!(config.capacity(), 1_000);
    ///
    /// assert!(FilterConfig::new(0, 0.01).is_err());
    /// assert!(FilterConfig::new(1_000, 1.0).is_err());
    /// ```
    pub fn new(capacity: usize, false_positive_rate: f64) -> Result<Self> {
        validate_capacity(capacity)?;
        validate_fp_rate(false_positive_rate)?;
        Ok(Self {
            capacity,
            false_positive_rate,
        })
    }

    /// Maximum number of insertions the filter is sized for.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Target false positive probability at `capacity` insertions.
    #[inline]
    #[must_use]
    pub const fn false_positive_rate(&self) -> f64 {
        self.false_positive_rate
    }
}

impl fmt::Display for FilterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[capacity={}, falsePositiveRate={}]",
            self.capacity, self.false_positive_rate
        )
    }
}
