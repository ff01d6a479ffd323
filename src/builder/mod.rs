//! Type-state builders for filter construction.
//!
//! # Examples
//!
//! ```
//! use slicebloom::builder::SlicedBloomFilterBuilder;
//!
//! let mut filter = SlicedBloomFilterBuilder::new()
//!     .capacity(1_000)
//!     .false_positive_rate(0.001)
//!     .build()
//!     .unwrap();
//! filter.add("hello").unwrap();
//! assert!(filter.contains("hello"));
//! ```

#![allow(clippy::module_name_repetitions)]

pub mod sliced;

pub use sliced::SlicedBloomFilterBuilder;

/// Parameter checks shared by builders.
pub mod validation {
    use crate::core::params::{MAX_SLICES, MIN_SLICES};
    use crate::error::{Result, SliceBloomError};

    /// Capacity must be positive.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCapacity` for 0.
    #[inline]
    pub fn validate_capacity(capacity: usize) -> Result<()> {
        if capacity == 0 {
            return Err(SliceBloomError::invalid_capacity(capacity));
        }
        Ok(())
    }

    /// Rate must lie in the open interval (0, 1); NaN is rejected.
    ///
    /// # Errors
    ///
    /// Returns `FalsePositiveRateOutOfBounds` otherwise.
    #[inline]
    pub fn validate_fp_rate(fp_rate: f64) -> Result<()> {
        if !(fp_rate > 0.0 && fp_rate < 1.0) {
            return Err(SliceBloomError::fp_rate_out_of_bounds(fp_rate));
        }
        Ok(())
    }

    /// Slice count must lie in `[MIN_SLICES, MAX_SLICES]`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHashCount` otherwise.
    #[inline]
    pub fn validate_slices_count(slices_count: usize) -> Result<()> {
        if !(MIN_SLICES..=MAX_SLICES).contains(&slices_count) {
            return Err(SliceBloomError::invalid_hash_count(
                slices_count,
                MIN_SLICES,
                MAX_SLICES,
            ));
        }
        Ok(())
    }
}

pub mod prelude {
    //! Builder re-exports.
    pub use super::SlicedBloomFilterBuilder;
}
